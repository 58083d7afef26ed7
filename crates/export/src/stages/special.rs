//! Special-token id and flag derivation.

use crate::io::ConfigDocument;
use spexport_core::{SpecialRole, SpecialTokenFlags, SpecialTokenIds, TokenTable};

/// Resolve every special role against the config documents, in order.
///
/// Per document and role, an explicit `<role>_token_id` below `vocab_size`
/// wins; otherwise `<role>_token` is looked up by piece, lowest id first. A
/// role resolved by an earlier document is never overwritten by a later one.
pub fn resolve_special_ids(
    table: &TokenTable,
    vocab_size: usize,
    documents: &[&ConfigDocument],
) -> SpecialTokenIds {
    let index = table.piece_index();
    let mut ids = SpecialTokenIds::new();

    for document in documents {
        for role in SpecialRole::ALL {
            if ids.contains_key(&role) {
                continue;
            }

            if let Some(id) = document.token_id(role) {
                if id < vocab_size as u64 {
                    ids.insert(role, id as u32);
                    continue;
                }
                log::debug!(
                    "{}: {} = {id} is out of range for vocab size {vocab_size}",
                    document.path().display(),
                    role.id_key()
                );
            }

            let Some(content) = document.token_content(role) else {
                continue;
            };
            match index.get(content) {
                Some(id) if (id as usize) < vocab_size => {
                    ids.insert(role, id);
                }
                _ => log::debug!(
                    "{}: {} {content:?} is not in the vocabulary",
                    document.path().display(),
                    role.token_key()
                ),
            }
        }
    }

    ids
}

/// Read explicit `add_<role>_token` booleans from the primary config.
pub fn load_add_flags(primary: Option<&ConfigDocument>) -> SpecialTokenFlags {
    let Some(primary) = primary else {
        return SpecialTokenFlags::new();
    };

    SpecialRole::ALL
        .into_iter()
        .filter_map(|role| primary.add_flag(role).map(|flag| (role, flag)))
        .collect()
}
