//! Added-tokens override.

use super::id_in_range;
use crate::io::AddedTokens;
use spexport_core::{TokenEntry, TokenTable};

/// Overwrite table entries with tokens from `added_tokens.json`.
///
/// Each in-range pair replaces whatever the id held before. Out-of-range ids
/// are skipped with a warning. Returns the number skipped.
pub fn apply_added_tokens(table: &mut TokenTable, vocab_size: usize, added: &AddedTokens) -> usize {
    let mut skipped = 0;

    for (piece, raw_id) in added.iter() {
        let Some(id) = id_in_range(raw_id, vocab_size) else {
            log::warn!("Ignoring added token {piece:?} with id {raw_id}: out of range for vocab size {vocab_size}");
            skipped += 1;
            continue;
        };
        table.insert(id, TokenEntry::user_defined(piece));
    }

    log::debug!("applied {} added tokens", added.len() - skipped);
    skipped
}
