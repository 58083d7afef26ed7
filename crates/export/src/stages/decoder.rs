//! Tokenizer-config decoder override.

use super::id_in_range;
use crate::io::DecoderEntry;
use spexport_core::{looks_special, TokenEntry, TokenTable};

/// Overwrite table entries with `added_tokens_decoder` records.
///
/// Runs after the added-tokens pass and wins over it. A record is a control
/// token when flagged `special` or when its content is bracketed like `<eos>`
/// or `[CLS]`. Returns the number of out-of-range records skipped.
pub fn apply_decoder(table: &mut TokenTable, vocab_size: usize, decoder: &[DecoderEntry]) -> usize {
    let mut skipped = 0;

    for record in decoder {
        let Some(id) = id_in_range(record.id, vocab_size) else {
            log::warn!(
                "Ignoring decoder token {:?} with id {}: out of range for vocab size {vocab_size}",
                record.content,
                record.id
            );
            skipped += 1;
            continue;
        };

        let is_control = record.special || looks_special(&record.content);
        let entry = TokenEntry::from_decoder(&record.content, is_control);

        if let Some(previous) = replaced_piece(table, id, &entry) {
            log::warn!("Replacing token {id}: {previous:?} -> {:?}", entry.piece);
        }
        table.insert(id, entry);
    }

    log::debug!("applied {} decoder tokens", decoder.len() - skipped);
    skipped
}

/// The piece an override at `id` would displace, if it differs from the new one.
fn replaced_piece<'a>(table: &'a TokenTable, id: u32, entry: &TokenEntry) -> Option<&'a str> {
    table
        .get(id)
        .map(|current| current.piece.as_str())
        .filter(|&piece| piece != entry.piece.as_str())
}
