//! Base vocabulary extraction.

use spexport_core::{ModelReader, TokenEntry, TokenTable};

/// Read every piece the model defines below `vocab_size` into a fresh table.
pub fn extract_base<R: ModelReader + ?Sized>(reader: &R, vocab_size: usize) -> TokenTable {
    let count = reader.vocab_size().min(vocab_size);
    let mut table = TokenTable::new();

    for id in 0..count as u32 {
        let entry = TokenEntry::from_model(reader.piece(id), reader.score(id), reader.flags(id));
        table.insert(id, entry);
    }

    log::debug!("extracted {} base pieces", table.len());
    table
}
