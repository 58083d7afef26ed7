//! Padding to the declared vocabulary size.

use spexport_core::{TokenEntry, TokenTable};

/// Fill every missing id below `vocab_size` with an unused `[PAD<k>]` entry.
///
/// `k` counts from 1 within this call. When the table is already dense this
/// appends from `table.len()` upwards. Returns the number of entries added.
pub fn pad_to_vocab_size(table: &mut TokenTable, vocab_size: usize) -> usize {
    if table.len() >= vocab_size {
        return 0;
    }

    let missing: Vec<u32> = (0..vocab_size as u32).filter(|&id| !table.contains(id)).collect();
    log::info!("Padding vocab with {} tokens", missing.len());

    for (ordinal, id) in missing.iter().enumerate() {
        table.insert(*id, TokenEntry::padding(ordinal + 1));
    }

    missing.len()
}
