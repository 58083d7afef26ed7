//! Read-only view over a trained tokenizer model.

use super::entry::PieceFlags;

/// Per-id lookups exposed by a loaded tokenizer model.
///
/// Ids passed to the lookup methods are always `< vocab_size()`.
pub trait ModelReader {
    /// Number of pieces the model defines.
    fn vocab_size(&self) -> usize;

    fn piece(&self, id: u32) -> &str;

    fn score(&self, id: u32) -> f32;

    fn is_unknown(&self, id: u32) -> bool;

    fn is_control(&self, id: u32) -> bool;

    fn is_unused(&self, id: u32) -> bool;

    fn is_byte(&self, id: u32) -> bool;

    /// All four predicates for `id` at once.
    fn flags(&self, id: u32) -> PieceFlags {
        PieceFlags {
            unknown: self.is_unknown(id),
            control: self.is_control(id),
            unused: self.is_unused(id),
            byte: self.is_byte(id),
        }
    }
}
