//! The export stages, in the order they run.
//!
//! Each stage takes the token table by reference and either rewrites entries
//! or reads it to derive the special-token maps. Later stages win for the
//! same id: decoder over added tokens over the base vocabulary.

pub mod added;
pub mod base;
pub mod decoder;
pub mod padding;
pub mod special;
pub mod template;

#[cfg(test)]
pub(crate) mod testing;

pub use added::apply_added_tokens;
pub use base::extract_base;
pub use decoder::apply_decoder;
pub use padding::pad_to_vocab_size;
pub use special::{load_add_flags, resolve_special_ids};
pub use template::extract_chat_template;

/// Convert a raw override id to a table id, or `None` when it falls outside
/// `0..vocab_size`.
pub(crate) fn id_in_range(raw: i64, vocab_size: usize) -> Option<u32> {
    u32::try_from(raw).ok().filter(|&id| (id as usize) < vocab_size)
}
