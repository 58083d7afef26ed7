//! Token table data model.
//!
//! This module contains the entries, the id-keyed table, the special-token
//! role maps, and the seam through which a trained model is read.

pub mod entry;
pub mod reader;
pub mod special;
pub mod table;

pub use entry::{looks_special, PieceFlags, TokenEntry, TokenType, SENTINEL_SCORE, WORD_BOUNDARY};
pub use reader::ModelReader;
pub use special::{SpecialRole, SpecialTokenFlags, SpecialTokenIds};
pub use table::{PieceIndex, TokenTable};
