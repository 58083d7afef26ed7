//! Spexport-core - Data model for SentencePiece tokenizer exports
//!
//! This crate provides the token table that the export pipeline builds up
//! stage by stage, independent of where the model and metadata come from.
//!
//! # Features
//!
//! - Id-ordered token table with replace-on-insert semantics
//! - Token classification from SentencePiece piece predicates
//! - Special-token role maps with stable serialization order
//! - A `ModelReader` trait for plugging in any model source
//!
//! # Example
//!
//! ```rust
//! use spexport_core::{TokenEntry, TokenTable, TokenType};
//!
//! let mut table = TokenTable::new();
//! table.insert(0, TokenEntry::user_defined("<|im_start|>"));
//! table.insert(1, TokenEntry::padding(1));
//!
//! assert!(table.is_dense());
//! assert_eq!(table.get(1).unwrap().kind, TokenType::Unused);
//! ```

pub mod error;
pub use error::{ExportError, Result};

pub mod vocab;
pub use vocab::{
    looks_special, ModelReader, PieceFlags, PieceIndex, SpecialRole, SpecialTokenFlags,
    SpecialTokenIds, TokenEntry, TokenTable, TokenType, SENTINEL_SCORE, WORD_BOUNDARY,
};
