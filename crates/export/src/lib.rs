//! Spexport - SentencePiece tokenizer export
//!
//! This crate merges a trained SentencePiece `tokenizer.model` with the JSON
//! metadata that usually ships next to it into one self-contained export
//! document.
//!
//! # Stages
//!
//! 1. Base vocabulary read from the model (piece, score, type flags)
//! 2. `added_tokens.json` overrides
//! 3. `tokenizer_config.json` `added_tokens_decoder` overrides
//! 4. Padding up to the vocabulary size with `[PAD<k>]` entries
//! 5. Special-token ids, add-on-encode flags and the chat template
//!
//! Later overrides replace earlier entries at the same id. The final table is
//! always dense over `0..vocab_size`.
//!
//! # Example
//!
//! ```no_run
//! use spexport::Exporter;
//!
//! let report = Exporter::builder("models/llama").build().run()?;
//! println!("{} tokens written to {}", report.vocab_size, report.output.display());
//! # Ok::<(), spexport::ExportError>(())
//! ```

// Re-export core types
pub use spexport_core::{
    ExportError, ModelReader, Result, SpecialRole, SpecialTokenFlags, SpecialTokenIds, TokenEntry,
    TokenTable, TokenType,
};

// Export driver
pub mod exporter;
pub use exporter::{assemble, Assembled, ExportConfig, ExportReport, Exporter, ExporterBuilder};

// IO/Serialization
pub mod io;
pub use io::{load_export, save_export, ExportDocument, SentencePieceModel, SideFiles};

// Pipeline stages
pub mod stages;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
