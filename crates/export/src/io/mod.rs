//! Reading model inputs and writing the export.
//!
//! This module holds the SentencePiece protobuf reader, the optional JSON
//! side files, and the export document format.

pub mod format;
pub mod load;
pub mod model;
pub mod save;

pub use format::ExportDocument;
pub use load::{AddedTokens, ConfigDocument, DecoderEntry, SideFiles};
pub use model::SentencePieceModel;
pub use save::{load_export, save_export};
