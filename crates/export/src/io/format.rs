//! Format definitions for the export document and its inputs.

use serde::{Deserialize, Serialize};
use spexport_core::{SpecialTokenFlags, SpecialTokenIds, TokenTable};

/// Binary SentencePiece model inside the model directory.
pub const MODEL_FILE: &str = "tokenizer.model";
/// Token string -> id map of tokens added after training.
pub const ADDED_TOKENS_FILE: &str = "added_tokens.json";
/// Primary config: decoder overrides, special tokens, chat template.
pub const TOKENIZER_CONFIG_FILE: &str = "tokenizer_config.json";
/// Fallback config for special tokens and chat template.
pub const CONFIG_FILE: &str = "config.json";
/// Default name of the written artifact.
pub const EXPORT_FILE: &str = "tokenizer_export.json";

/// The exported artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    /// Complete token table, ids `0..vocab_size`
    pub tokens: TokenTable,
    /// Resolved special-token ids
    pub special_tokens: SpecialTokenIds,
    /// Explicit add-on-encode flags from the tokenizer config
    pub add_special_tokens: SpecialTokenFlags,
    /// Chat template source, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_template: Option<String>,
}
