//! Token entries and their classification.
//!
//! An entry carries the raw SentencePiece predicates (`is_unknown`,
//! `is_control`, ...) next to a single derived [`TokenType`]. The flags are
//! stored as read; the type is what consumers should switch on.

use crate::error::{ExportError, Result};
use compact_str::{format_compact, CompactString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Score given to every entry that does not come from the trained model.
pub const SENTINEL_SCORE: f32 = -1000.0;

/// SentencePiece word-boundary marker (U+2581).
pub const WORD_BOUNDARY: char = '\u{2581}';

/// Classification of a token, serialized as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum TokenType {
    #[default]
    Normal = 0,
    Unknown = 1,
    Control = 2,
    Unused = 3,
    Byte = 4,
    UserDefined = 5,
}

impl TokenType {
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for TokenType {
    type Error = ExportError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::Normal),
            1 => Ok(Self::Unknown),
            2 => Ok(Self::Control),
            3 => Ok(Self::Unused),
            4 => Ok(Self::Byte),
            5 => Ok(Self::UserDefined),
            other => Err(ExportError::UnknownTokenType(other)),
        }
    }
}

impl Serialize for TokenType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for TokenType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        TokenType::try_from(code).map_err(serde::de::Error::custom)
    }
}

/// Boolean predicates a model reader reports for one id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PieceFlags {
    pub unknown: bool,
    pub control: bool,
    pub unused: bool,
    pub byte: bool,
}

impl PieceFlags {
    /// Collapse the flags into one type. First set flag wins, in the order
    /// unknown, control, unused, byte.
    pub fn token_type(&self) -> TokenType {
        if self.unknown {
            TokenType::Unknown
        } else if self.control {
            TokenType::Control
        } else if self.unused {
            TokenType::Unused
        } else if self.byte {
            TokenType::Byte
        } else {
            TokenType::Normal
        }
    }
}

/// One row of the token table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenEntry {
    pub piece: CompactString,
    pub score: f32,
    pub is_unknown: bool,
    pub is_control: bool,
    pub is_unused: bool,
    pub is_byte: bool,
    #[serde(rename = "type")]
    pub kind: TokenType,
}

impl TokenEntry {
    /// Entry read from the trained model, typed by flag priority.
    pub fn from_model(piece: &str, score: f32, flags: PieceFlags) -> Self {
        Self {
            piece: CompactString::new(piece),
            score,
            is_unknown: flags.unknown,
            is_control: flags.control,
            is_unused: flags.unused,
            is_byte: flags.byte,
            kind: flags.token_type(),
        }
    }

    /// Token appended to the vocabulary after training.
    pub fn user_defined(piece: &str) -> Self {
        Self::sentinel(CompactString::new(piece), TokenType::UserDefined)
    }

    /// Token declared by a tokenizer config decoder.
    ///
    /// Control tokens keep their content verbatim. Everything else is stored
    /// as user-defined text with word-boundary markers turned into spaces.
    pub fn from_decoder(content: &str, is_control: bool) -> Self {
        if is_control {
            let mut entry = Self::sentinel(CompactString::new(content), TokenType::Control);
            entry.is_control = true;
            entry
        } else {
            let piece: CompactString = content
                .chars()
                .map(|c| if c == WORD_BOUNDARY { ' ' } else { c })
                .collect();
            Self::sentinel(piece, TokenType::UserDefined)
        }
    }

    /// Placeholder filling an id the model never defined. `ordinal` is 1-based.
    pub fn padding(ordinal: usize) -> Self {
        let mut entry = Self::sentinel(format_compact!("[PAD{}]", ordinal), TokenType::Unused);
        entry.is_unused = true;
        entry
    }

    fn sentinel(piece: CompactString, kind: TokenType) -> Self {
        Self {
            piece,
            score: SENTINEL_SCORE,
            is_unknown: false,
            is_control: false,
            is_unused: false,
            is_byte: false,
            kind,
        }
    }
}

/// Whether a piece is wrapped in a matching `<...>` or `[...]` pair.
pub fn looks_special(piece: &str) -> bool {
    let mut chars = piece.chars();
    match (chars.next(), chars.next_back()) {
        (Some('<'), Some('>')) | (Some('['), Some(']')) => true,
        _ => false,
    }
}
