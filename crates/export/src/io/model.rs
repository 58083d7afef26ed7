//! SentencePiece model reader.
//!
//! A `tokenizer.model` file is a serialized `ModelProto`. Only the piece list
//! is needed here; trainer and normalizer specs are skipped by the decoder.

use prost::Message;
use spexport_core::{ExportError, ModelReader, Result};
use std::path::Path;

/// Top-level SentencePiece model message.
#[derive(Clone, PartialEq, Message)]
pub struct ModelProto {
    #[prost(message, repeated, tag = "1")]
    pub pieces: Vec<SentencePiece>,
}

/// One vocabulary piece.
#[derive(Clone, PartialEq, Message)]
pub struct SentencePiece {
    #[prost(string, optional, tag = "1")]
    pub piece: Option<String>,
    #[prost(float, optional, tag = "2")]
    pub score: Option<f32>,
    #[prost(enumeration = "PieceType", optional, tag = "3")]
    pub r#type: Option<i32>,
}

impl SentencePiece {
    pub fn new(piece: &str, score: f32, kind: PieceType) -> Self {
        Self {
            piece: Some(piece.to_string()),
            score: Some(score),
            r#type: Some(kind as i32),
        }
    }

    /// Piece type, falling back to `Normal` when unset or unrecognised.
    pub fn kind(&self) -> PieceType {
        self.r#type
            .and_then(|raw| PieceType::try_from(raw).ok())
            .unwrap_or(PieceType::Normal)
    }
}

/// Piece type as stored in the model file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum PieceType {
    Normal = 1,
    Unknown = 2,
    Control = 3,
    UserDefined = 4,
    Unused = 5,
    Byte = 6,
}

/// A decoded `tokenizer.model`.
#[derive(Debug, Clone)]
pub struct SentencePieceModel {
    proto: ModelProto,
}

impl SentencePieceModel {
    /// Load and decode a model file.
    ///
    /// A missing file is reported as [`ExportError::ModelNotFound`].
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ExportError::ModelNotFound(path.to_path_buf()));
        }

        let bytes = std::fs::read(path).map_err(|e| ExportError::io(path, e))?;
        Self::from_bytes(&bytes).map_err(|e| match e {
            ExportError::ModelDecode { reason, .. } => ExportError::ModelDecode {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })
    }

    /// Decode a model from its serialized protobuf bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let proto = ModelProto::decode(bytes).map_err(|e| ExportError::ModelDecode {
            path: Default::default(),
            reason: e.to_string(),
        })?;

        if u32::try_from(proto.pieces.len()).is_err() {
            return Err(ExportError::ModelDecode {
                path: Default::default(),
                reason: format!("{} pieces do not fit in a u32 id space", proto.pieces.len()),
            });
        }

        Ok(Self { proto })
    }

    pub fn from_proto(proto: ModelProto) -> Self {
        Self { proto }
    }

    #[inline]
    fn entry(&self, id: u32) -> &SentencePiece {
        &self.proto.pieces[id as usize]
    }
}

impl ModelReader for SentencePieceModel {
    fn vocab_size(&self) -> usize {
        self.proto.pieces.len()
    }

    fn piece(&self, id: u32) -> &str {
        self.entry(id).piece()
    }

    fn score(&self, id: u32) -> f32 {
        self.entry(id).score()
    }

    fn is_unknown(&self, id: u32) -> bool {
        self.entry(id).kind() == PieceType::Unknown
    }

    fn is_control(&self, id: u32) -> bool {
        self.entry(id).kind() == PieceType::Control
    }

    fn is_unused(&self, id: u32) -> bool {
        self.entry(id).kind() == PieceType::Unused
    }

    fn is_byte(&self, id: u32) -> bool {
        self.entry(id).kind() == PieceType::Byte
    }
}
