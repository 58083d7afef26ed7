//! Loading of the optional JSON side files.
//!
//! Every side file is optional: a missing file loads as `None`. A file that
//! exists but is not valid JSON, or whose top level has the wrong shape, is an
//! error rather than being treated as absent.

use super::format::{ADDED_TOKENS_FILE, CONFIG_FILE, TOKENIZER_CONFIG_FILE};
use serde_json::{Map, Value};
use spexport_core::{ExportError, Result, SpecialRole};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// All side files found next to a model.
#[derive(Debug, Clone, Default)]
pub struct SideFiles {
    pub added_tokens: Option<AddedTokens>,
    /// `tokenizer_config.json`, the primary config
    pub tokenizer_config: Option<ConfigDocument>,
    /// `config.json`, the fallback config
    pub config: Option<ConfigDocument>,
}

impl SideFiles {
    /// Load every side file present in `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let added_path = dir.join(ADDED_TOKENS_FILE);
        let added_tokens = read_json_object(&added_path)?
            .map(|map| AddedTokens::from_map(&added_path, map))
            .transpose()?;

        let tokenizer_config_path = dir.join(TOKENIZER_CONFIG_FILE);
        let tokenizer_config = read_json_object(&tokenizer_config_path)?
            .map(|map| ConfigDocument::new(tokenizer_config_path, map));

        let config_path = dir.join(CONFIG_FILE);
        let config =
            read_json_object(&config_path)?.map(|map| ConfigDocument::new(config_path, map));

        Ok(Self {
            added_tokens,
            tokenizer_config,
            config,
        })
    }

    /// Config documents in lookup order: primary first, then fallback.
    pub fn config_chain(&self) -> Vec<&ConfigDocument> {
        self.tokenizer_config
            .iter()
            .chain(self.config.iter())
            .collect()
    }
}

/// Contents of `added_tokens.json`, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddedTokens {
    tokens: Vec<(String, i64)>,
}

impl AddedTokens {
    pub fn new(tokens: Vec<(String, i64)>) -> Self {
        Self { tokens }
    }

    fn from_map(path: &Path, map: Map<String, Value>) -> Result<Self> {
        let tokens = map
            .into_iter()
            .map(|(piece, id)| match integer_id(&id) {
                Some(id) => Ok((piece, id)),
                None => Err(ExportError::malformed(
                    path,
                    format!("id for added token {piece:?} is not an integer: {id}"),
                )),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { tokens })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.tokens.iter().map(|(piece, id)| (piece.as_str(), *id))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// One `added_tokens_decoder` record.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoderEntry {
    pub id: i64,
    pub content: String,
    pub special: bool,
}

/// A tokenizer or model config file, kept as a raw JSON object.
///
/// Only a handful of fields are read and their types are checked at the point
/// of use, so the document is not deserialized into a fixed struct.
#[derive(Debug, Clone, Default)]
pub struct ConfigDocument {
    path: PathBuf,
    fields: Map<String, Value>,
}

impl ConfigDocument {
    pub fn new(path: impl Into<PathBuf>, fields: Map<String, Value>) -> Self {
        Self {
            path: path.into(),
            fields,
        }
    }

    /// Build from an in-memory JSON value. Anything other than an object is
    /// rejected.
    pub fn from_value(path: impl Into<PathBuf>, value: Value) -> Result<Self> {
        let path = path.into();
        let fields = expect_object(&path, value)?;
        Ok(Self::new(path, fields))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `added_tokens_decoder` records in file order. Empty when the field is
    /// missing.
    pub fn decoder(&self) -> Result<Vec<DecoderEntry>> {
        let Some(decoder) = self.fields.get("added_tokens_decoder") else {
            return Ok(Vec::new());
        };
        let decoder = decoder.as_object().ok_or_else(|| {
            ExportError::malformed(&self.path, "added_tokens_decoder is not an object")
        })?;

        decoder
            .iter()
            .map(|(key, data)| -> Result<DecoderEntry> {
                let id = parse_id_key(key).ok_or_else(|| {
                    ExportError::malformed(
                        &self.path,
                        format!("added_tokens_decoder key {key:?} is not an integer id"),
                    )
                })?;
                let content = data.get("content").and_then(Value::as_str).ok_or_else(|| {
                    ExportError::malformed(
                        &self.path,
                        format!("added_tokens_decoder entry {key} has no string content"),
                    )
                })?;
                let special = data.get("special").and_then(Value::as_bool).unwrap_or(false);

                Ok(DecoderEntry {
                    id,
                    content: content.to_string(),
                    special,
                })
            })
            .collect()
    }

    /// `<role>_token_id`, when it is a non-negative integer.
    pub fn token_id(&self, role: SpecialRole) -> Option<u64> {
        self.fields.get(&role.id_key()).and_then(Value::as_u64)
    }

    /// `<role>_token`, either a bare string or `{ "content": string }`.
    pub fn token_content(&self, role: SpecialRole) -> Option<&str> {
        match self.fields.get(&role.token_key())? {
            Value::String(content) => Some(content.as_str()),
            Value::Object(token) => token.get("content").and_then(Value::as_str),
            _ => None,
        }
    }

    /// `add_<role>_token`, when it is a boolean.
    pub fn add_flag(&self, role: SpecialRole) -> Option<bool> {
        self.fields.get(&role.add_key()).and_then(Value::as_bool)
    }

    /// `chat_template`, when it is a string.
    pub fn chat_template(&self) -> Option<&str> {
        self.fields.get("chat_template").and_then(Value::as_str)
    }
}

/// Read `path` as a JSON object. `Ok(None)` when the file does not exist.
fn read_json_object(path: &Path) -> Result<Option<Map<String, Value>>> {
    if !path.is_file() {
        return Ok(None);
    }

    let file = File::open(path).map_err(|e| ExportError::io(path, e))?;
    let reader = BufReader::new(file);
    let value: Value = serde_json::from_reader(reader).map_err(|err| ExportError::Parse {
        path: path.to_path_buf(),
        err,
    })?;

    let fields = expect_object(path, value)?;
    log::debug!("loaded {} ({} fields)", path.display(), fields.len());
    Ok(Some(fields))
}

/// Integer id from a JSON number. Integers beyond `i64` saturate so they
/// land out of range instead of being rejected.
fn integer_id(value: &Value) -> Option<i64> {
    if let Some(id) = value.as_i64() {
        return Some(id);
    }
    if value.is_u64() {
        return Some(i64::MAX);
    }
    // Integers past u64 only survive parsing as whole floats.
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() >= i64::MAX as f64)
        .map(|f| if f < 0.0 { i64::MIN } else { i64::MAX })
}

/// Integer id from a decoder key, saturating like [`integer_id`].
fn parse_id_key(key: &str) -> Option<i64> {
    let key = key.trim();
    if let Ok(id) = key.parse::<i64>() {
        return Some(id);
    }

    let (negative, digits) = match key.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, key.strip_prefix('+').unwrap_or(key)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}

fn expect_object(path: &Path, value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(fields) => Ok(fields),
        other => Err(ExportError::malformed(
            path,
            format!("expected a JSON object, found {}", json_kind(&other)),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
