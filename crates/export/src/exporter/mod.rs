//! Main export implementation.
//!
//! This module provides the high-level `Exporter` that resolves paths, loads
//! the model and side files, runs the stages in order, and writes the result.

use crate::io::format::{EXPORT_FILE, MODEL_FILE};
use crate::io::{save_export, ExportDocument, SentencePieceModel, SideFiles};
use crate::stages;
use spexport_core::{ExportError, ModelReader, Result, SpecialRole};
use std::path::{Path, PathBuf};

/// Configuration for one export run.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory holding the model and its side files
    pub model_dir: PathBuf,
    /// Model file name, relative to `model_dir` unless absolute
    pub model_file: PathBuf,
    /// Output path; defaults to `<model_dir>/tokenizer_export.json`
    pub output: Option<PathBuf>,
    /// Vocabulary size to pad up to; defaults to the model's piece count
    pub vocab_size: Option<usize>,
}

impl ExportConfig {
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
            model_file: PathBuf::from(MODEL_FILE),
            output: None,
            vocab_size: None,
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join(&self.model_file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.model_dir.join(EXPORT_FILE))
    }
}

/// Builder for creating an exporter.
#[derive(Debug, Clone)]
pub struct ExporterBuilder {
    config: ExportConfig,
}

impl ExporterBuilder {
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            config: ExportConfig::new(model_dir),
        }
    }

    /// Use a model file other than `tokenizer.model`.
    pub fn model_file(mut self, name: impl Into<PathBuf>) -> Self {
        self.config.model_file = name.into();
        self
    }

    /// Write the export somewhere other than the model directory.
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output = Some(path.into());
        self
    }

    /// Pad the vocabulary up to `size` entries.
    pub fn vocab_size(mut self, size: usize) -> Self {
        self.config.vocab_size = Some(size);
        self
    }

    pub fn build(self) -> Exporter {
        Exporter {
            config: self.config,
        }
    }
}

/// What an export run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub output: PathBuf,
    pub vocab_size: usize,
    /// Placeholder entries added by padding
    pub padded: usize,
    /// Override records dropped for out-of-range ids
    pub skipped_overrides: usize,
    pub special_roles: Vec<SpecialRole>,
    pub has_chat_template: bool,
}

/// Export document plus the counts gathered while building it.
#[derive(Debug, Clone)]
pub struct Assembled {
    pub document: ExportDocument,
    pub padded: usize,
    pub skipped_overrides: usize,
}

/// Drives one export from a model directory.
#[derive(Debug, Clone)]
pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    pub fn builder(model_dir: impl Into<PathBuf>) -> ExporterBuilder {
        ExporterBuilder::new(model_dir)
    }

    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Run every stage and write the export document.
    pub fn run(&self) -> Result<ExportReport> {
        let model_dir = self.config.model_dir.as_path();
        if !model_dir.is_dir() {
            return Err(ExportError::ModelDirNotFound(model_dir.to_path_buf()));
        }

        let model = SentencePieceModel::open(&self.config.model_path())?;
        let side = SideFiles::load(model_dir)?;
        let vocab_size = target_vocab_size(&model, self.config.vocab_size)?;

        let assembled = assemble(&model, &side, vocab_size)?;
        let output = self.config.output_path();
        write_document(&assembled.document, &output)?;

        Ok(ExportReport {
            output,
            vocab_size,
            padded: assembled.padded,
            skipped_overrides: assembled.skipped_overrides,
            special_roles: assembled.document.special_tokens.keys().copied().collect(),
            has_chat_template: assembled.document.chat_template.is_some(),
        })
    }
}

/// Resolve the size the table is padded to. It may grow the model's
/// vocabulary but never shrink it.
pub fn target_vocab_size<R: ModelReader + ?Sized>(
    reader: &R,
    requested: Option<usize>,
) -> Result<usize> {
    let model_size = reader.vocab_size();
    match requested {
        None => Ok(model_size),
        Some(size) if size < model_size => Err(ExportError::InvalidConfig(format!(
            "vocab size {size} is smaller than the model's {model_size} pieces"
        ))),
        Some(size) if u32::try_from(size).is_err() => Err(ExportError::InvalidConfig(format!(
            "vocab size {size} does not fit in a u32 id space"
        ))),
        Some(size) => Ok(size),
    }
}

/// Build the export document from a model and its side files.
///
/// Stages run strictly in order: base vocabulary, added tokens, config
/// decoder, padding, then the special-token maps and chat template.
pub fn assemble<R: ModelReader + ?Sized>(
    reader: &R,
    side: &SideFiles,
    vocab_size: usize,
) -> Result<Assembled> {
    let mut tokens = stages::extract_base(reader, vocab_size);
    let mut skipped_overrides = 0;

    if let Some(added) = &side.added_tokens {
        skipped_overrides += stages::apply_added_tokens(&mut tokens, vocab_size, added);
    }
    if let Some(tokenizer_config) = &side.tokenizer_config {
        let decoder = tokenizer_config.decoder()?;
        skipped_overrides += stages::apply_decoder(&mut tokens, vocab_size, &decoder);
    }
    let padded = stages::pad_to_vocab_size(&mut tokens, vocab_size);
    debug_assert!(tokens.len() == vocab_size && tokens.is_dense());

    let chain = side.config_chain();
    let special_tokens = stages::resolve_special_ids(&tokens, vocab_size, &chain);
    let add_special_tokens = stages::load_add_flags(side.tokenizer_config.as_ref());
    let chat_template = stages::extract_chat_template(&chain);

    Ok(Assembled {
        document: ExportDocument {
            tokens,
            special_tokens,
            add_special_tokens,
            chat_template,
        },
        padded,
        skipped_overrides,
    })
}

fn write_document(document: &ExportDocument, output: &Path) -> Result<()> {
    save_export(document, output)?;
    log::info!("Exported tokenizer to {}", output.display());
    Ok(())
}
