//! Export command implementation.

use clap::Args;
use std::path::PathBuf;

/// Export command arguments.
#[derive(Args)]
pub struct ExportCommand {
    /// Directory containing tokenizer.model and its JSON side files
    #[arg(value_name = "MODEL_DIR")]
    pub model_dir: PathBuf,

    /// Model file name inside MODEL_DIR
    #[arg(long, default_value = "tokenizer.model")]
    pub model_file: PathBuf,

    /// Output file (MODEL_DIR/tokenizer_export.json if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pad the vocabulary up to this many entries
    #[arg(long)]
    pub vocab_size: Option<usize>,
}

use anyhow::{Context, Result as AnyhowResult};
use spexport::Exporter;

pub fn run(cmd: ExportCommand) -> AnyhowResult<()> {
    let mut builder = Exporter::builder(&cmd.model_dir).model_file(&cmd.model_file);
    if let Some(output) = &cmd.output {
        builder = builder.output(output);
    }
    if let Some(size) = cmd.vocab_size {
        builder = builder.vocab_size(size);
    }

    let report = builder
        .build()
        .run()
        .with_context(|| format!("failed to export tokenizer from {}", cmd.model_dir.display()))?;

    log::info!(
        "{} tokens ({} padded, {} overrides skipped), special tokens: [{}], chat template: {}",
        report.vocab_size,
        report.padded,
        report.skipped_overrides,
        report
            .special_roles
            .iter()
            .map(|role| role.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        if report.has_chat_template { "yes" } else { "no" },
    );

    Ok(())
}
