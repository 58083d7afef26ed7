//! Spexport CLI - Export a SentencePiece tokenizer to a single JSON document.
//!
//! This is the main entry point for the `spexport` command-line tool.

mod commands;

use clap::{ArgAction, Parser};
use commands::ExportCommand;
use env_logger::Env;
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "spexport")]
#[command(
    about = "Merge a SentencePiece model and its JSON metadata into tokenizer_export.json",
    long_about = None
)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    export: ExportCommand,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Decrease log verbosity (-q warnings only, -qq errors only)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            std::process::exit(1);
        }
        Err(err) => err.exit(),
    };

    init_logging(cli.verbose, cli.quiet);
    commands::export::run(cli.export)
}

fn init_logging(verbose: u8, quiet: u8) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp(None);
    // RUST_LOG applies unless a verbosity flag was given.
    if let Some(level) = level_override(verbose, quiet) {
        builder.filter_level(level);
    }
    let _ = builder.try_init();
}

fn level_override(verbose: u8, quiet: u8) -> Option<LevelFilter> {
    match (quiet, verbose) {
        (0, 0) => None,
        (0, 1) => Some(LevelFilter::Debug),
        (0, _) => Some(LevelFilter::Trace),
        (1, _) => Some(LevelFilter::Warn),
        _ => Some(LevelFilter::Error),
    }
}
