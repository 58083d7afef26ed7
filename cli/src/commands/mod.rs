//! CLI commands for spexport.

pub mod export;

pub use export::ExportCommand;
