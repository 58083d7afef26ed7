//! Writing and reading back the export document.

use super::format::ExportDocument;
use spexport_core::{ExportError, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Write `doc` to `path` as indented UTF-8 JSON.
///
/// Non-ASCII pieces are written literally. Output for identical documents is
/// byte-identical.
pub fn save_export(doc: &ExportDocument, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| ExportError::io(parent, e))?;
        }
    }

    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, doc)?;
    writer.flush().map_err(|e| ExportError::io(path, e))?;

    Ok(())
}

/// Read a previously written export document.
pub fn load_export(path: &Path) -> Result<ExportDocument> {
    let file = File::open(path).map_err(|e| ExportError::io(path, e))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|err| ExportError::Parse {
        path: path.to_path_buf(),
        err,
    })
}
