pub mod exporter;
pub mod report;
pub mod updater;

pub use exporter::CsvExporter;
pub use report::{ExportReport, UpdateReport};
pub use updater::FlashcardUpdater;

use crate::error::{FlashSyncError, Result};
use std::path::Path;

/// Read the whole script file, reporting a missing file as such.
pub(crate) fn read_script(path: &Path) -> Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(FlashSyncError::FileNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(FlashSyncError::Io(e)),
    }
}
