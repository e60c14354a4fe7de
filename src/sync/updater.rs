use crate::dataset::DelimitedDataset;
use crate::error::{FlashSyncError, Result};
use crate::literal::ConstantPattern;
use crate::sync::read_script;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Replaces the embedded constant of a script file with a new dataset.
pub struct FlashcardUpdater {
    pattern: ConstantPattern,
    target: PathBuf,
    dry_run: bool,
}

impl FlashcardUpdater {
    pub fn new(pattern: ConstantPattern, target: impl Into<PathBuf>) -> Self {
        Self {
            pattern,
            target: target.into(),
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Rewrite the target in place. On any error the file is left as it was.
    ///
    /// Returns whether the file was written (false in dry-run mode).
    pub fn update(&self, dataset: &DelimitedDataset) -> Result<bool> {
        let content = read_script(&self.target)?;
        let updated = self.render(&content, dataset)?;

        if self.dry_run {
            return Ok(false);
        }

        write_atomically(&self.target, &updated)?;
        Ok(true)
    }

    /// New file contents without touching the disk.
    pub fn render(&self, content: &str, dataset: &DelimitedDataset) -> Result<String> {
        self.pattern
            .rewrite(content, dataset)
            .ok_or_else(|| FlashSyncError::PatternNotFound {
                identifier: self.pattern.identifier().to_string(),
                path: self.target.clone(),
            })
    }
}

/// Write through a sibling temp file and rename over `path`.
///
/// Symlinks are resolved first so the link stays and its target is replaced.
fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let path = &fs::canonicalize(path)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(content.as_bytes())?;
    temp.flush()?;

    if let Ok(metadata) = fs::metadata(path) {
        temp.as_file().set_permissions(metadata.permissions())?;
    }

    temp.persist(path).map_err(|e| FlashSyncError::Io(e.error))?;
    Ok(())
}
