use crate::dataset::DelimitedDataset;
use crate::error::{FlashSyncError, Result};
use crate::literal::ConstantPattern;
use crate::sync::read_script;
use std::fs;
use std::path::{Path, PathBuf};

/// Copies the embedded constant out of a script file, verbatim.
///
/// Escape markers written by [`FlashcardUpdater`](crate::sync::FlashcardUpdater)
/// are not removed, so a dataset containing backticks does not round-trip.
pub struct CsvExporter {
    pattern: ConstantPattern,
    source: PathBuf,
    output: PathBuf,
    dry_run: bool,
}

impl CsvExporter {
    pub fn new(
        pattern: ConstantPattern,
        source: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            pattern,
            source: source.into(),
            output: output.into(),
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Nothing is written unless the source was read and the constant found.
    pub fn export(&self) -> Result<DelimitedDataset> {
        let dataset = self.extract()?;

        if !self.dry_run {
            fs::write(&self.output, dataset.as_str())?;
        }

        Ok(dataset)
    }

    pub fn extract(&self) -> Result<DelimitedDataset> {
        let content = read_script(&self.source)?;

        self.pattern
            .extract(&content)
            .map(DelimitedDataset::new)
            .ok_or_else(|| FlashSyncError::PatternNotFound {
                identifier: self.pattern.identifier().to_string(),
                path: self.source.clone(),
            })
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}
