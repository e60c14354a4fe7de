use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateReport {
    pub source_url: String,
    pub target: PathBuf,
    pub identifier: String,
    pub bytes_downloaded: usize,
    pub line_count: usize,
    /// False for dry runs.
    pub written: bool,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportReport {
    pub source: PathBuf,
    pub output: PathBuf,
    pub identifier: String,
    pub bytes_extracted: usize,
    pub line_count: usize,
    pub written: bool,
    pub completed_at: DateTime<Utc>,
}
