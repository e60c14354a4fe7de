use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlashSyncError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Could not find {identifier} constant in {}", .path.display())]
    PatternNotFound { identifier: String, path: PathBuf },

    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Invalid source URL: {url}")]
    InvalidUrl { url: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for FlashSyncError {
    fn user_message(&self) -> String {
        match self {
            FlashSyncError::Network { message } => {
                format!("Error downloading from Google Sheets: {}", message)
            }
            FlashSyncError::PatternNotFound { identifier, path } => {
                format!(
                    "Error: Could not find {} constant in {}",
                    identifier,
                    file_label(path)
                )
            }
            FlashSyncError::FileNotFound { path } => {
                format!("Error: Could not find {}", path.display())
            }
            FlashSyncError::InvalidUrl { url } => {
                format!("Invalid source URL: {}", url)
            }
            FlashSyncError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            FlashSyncError::Io(e) => format!("Error: {}", e),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            FlashSyncError::Network { .. } => Some(
                "Check your internet connection and that the sheet is still published to the web.".to_string()
            ),
            FlashSyncError::PatternNotFound { identifier, .. } => Some(format!(
                "The target file must contain a declaration of the form: const {} = `...`;",
                identifier
            )),
            FlashSyncError::FileNotFound { .. } => Some(
                "Run from the directory containing the target file, or pass --target.".to_string()
            ),
            FlashSyncError::InvalidUrl { .. } => Some(
                "Use an http:// or https:// URL pointing at a TSV export (e.g. ...?output=tsv).".to_string()
            ),
            FlashSyncError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with --generate-config.".to_string()
            ),
            FlashSyncError::Io(_) => None,
        }
    }
}

impl From<reqwest::Error> for FlashSyncError {
    fn from(error: reqwest::Error) -> Self {
        let message = if let Some(status) = error.status() {
            format!("HTTP {}", status)
        } else if error.is_timeout() {
            "request timed out".to_string()
        } else if error.is_connect() {
            format!("connection failed ({})", error)
        } else {
            error.to_string()
        };

        FlashSyncError::Network { message }
    }
}

impl From<url::ParseError> for FlashSyncError {
    fn from(error: url::ParseError) -> Self {
        FlashSyncError::InvalidUrl {
            url: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for FlashSyncError {
    fn from(error: toml::de::Error) -> Self {
        FlashSyncError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FlashSyncError>;

fn file_label(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
