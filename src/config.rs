use crate::error::{FlashSyncError, Result};
use crate::literal::{pattern::is_js_identifier, DEFAULT_IDENTIFIER};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vT45XaOHQgAkXJ7fOcVpGyKV7prIITJ-NAb_U2TZm3rA6DFu2ktNla0MG9taaYpix-htv_gFtN-jyLh/pub?output=tsv";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub target: TargetConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TargetConfig {
    pub path: PathBuf,
    pub identifier: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_path: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SHEET_URL.to_string(),
            timeout_secs: None, // transport default
        }
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("app.js"),
            identifier: DEFAULT_IDENTIFIER.to_string(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("_csvData.csv"),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(FlashSyncError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| FlashSyncError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| FlashSyncError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["flashsync.toml", ".flashsync.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref url) = cli_args.url {
            self.source.url = url.clone();
        }

        if let Some(timeout) = cli_args.timeout {
            self.source.timeout_secs = Some(timeout);
        }

        if let Some(ref target) = cli_args.target {
            self.target.path = target.clone();
        }

        if let Some(ref identifier) = cli_args.identifier {
            self.target.identifier = identifier.clone();
        }

        if let Some(ref output) = cli_args.output {
            self.export.output_path = output.clone();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| FlashSyncError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| FlashSyncError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.source.url).map_err(|e| FlashSyncError::InvalidUrl {
            url: format!("{} ({})", self.source.url, e),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FlashSyncError::InvalidUrl {
                url: self.source.url.clone(),
            });
        }

        if self.source.timeout_secs == Some(0) {
            return Err(FlashSyncError::Config {
                message: "Source timeout must be greater than 0".to_string(),
            });
        }

        if !is_js_identifier(&self.target.identifier) {
            return Err(FlashSyncError::Config {
                message: format!(
                    "'{}' is not a valid constant identifier",
                    self.target.identifier
                ),
            });
        }

        if self.target.path.as_os_str().is_empty() {
            return Err(FlashSyncError::Config {
                message: "Target path must not be empty".to_string(),
            });
        }

        if self.export.output_path.as_os_str().is_empty() {
            return Err(FlashSyncError::Config {
                message: "Export output path must not be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn source_timeout(&self) -> Option<Duration> {
        self.source.timeout_secs.map(Duration::from_secs)
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub url: Option<String>,
    pub timeout: Option<u64>,
    pub target: Option<PathBuf>,
    pub identifier: Option<String>,
    pub output: Option<PathBuf>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<u64>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_target(mut self, target: Option<PathBuf>) -> Self {
        self.target = target;
        self
    }

    pub fn with_identifier(mut self, identifier: Option<String>) -> Self {
        self.identifier = identifier;
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }
}
