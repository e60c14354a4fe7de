use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::ui::OutputMode;
use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;
use url::Url;

/// Flags shared by both tools.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Script file holding the constant
    #[arg(short, long, help = "Target script file (default: app.js)")]
    pub target: Option<PathBuf>,

    /// Name of the constant
    #[arg(long, help = "Constant identifier (default: csvData)")]
    pub identifier: Option<String>,

    /// Output format for status lines
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only failures are printed)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Do everything except the final write
    #[arg(long, help = "Show what would change without writing any file")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file and exit")]
    pub generate_config: bool,
}

#[derive(Parser, Debug)]
#[command(name = "update-flashcards")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Download flashcards from Google Sheets and update the csvData constant")]
#[command(after_help = "EXAMPLES:\n  \
    update-flashcards\n  \
    update-flashcards --target web/app.js\n  \
    update-flashcards --url 'https://docs.google.com/.../pub?output=tsv' --dry-run")]
pub struct UpdateCli {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Published TSV export URL
    #[arg(short, long, value_parser = validate_source_url)]
    pub url: Option<String>,

    /// Download timeout in seconds
    #[arg(long, help = "Timeout for the download (seconds, default: none)")]
    pub timeout: Option<u64>,
}

#[derive(Parser, Debug)]
#[command(name = "export-csvdata")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract the csvData constant from app.js into a standalone file")]
#[command(after_help = "EXAMPLES:\n  \
    export-csvdata\n  \
    export-csvdata --target web/app.js --output backup.csv")]
pub struct ExportCli {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Destination file
    #[arg(short, long, help = "Output file (default: _csvData.csv)")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    #[default]
    Human,
    /// JSON lines
    Json,
    /// Plain text output
    Plain,
}

impl From<OutputFormat> for OutputMode {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }
}

impl CommonArgs {
    pub fn load_config(&self, extra: CliOverrides) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = extra
            .with_target(self.target.clone())
            .with_identifier(self.identifier.clone());
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_format.into()
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    pub fn config_output_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from("flashsync.toml"))
    }
}

impl UpdateCli {
    pub fn load_config(&self) -> Result<Config> {
        self.common.load_config(
            CliOverrides::new()
                .with_url(self.url.clone())
                .with_timeout(self.timeout),
        )
    }
}

impl ExportCli {
    pub fn load_config(&self) -> Result<Config> {
        self.common
            .load_config(CliOverrides::new().with_output(self.output.clone()))
    }
}

pub fn validate_source_url(s: &str) -> std::result::Result<String, String> {
    let url = Url::parse(s).map_err(|_| "Invalid URL format. Please provide a valid URL.".to_string())?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err("Only HTTP and HTTPS URLs are supported".to_string()),
    }

    if url.host_str().is_none() {
        return Err("URL must include a valid hostname".to_string());
    }

    Ok(s.to_string())
}
