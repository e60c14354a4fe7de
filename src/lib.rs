pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod literal;
pub mod sync;
pub mod ui;

// Public API re-exports
pub use cli::{CommonArgs, ExportCli, OutputFormat, UpdateCli};
pub use config::{CliOverrides, Config, ExportConfig, SourceConfig, TargetConfig};
pub use error::{FlashSyncError, Result, UserFriendlyError};

pub use dataset::DelimitedDataset;
pub use fetch::{FetchedSheet, SheetFetcher};
pub use literal::ConstantPattern;
pub use sync::{CsvExporter, ExportReport, FlashcardUpdater, UpdateReport};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::path::Path;

/// Entry point shared by the `update-flashcards` and `export-csvdata` tools.
pub struct FlashSync {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    dry_run: bool,
}

impl FlashSync {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn from_update_cli(cli: &UpdateCli) -> Result<Self> {
        let config = cli.load_config()?;
        Ok(Self::from_common(config, &cli.common))
    }

    pub fn from_export_cli(cli: &ExportCli) -> Result<Self> {
        let config = cli.load_config()?;
        Ok(Self::from_common(config, &cli.common))
    }

    fn from_common(config: Config, common: &CommonArgs) -> Self {
        Self::new(
            config,
            common.output_mode(),
            common.verbosity_level(),
            common.quiet,
        )
        .with_dry_run(common.dry_run)
    }

    /// Download the sheet, convert it and rewrite the constant in the target.
    pub async fn update_flashcards(&self) -> Result<UpdateReport> {
        let pattern = ConstantPattern::new(&self.config.target.identifier)?;
        let fetcher = SheetFetcher::new(&self.config.source.url)?
            .with_timeout(self.config.source_timeout());

        self.output_formatter
            .start_operation("Downloading data from Google Sheets...");
        self.output_formatter.debug(&format!("Source: {}", fetcher.url()));

        let spinner = self.progress_manager.create_spinner("Downloading");
        let fetched = fetcher.fetch().await;
        ui::progress::finish_spinner(&spinner);
        let sheet = fetched?;

        self.output_formatter
            .success(&format!("Downloaded {} bytes", sheet.byte_len()));

        let dataset = DelimitedDataset::from_tsv(&sheet.text);
        let line_count = dataset.line_count();
        self.output_formatter
            .success(&format!("Converted to CSV format ({} lines)", line_count));

        let target = &self.config.target.path;
        self.output_formatter
            .start_operation(&format!("Updating {}...", target.display()));

        let updater = FlashcardUpdater::new(pattern, target).with_dry_run(self.dry_run);
        let written = updater.update(&dataset)?;

        Ok(UpdateReport {
            source_url: sheet.url,
            target: updater.target().to_path_buf(),
            identifier: self.config.target.identifier.clone(),
            bytes_downloaded: sheet.text.len(),
            line_count,
            written,
            completed_at: chrono::Utc::now(),
        })
    }

    /// Copy the constant out of the target into the export file.
    pub fn export_csv_data(&self) -> Result<ExportReport> {
        let pattern = ConstantPattern::new(&self.config.target.identifier)?;
        let exporter = CsvExporter::new(
            pattern,
            &self.config.target.path,
            &self.config.export.output_path,
        )
        .with_dry_run(self.dry_run);

        self.output_formatter.debug(&format!(
            "Extracting {} from {}",
            self.config.target.identifier,
            exporter.source().display()
        ));

        let dataset = exporter.export()?;
        self.output_formatter.info(&format!(
            "Extracted {}",
            ui::output::format_bytes(dataset.len())
        ));

        Ok(ExportReport {
            source: exporter.source().to_path_buf(),
            output: exporter.output().to_path_buf(),
            identifier: self.config.target.identifier.clone(),
            bytes_extracted: dataset.len(),
            line_count: dataset.line_count(),
            written: !self.dry_run,
            completed_at: chrono::Utc::now(),
        })
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &FlashSyncError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Exit status for a finished run: 0 on success, 1 on any failure.
pub fn exit_code<T>(result: &Result<T>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}
