use clap::Parser;
use flashsync::{exit_code, FlashSync, OutputFormatter, UpdateCli, UserFriendlyError};
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = run().await;
    process::exit(exit_code);
}

async fn run() -> i32 {
    let cli = UpdateCli::parse();

    if cli.common.generate_config {
        return handle_generate_config(&cli);
    }

    let flashsync = match FlashSync::from_update_cli(&cli) {
        Ok(flashsync) => flashsync,
        Err(e) => {
            startup_formatter(&cli).print_user_friendly_error(&e);
            return 1;
        }
    };

    let result = flashsync.update_flashcards().await;
    match &result {
        Ok(report) => flashsync.output_formatter().print_update_report(report),
        Err(e) => flashsync.handle_error(e),
    }

    exit_code(&result)
}

fn handle_generate_config(cli: &UpdateCli) -> i32 {
    let config_path = cli.common.config_output_path();
    let formatter = startup_formatter(cli);

    match FlashSync::generate_sample_config(&config_path) {
        Ok(()) => {
            formatter.success(&format!(
                "Generated sample configuration file: {}",
                config_path.display()
            ));
            0
        }
        Err(e) => {
            formatter.error(&format!(
                "Failed to generate configuration file: {}",
                e.user_message()
            ));
            1
        }
    }
}

fn startup_formatter(cli: &UpdateCli) -> OutputFormatter {
    OutputFormatter::new(
        cli.common.output_mode(),
        cli.common.verbosity_level(),
        cli.common.quiet,
    )
}
