mod logger;

use anyhow::{Context, Result};
use clap::Parser;
use fabric_roll::{RollConfig, RollGenerator, verify_directories};
use log::Level;
use std::path::PathBuf;
use std::process::ExitCode;

const LOG_FILE: &str = "pdf_debug.log";

#[derive(Parser)]
#[command(
    name = "fabric-roll",
    about = "Generate PDFs with tiled images and overlay footers",
    version
)]
struct Cli {
    /// Images to tile; each produces one PDF per roll template
    #[arg(required = true, num_args = 1..)]
    image_paths: Vec<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help and --version also arrive here, on stdout
            return if err.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(err) = logger::RunLogger::new(LOG_FILE, Level::Info).init() {
        eprintln!("Logger already initialised: {}", err);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("Unexpected error in main: {:#}", err);
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = RollConfig::default();

    verify_directories(&config).context("Directory verification failed, exiting")?;

    let generator = RollGenerator::new(config).context("Invalid configuration")?;
    let report = generator.run(&cli.image_paths).await;

    let failed = report.images.len() - report.complete_count();
    if failed > 0 {
        log::warn!(
            "{} of {} images did not produce every output",
            failed,
            report.images.len()
        );
    }

    Ok(())
}
