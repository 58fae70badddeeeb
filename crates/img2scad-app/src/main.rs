//! The `img2scad` binary.

use std::process::ExitCode;

use clap::Parser;
use img2scad_app::Batch;
use img2scad_config::{CliArgs, Config};
use img2scad_log::init_logging;
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let mut config = match Config::load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("img2scad: {e}");
            return ExitCode::FAILURE;
        }
    };
    config.apply_cli_overrides(&args);

    if let Some(path) = &args.save_config {
        return match config.save(path) {
            Ok(()) => {
                println!("Wrote config to {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("img2scad: {e}");
                ExitCode::FAILURE
            }
        };
    }

    init_logging(config.debug.log_dir.as_deref(), Some(&config));
    if let Some(path) = &args.config {
        info!(path = %path.display(), "loaded config");
    }

    let batch = match Batch::from_config(&config) {
        Ok(batch) => batch,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    info!(params = ?batch.params(), "starting batch");

    match batch.run() {
        Ok(report) if report.is_clean() => ExitCode::SUCCESS,
        Ok(report) => {
            error!(failed = report.failed.len(), "some images could not be converted");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
