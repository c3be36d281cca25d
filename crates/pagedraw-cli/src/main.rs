//! Pagedraw CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use pagedraw_cli::{
    Args,
    error_adapter::{element_context, to_reportables},
};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting pagedraw");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = pagedraw_cli::run(&args) {
        let reporter = miette::GraphicalReportHandler::new();

        for failure in err.errors() {
            if let Some(context) = element_context(failure) {
                error!("{context}");
            }
            for reportable in to_reportables(failure) {
                let mut writer = String::new();
                reporter
                    .render_report(&mut writer, &reportable)
                    .expect("Writing to String buffer is infallible");

                error!("{writer}");
            }
        }
        if let pagedraw_cli::Error::Diagrams(_) = err {
            error!("{err}");
        }

        process::exit(1);
    }

    info!("Completed successfully");
}
