use clap::Parser;
use colored::*;
use phirbo::cli::{Cli, Commands};
use phirbo::PhirboError;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise PHIRBO_LOG, raised by -v
    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let log_level = std::env::var("PHIRBO_LOG").unwrap_or_else(|_| default_level.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);

        let exit_code = match e.downcast_ref::<PhirboError>() {
            Some(PhirboError::Config(_)) | Some(PhirboError::InvalidParameter(_)) => 2,
            Some(PhirboError::Io(_)) => 3,
            Some(PhirboError::Parse(_)) | Some(PhirboError::MalformedRankedList(_)) => 4,
            Some(PhirboError::EmptyCollection(_)) => 5,
            Some(PhirboError::WorkerFailure(_)) => 6,
            None => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let threads = cli.threads;
    if let Some(n) = threads {
        tracing::debug!("Using {} worker threads", n);
    }

    match cli.command {
        Commands::Predict(mut args) => {
            args.threads = threads;
            phirbo::cli::commands::predict::run(args)
        }
        Commands::Rank(mut args) => {
            args.threads = threads;
            phirbo::cli::commands::rank::run(args)
        }
        Commands::Weight(args) => phirbo::cli::commands::weight::run(args),
    }
}
