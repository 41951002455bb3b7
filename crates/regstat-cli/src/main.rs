//! Regstat CLI - aggregate civil-registration extracts.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Process {
            files,
            output,
            delimiter,
            batch_size,
            document,
            seed,
            json,
        } => commands::process::run(commands::process::ProcessArgs {
            files,
            output,
            delimiter,
            batch_size,
            document,
            seed,
            json,
            verbose: cli.verbose,
        }),

        Commands::Summary { file, json } => commands::summary::run(file, json, cli.verbose),

        Commands::Drilldown {
            file,
            state,
            month,
            demographic,
        } => commands::drilldown::run(file, state, month, demographic, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
