//! fieldorder CLI - field dependency inference for tabular data.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Analyze {
            file,
            exclude,
            repeat,
            resolve,
            prefer,
            json,
            output,
        } => commands::analyze::run(
            file,
            commands::analyze::Options {
                exclude,
                repeat,
                resolve,
                prefer,
                json,
                output,
            },
            cli.verbose,
        ),

        Commands::Counts { file, json } => commands::counts::run(file, json, cli.verbose),

        Commands::Demo { repeat, json } => commands::demo::run(repeat, json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
