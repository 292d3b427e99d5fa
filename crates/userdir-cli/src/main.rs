//! userdir - Browse and edit a local directory of users.
//!
//! The directory is kept as one JSON snapshot on disk. When no snapshot
//! exists, it is populated from a user search API.

mod cli;
mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{create, delete, edit, list, show};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    // No subcommand falls through to the list.
    let command = cli
        .command
        .unwrap_or_else(|| Commands::List(list::ListArgs::default()));

    match command {
        Commands::List(args) => list::run(&cli.store, args).await,
        Commands::Show(args) => show::run(&cli.store, args).await,
        Commands::Create(args) => create::run(&cli.store, args).await,
        Commands::Edit(args) => edit::run(&cli.store, args).await,
        Commands::Delete(args) => delete::run(&cli.store, args).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so stdout stays clean for --json output.
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
