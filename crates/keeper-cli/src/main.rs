//! keeper - CLI front end for the record-admin toolkit.
//!
//! A thin operator shell over the `keeper-panel` list controller, talking
//! to a remote record service over REST.

mod cli;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{animals, connect, users};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Connect(args) => connect::run(args).await,
        Commands::Users(cmd) => users::handle(cmd, cli.url).await,
        Commands::Animals(cmd) => animals::handle(cmd, cli.url).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().with_target(false)).init();
    }
}
