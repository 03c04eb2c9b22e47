//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::animals::AnimalsCommand;
use crate::commands::connect::ConnectArgs;
use crate::commands::users::UsersCommand;

/// Admin CLI for a remote record service.
#[derive(Parser, Debug)]
#[command(name = "keeper")]
#[command(author, version = env!("KEEPER_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Service base URL (overrides config and KEEPER_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Persist the service base URL
    Connect(ConnectArgs),

    /// Manage user records
    Users(UsersCommand),

    /// Manage animal records
    Animals(AnimalsCommand),
}
