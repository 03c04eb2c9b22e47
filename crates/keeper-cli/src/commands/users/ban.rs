//! Ban user command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

#[derive(Args, Debug)]
pub struct BanArgs {
    /// Record id of the user to ban
    #[arg(long)]
    pub id: String,
}

pub async fn run(args: BanArgs, url: Option<String>) -> Result<()> {
    let controller = super::mounted(url).await?;
    let person = super::find(&controller, &args.id)?;

    if person.banned {
        eprintln!("{}", format!("'{}' is already banned", person.name).dimmed());
        return Ok(());
    }

    controller
        .toggle_ban(&person.id, person.banned)
        .await
        .context("Failed to ban user")
}
