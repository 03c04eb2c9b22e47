//! Unban user command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

#[derive(Args, Debug)]
pub struct UnbanArgs {
    /// Record id of the user to unban
    #[arg(long)]
    pub id: String,
}

pub async fn run(args: UnbanArgs, url: Option<String>) -> Result<()> {
    let controller = super::mounted(url).await?;
    let person = super::find(&controller, &args.id)?;

    if !person.banned {
        eprintln!("{}", format!("'{}' is not banned", person.name).dimmed());
        return Ok(());
    }

    controller
        .toggle_ban(&person.id, person.banned)
        .await
        .context("Failed to unban user")
}
