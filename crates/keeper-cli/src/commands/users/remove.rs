//! Remove user command implementation.

use anyhow::{Context, Result};
use clap::Args;

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Record id of the user to remove
    #[arg(long)]
    pub id: String,
}

pub async fn run(args: RemoveArgs, url: Option<String>) -> Result<()> {
    let controller = super::mounted(url).await?;
    let person = super::find(&controller, &args.id)?;

    controller
        .remove(&person.id)
        .await
        .context("Failed to remove user")
}
