//! Remove animal command implementation.

use anyhow::{Context, Result};
use clap::Args;

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Record id of the animal to remove
    #[arg(long)]
    pub id: String,
}

pub async fn run(args: RemoveArgs, url: Option<String>) -> Result<()> {
    let controller = super::mounted(url).await?;
    let animal = super::find(&controller, &args.id)?;

    controller
        .remove(&animal.id)
        .await
        .context("Failed to remove animal")
}
