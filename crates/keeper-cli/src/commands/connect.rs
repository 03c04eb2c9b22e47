//! Connect command implementation.

use anyhow::{Context, Result};
use clap::Args;

use keeper_core::ServiceUrl;

use crate::config;
use crate::output;

#[derive(Args, Debug)]
pub struct ConnectArgs {
    /// Service base URL (HTTPS, or HTTP for localhost)
    pub url: String,
}

pub async fn run(args: ConnectArgs) -> Result<()> {
    let url = ServiceUrl::new(&args.url).context("Invalid service URL")?;

    config::save_service_url(&url).context("Failed to save config")?;

    output::success("Service URL saved");
    output::field("URL", url.as_str());

    Ok(())
}
