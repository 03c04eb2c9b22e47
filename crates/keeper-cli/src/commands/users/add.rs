//! Add user command implementation.

use anyhow::Result;
use clap::Args;

use keeper_core::PersonDraft;

use crate::commands;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Gender (female, male, other)
    #[arg(long, default_value = "male")]
    pub gender: String,
}

pub async fn run(args: AddArgs, url: Option<String>) -> Result<()> {
    let controller = super::mounted(url).await?;

    controller.open_add();
    let draft = PersonDraft {
        name: args.name,
        gender: args.gender,
        // New users are never pre-banned.
        banned: false,
    };

    commands::submit_draft(&controller, draft).await
}
