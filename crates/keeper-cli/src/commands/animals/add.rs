//! Add animal command implementation.

use anyhow::Result;
use clap::Args;

use keeper_core::AnimalDraft;

use crate::commands;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Species (cat, dog, other)
    #[arg(long, default_value = "cat")]
    pub species: String,

    /// Age in whole years
    #[arg(long, default_value = "0")]
    pub age: String,
}

pub async fn run(args: AddArgs, url: Option<String>) -> Result<()> {
    let controller = super::mounted(url).await?;

    controller.open_add();
    let draft = AnimalDraft {
        name: args.name,
        species: args.species,
        age: args.age,
    };

    commands::submit_draft(&controller, draft).await
}
