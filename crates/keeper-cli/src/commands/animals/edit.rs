//! Edit animal command implementation.

use anyhow::Result;
use clap::Args;

use keeper_core::Resource;

use crate::commands;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Record id of the animal to edit
    #[arg(long)]
    pub id: String,

    /// New display name
    #[arg(long)]
    pub name: Option<String>,

    /// New species (cat, dog, other)
    #[arg(long)]
    pub species: Option<String>,

    /// New age in whole years
    #[arg(long)]
    pub age: Option<String>,
}

pub async fn run(args: EditArgs, url: Option<String>) -> Result<()> {
    let controller = super::mounted(url).await?;
    let animal = super::find(&controller, &args.id)?;

    // Pre-populate from the record, then apply the supplied overrides.
    let mut draft = animal.draft();
    if let Some(name) = args.name {
        draft.name = name;
    }
    if let Some(species) = args.species {
        draft.species = species;
    }
    if let Some(age) = args.age {
        draft.age = age;
    }

    controller.open_edit(animal);
    commands::submit_draft(&controller, draft).await
}
