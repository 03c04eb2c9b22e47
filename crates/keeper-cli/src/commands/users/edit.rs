//! Edit user command implementation.

use anyhow::Result;
use clap::Args;

use keeper_core::Resource;

use crate::commands;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Record id of the user to edit
    #[arg(long)]
    pub id: String,

    /// New display name
    #[arg(long)]
    pub name: Option<String>,

    /// New gender (female, male, other)
    #[arg(long)]
    pub gender: Option<String>,

    /// New banned flag (true or false)
    #[arg(long)]
    pub banned: Option<bool>,
}

pub async fn run(args: EditArgs, url: Option<String>) -> Result<()> {
    let controller = super::mounted(url).await?;
    let person = super::find(&controller, &args.id)?;

    // Pre-populate from the record, then apply the supplied overrides.
    let mut draft = person.draft();
    if let Some(name) = args.name {
        draft.name = name;
    }
    if let Some(gender) = args.gender {
        draft.gender = gender;
    }
    if let Some(banned) = args.banned {
        draft.banned = banned;
    }

    controller.open_edit(person);
    commands::submit_draft(&controller, draft).await
}
