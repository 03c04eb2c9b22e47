//! Animals subcommand implementations.

mod add;
mod edit;
mod list;
mod remove;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use keeper_core::{Animal, RecordId, ResourceKind};
use keeper_panel::{ListController, LoadState};
use keeper_rest::RestService;

use crate::config;
use crate::output;

#[derive(Args, Debug)]
pub struct AnimalsCommand {
    #[command(subcommand)]
    pub command: AnimalsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AnimalsSubcommand {
    /// List animals
    List(list::ListArgs),

    /// Add an animal
    Add(add::AddArgs),

    /// Edit an animal
    Edit(edit::EditArgs),

    /// Remove an animal
    Remove(remove::RemoveArgs),
}

pub async fn handle(cmd: AnimalsCommand, url: Option<String>) -> Result<()> {
    match cmd.command {
        AnimalsSubcommand::List(args) => list::run(args, url).await,
        AnimalsSubcommand::Add(args) => add::run(args, url).await,
        AnimalsSubcommand::Edit(args) => edit::run(args, url).await,
        AnimalsSubcommand::Remove(args) => remove::run(args, url).await,
    }
}

/// Build a mounted controller for the animal collection.
pub(crate) async fn mounted(
    url: Option<String>,
) -> Result<ListController<Animal, RestService>> {
    let service_url = config::resolve_service_url(url.as_deref())?;
    let service = RestService::new(service_url);

    let controller: ListController<Animal, _> =
        ListController::with_notifier(service, output::notifier(ResourceKind::Animal));
    controller.mount().await;

    if let LoadState::Failed(e) = controller.load_state() {
        return Err(e).context("Failed to fetch animals");
    }

    Ok(controller)
}

/// Look up an animal by id in the mounted collection.
pub(crate) fn find(
    controller: &ListController<Animal, RestService>,
    id: &str,
) -> Result<Animal> {
    let id = RecordId::new(id).context("Invalid record id")?;

    controller
        .rows()
        .into_iter()
        .find(|a| a.id == id)
        .with_context(|| format!("No animal with id '{}'", id))
}
