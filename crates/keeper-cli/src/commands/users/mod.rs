//! Users subcommand implementations.

mod add;
mod ban;
mod edit;
mod list;
mod remove;
mod unban;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use keeper_core::{Person, RecordId, ResourceKind};
use keeper_panel::{ListController, LoadState};
use keeper_rest::RestService;

use crate::config;
use crate::output;

#[derive(Args, Debug)]
pub struct UsersCommand {
    #[command(subcommand)]
    pub command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum UsersSubcommand {
    /// List users
    List(list::ListArgs),

    /// Add a user
    Add(add::AddArgs),

    /// Edit a user
    Edit(edit::EditArgs),

    /// Ban a user
    Ban(ban::BanArgs),

    /// Lift a user's ban
    Unban(unban::UnbanArgs),

    /// Remove a user
    Remove(remove::RemoveArgs),
}

pub async fn handle(cmd: UsersCommand, url: Option<String>) -> Result<()> {
    match cmd.command {
        UsersSubcommand::List(args) => list::run(args, url).await,
        UsersSubcommand::Add(args) => add::run(args, url).await,
        UsersSubcommand::Edit(args) => edit::run(args, url).await,
        UsersSubcommand::Ban(args) => ban::run(args, url).await,
        UsersSubcommand::Unban(args) => unban::run(args, url).await,
        UsersSubcommand::Remove(args) => remove::run(args, url).await,
    }
}

/// Build a mounted controller for the user collection. A failed initial
/// fetch is an error here, distinct from an empty collection.
pub(crate) async fn mounted(
    url: Option<String>,
) -> Result<ListController<Person, RestService>> {
    let service_url = config::resolve_service_url(url.as_deref())?;
    let service = RestService::new(service_url);

    let controller: ListController<Person, _> =
        ListController::with_notifier(service, output::notifier(ResourceKind::Person));
    controller.mount().await;

    if let LoadState::Failed(e) = controller.load_state() {
        return Err(e).context("Failed to fetch users");
    }

    Ok(controller)
}

/// Look up a user by id in the mounted collection.
pub(crate) fn find(
    controller: &ListController<Person, RestService>,
    id: &str,
) -> Result<Person> {
    let id = RecordId::new(id).context("Invalid record id")?;

    controller
        .rows()
        .into_iter()
        .find(|p| p.id == id)
        .with_context(|| format!("No user with id '{}'", id))
}
