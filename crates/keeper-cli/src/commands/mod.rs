//! Subcommand implementations.

pub mod animals;
pub mod connect;
pub mod users;

use anyhow::{Context, Result};

use keeper_core::error::Error;
use keeper_core::traits::ResourceClient;
use keeper_core::Resource;
use keeper_panel::ListController;

use crate::output;

/// Submit a draft through the controller, printing validation errors
/// inline (one red line per failing field) instead of calling the
/// service.
pub(crate) async fn submit_draft<R, C>(
    controller: &ListController<R, C>,
    draft: R::Draft,
) -> Result<()>
where
    R: Resource,
    C: ResourceClient<R>,
{
    match controller.submit(draft).await {
        Ok(()) => Ok(()),
        Err(Error::Validation(errors)) => {
            output::field_errors(&errors);
            anyhow::bail!("Validation failed");
        }
        Err(e) => Err(e).context("Request failed"),
    }
}
