//! Mutation orchestration.
//!
//! Each mutation runs the same sequence: validate, claim the record's
//! in-flight slot, call the remote service, then invalidate and refetch
//! the cache. Validation failures return synchronously, before anything
//! touches the network. Nothing here applies a change to the cache
//! optimistically; rows only ever change through a fresh server read.

use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use keeper_core::error::Error;
use keeper_core::traits::{BanControl, ResourceClient};
use keeper_core::{ActionKind, Person, RecordId, Resource, Result, SubmitMode};

use crate::cache::CollectionCache;
use crate::inflight::{InFlightGuard, InFlightSet};

/// Sequences validation, the remote call, and cache invalidation for one
/// resource kind.
pub(crate) struct Mutator<R: Resource, C> {
    client: Arc<C>,
    cache: Arc<RwLock<CollectionCache<R>>>,
    inflight: InFlightSet,
}

impl<R: Resource, C: ResourceClient<R>> Mutator<R, C> {
    pub(crate) fn new(
        client: Arc<C>,
        cache: Arc<RwLock<CollectionCache<R>>>,
        inflight: InFlightSet,
    ) -> Self {
        Self {
            client,
            cache,
            inflight,
        }
    }

    /// Create or edit a record from an operator draft.
    ///
    /// `target` is the record being edited; `None` means create. Edits
    /// claim the target's in-flight slot so they serialize against any
    /// other mutation on the same record.
    pub(crate) async fn submit(
        &self,
        draft: &R::Draft,
        target: Option<&RecordId>,
    ) -> Result<ActionKind> {
        let mode = match target {
            Some(_) => SubmitMode::Edit,
            None => SubmitMode::Create,
        };

        // Fails synchronously; no network call is made for invalid input.
        let fields = R::validate(draft, mode)?;

        match target {
            None => {
                let record: R = self.client.create(&fields).await?;
                debug!(id = %record.id(), "Created record");
                self.settle().await;
                Ok(ActionKind::Added)
            }
            Some(id) => {
                let _guard = self.claim(id)?;
                self.client.update(id, &R::patch_from(fields)).await?;
                debug!(%id, "Updated record");
                self.settle().await;
                Ok(ActionKind::Edited)
            }
        }
    }

    /// Delete a record. The row is never removed client-side before the
    /// service confirms.
    pub(crate) async fn remove(&self, id: &RecordId) -> Result<ActionKind> {
        let _guard = self.claim(id)?;
        self.client.delete(id).await?;
        debug!(%id, "Deleted record");
        self.settle().await;
        Ok(ActionKind::Deleted)
    }

    /// Fetch the collection and store it, unless a newer invalidation
    /// made this read stale while it was in flight.
    pub(crate) async fn refetch(&self) -> Result<()> {
        let generation = self.cache.read().unwrap().generation();
        let rows = self.client.list().await?;

        let mut cache = self.cache.write().unwrap();
        if !cache.store(rows, generation) {
            debug!("Discarding refetch superseded by a newer invalidation");
        }
        Ok(())
    }

    fn claim(&self, id: &RecordId) -> Result<InFlightGuard> {
        self.inflight.begin(id).ok_or_else(|| {
            debug!(%id, "Rejecting mutation; another is in flight");
            Error::ActionInFlight { id: id.clone() }
        })
    }

    /// Invalidate and refetch after a successful mutation. A failed
    /// refetch leaves the cache stale; the mutation itself still
    /// succeeded and is reported as such.
    async fn settle(&self) {
        self.cache.write().unwrap().invalidate();
        if let Err(e) = self.refetch().await {
            warn!(error = %e, "Refetch after mutation failed; cache stays stale");
        }
    }
}

impl<C: BanControl> Mutator<Person, C> {
    /// Flip a person's banned flag.
    ///
    /// The in-flight slot is claimed before the call is issued and
    /// released when the guard drops, on success and failure alike. On
    /// failure the flag is untouched client-side; the cache still
    /// reflects the pre-toggle state once refetched.
    pub(crate) async fn toggle_ban(
        &self,
        id: &RecordId,
        currently_banned: bool,
    ) -> Result<ActionKind> {
        let intended = if currently_banned {
            ActionKind::Unbanned
        } else {
            ActionKind::Banned
        };

        let _guard = self.claim(id)?;
        self.client.set_banned(id, !currently_banned).await?;
        debug!(%id, banned = !currently_banned, "Toggled ban");
        self.settle().await;
        Ok(intended)
    }
}
