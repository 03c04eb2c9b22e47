//! The generic entity list controller.
//!
//! Composes the cache, the query engine, and the mutation orchestrator
//! into one resource-agnostic front end: callers mount it, read derived
//! rows, and drive mutations; a notifier callback hears exactly one
//! outcome per settled mutation.

use std::sync::{Arc, Mutex, RwLock};

use tracing::{instrument, warn};

use keeper_core::error::Error;
use keeper_core::traits::{BanControl, ResourceClient};
use keeper_core::{ActionKind, ActionOutcome, derive, Person, QueryState, RecordId, Resource, Result};

use crate::cache::CollectionCache;
use crate::inflight::InFlightSet;
use crate::mutation::Mutator;

/// Which modal, if any, is open. Only one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalState<R> {
    Closed,
    /// The add form is open with kind-specific defaults.
    Adding,
    /// The edit form is open, pre-populated from this record.
    Editing(R),
}

/// The controller's fetch lifecycle.
#[derive(Debug, Clone)]
pub enum LoadState {
    /// Initial fetch pending; no rows to show yet.
    Loading,
    /// A server read landed; rows (possibly zero of them) are showable.
    Ready,
    /// The initial fetch failed. Terminal, distinct from an empty
    /// collection; there is no automatic retry.
    Failed(Error),
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready)
    }
}

type Notifier = Box<dyn Fn(ActionOutcome) + Send + Sync>;

/// A list controller for one resource kind backed by one client.
///
/// Methods take `&self`; internal locks are short-lived and never held
/// across an await, so mutations on distinct records genuinely overlap.
pub struct ListController<R: Resource, C> {
    mutator: Mutator<R, C>,
    cache: Arc<RwLock<CollectionCache<R>>>,
    inflight: InFlightSet,
    view: Mutex<ViewState<R>>,
    notify: Notifier,
}

struct ViewState<R: Resource> {
    query: QueryState<R::Field>,
    modal: ModalState<R>,
    load: LoadState,
}

impl<R: Resource, C: ResourceClient<R>> ListController<R, C> {
    /// Create a controller with no notifier.
    pub fn new(client: C) -> Self {
        Self::with_notifier(client, |_| {})
    }

    /// Create a controller that reports settled outcomes to `notify`.
    ///
    /// The notifier is called exactly once per settled mutation; never
    /// for read-only operations, validation failures, or same-record
    /// rejections.
    pub fn with_notifier(
        client: C,
        notify: impl Fn(ActionOutcome) + Send + Sync + 'static,
    ) -> Self {
        let cache = Arc::new(RwLock::new(CollectionCache::new()));
        let inflight = InFlightSet::new();

        Self {
            mutator: Mutator::new(Arc::new(client), Arc::clone(&cache), inflight.clone()),
            cache,
            inflight,
            view: Mutex::new(ViewState {
                query: QueryState::default(),
                modal: ModalState::Closed,
                load: LoadState::Loading,
            }),
            notify: Box::new(notify),
        }
    }

    /// Run the initial fetch. Until this settles the controller reports
    /// [`LoadState::Loading`]; a failure is terminal.
    #[instrument(skip(self), fields(kind = %R::KIND))]
    pub async fn mount(&self) {
        self.view.lock().unwrap().load = LoadState::Loading;

        match self.mutator.refetch().await {
            Ok(()) => {
                self.view.lock().unwrap().load = LoadState::Ready;
            }
            Err(e) => {
                warn!(error = %e, "Initial fetch failed");
                self.view.lock().unwrap().load = LoadState::Failed(e);
            }
        }
    }

    /// The current fetch lifecycle state.
    pub fn load_state(&self) -> LoadState {
        self.view.lock().unwrap().load.clone()
    }

    /// Derive the display rows from the cached snapshot and the current
    /// query. Synchronous; no network round-trip.
    pub fn rows(&self) -> Vec<R> {
        let query = self.view.lock().unwrap().query.clone();
        let cache = self.cache.read().unwrap();
        derive(cache.rows(), &query)
    }

    /// The current query state.
    pub fn query(&self) -> QueryState<R::Field> {
        self.view.lock().unwrap().query.clone()
    }

    /// Set the free-text search.
    pub fn set_search(&self, text: impl Into<String>) {
        self.view.lock().unwrap().query.search = text.into();
    }

    /// Activate a sort column. Selecting the already-active column flips
    /// the direction; a new column starts unreversed.
    pub fn set_sort(&self, field: R::Field) {
        let mut view = self.view.lock().unwrap();
        if view.query.sort_by == Some(field) {
            view.query.reversed = !view.query.reversed;
        } else {
            view.query.sort_by = Some(field);
            view.query.reversed = false;
        }
    }

    /// Reset the query to its defaults.
    pub fn clear_filters(&self) {
        self.view.lock().unwrap().query = QueryState::default();
    }

    /// Open the add form.
    pub fn open_add(&self) {
        self.view.lock().unwrap().modal = ModalState::Adding;
    }

    /// Open the edit form for a record.
    pub fn open_edit(&self, record: R) {
        self.view.lock().unwrap().modal = ModalState::Editing(record);
    }

    /// Close any open form.
    pub fn close_modal(&self) {
        self.view.lock().unwrap().modal = ModalState::Closed;
    }

    /// The current modal state.
    pub fn modal(&self) -> ModalState<R> {
        self.view.lock().unwrap().modal.clone()
    }

    /// Whether a mutation on this record is in flight (per-row loading
    /// indicator).
    pub fn busy(&self, id: &RecordId) -> bool {
        self.inflight.contains(id)
    }

    /// All records with a mutation in flight.
    pub fn busy_ids(&self) -> Vec<RecordId> {
        self.inflight.ids()
    }

    /// Submit the open form. Add or edit is chosen by the modal state:
    /// an open edit form targets its record, anything else creates.
    ///
    /// On success the notifier hears the outcome and the form closes.
    /// On a remote failure the notifier hears a failure outcome and the
    /// form stays open so the same values can be retried; the error is
    /// returned for inline display. Validation failures return the field
    /// errors without any network call or notification.
    pub async fn submit(&self, draft: R::Draft) -> Result<()> {
        let target = {
            let view = self.view.lock().unwrap();
            match &view.modal {
                ModalState::Editing(record) => Some(record.id().clone()),
                _ => None,
            }
        };
        let intended = match target {
            Some(_) => ActionKind::Edited,
            None => ActionKind::Added,
        };

        self.finish(intended, self.mutator.submit(&draft, target.as_ref()).await)
    }

    /// Delete a record. The row stays until the service confirms and the
    /// refetch lands.
    pub async fn remove(&self, id: &RecordId) -> Result<()> {
        self.finish(ActionKind::Deleted, self.mutator.remove(id).await)
    }

    /// Report the settled result, close the form on success, and keep
    /// local rejections silent.
    fn finish(&self, intended: ActionKind, result: Result<ActionKind>) -> Result<()> {
        match result {
            Ok(kind) => {
                (self.notify)(ActionOutcome::succeeded(kind));
                self.close_modal();
                Ok(())
            }
            Err(err) => {
                if err.is_remote() {
                    (self.notify)(ActionOutcome::failed(intended));
                }
                Err(err)
            }
        }
    }
}

impl<C: BanControl> ListController<Person, C> {
    /// Toggle a person's banned flag.
    ///
    /// A toggle already in flight for the same record rejects this one
    /// silently (no notification, no remote call); toggles on different
    /// records proceed concurrently.
    pub async fn toggle_ban(&self, id: &RecordId, currently_banned: bool) -> Result<()> {
        let intended = if currently_banned {
            ActionKind::Unbanned
        } else {
            ActionKind::Banned
        };

        self.finish(intended, self.mutator.toggle_ban(id, currently_banned).await)
    }
}
