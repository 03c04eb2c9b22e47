//! End-to-end controller tests against the in-memory service.
//!
//! These exercise the full mutation path: draft validation, in-flight
//! claiming, the remote call, cache invalidation and refetch, and the
//! single notification per settled mutation.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use keeper_core::error::TransportError;
use keeper_core::traits::{BanControl, ResourceClient};
use keeper_core::{
    ActionKind, ActionOutcome, Animal, AnimalDraft, AnimalField, AnimalFields, Error, Gender,
    Issue, Person, PersonDraft, PersonField, PersonFields, PersonPatch, RecordId, Resource, Result,
    Species,
};
use keeper_mem::MemoryService;
use keeper_panel::{ListController, LoadState, ModalState};

fn person_fields(name: &str, banned: bool) -> PersonFields {
    PersonFields {
        name: name.to_string(),
        gender: Gender::Other,
        banned,
    }
}

/// A notifier that records every outcome it hears.
fn recorder() -> (
    Arc<Mutex<Vec<ActionOutcome>>>,
    impl Fn(ActionOutcome) + Send + Sync + 'static,
) {
    let outcomes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&outcomes);
    (outcomes, move |outcome| sink.lock().unwrap().push(outcome))
}

fn transport_down() -> Error {
    Error::Transport(TransportError::Connection {
        message: "connection refused".to_string(),
    })
}

/// Delegates to a [`MemoryService`] but fails the named operations with
/// a transport error.
#[derive(Clone)]
struct Flaky {
    inner: MemoryService,
    failing: Arc<HashSet<&'static str>>,
}

impl Flaky {
    fn new(inner: MemoryService, failing: &[&'static str]) -> Self {
        Self {
            inner,
            failing: Arc::new(failing.iter().copied().collect()),
        }
    }

    fn check(&self, op: &'static str) -> Result<()> {
        if self.failing.contains(op) {
            return Err(transport_down());
        }
        Ok(())
    }
}

#[async_trait]
impl ResourceClient<Person> for Flaky {
    async fn list(&self) -> Result<Vec<Person>> {
        self.check("list")?;
        <MemoryService as ResourceClient<Person>>::list(&self.inner).await
    }

    async fn create(&self, fields: &PersonFields) -> Result<Person> {
        self.check("create")?;
        self.inner.create(fields).await
    }

    async fn update(&self, id: &RecordId, patch: &PersonPatch) -> Result<Person> {
        self.check("update")?;
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: &RecordId) -> Result<()> {
        self.check("delete")?;
        <MemoryService as ResourceClient<Person>>::delete(&self.inner, id).await
    }
}

#[async_trait]
impl BanControl for Flaky {
    async fn set_banned(&self, id: &RecordId, banned: bool) -> Result<Person> {
        self.check("set_banned")?;
        self.inner.set_banned(id, banned).await
    }
}

/// Delegates to a [`MemoryService`] but parks every `set_banned` call on
/// a semaphore until the test releases it, and counts the calls made.
#[derive(Clone)]
struct GatedBans {
    inner: MemoryService,
    gate: Arc<Semaphore>,
    calls: Arc<AtomicU32>,
}

#[async_trait]
impl ResourceClient<Person> for GatedBans {
    async fn list(&self) -> Result<Vec<Person>> {
        <MemoryService as ResourceClient<Person>>::list(&self.inner).await
    }

    async fn create(&self, fields: &PersonFields) -> Result<Person> {
        self.inner.create(fields).await
    }

    async fn update(&self, id: &RecordId, patch: &PersonPatch) -> Result<Person> {
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: &RecordId) -> Result<()> {
        <MemoryService as ResourceClient<Person>>::delete(&self.inner, id).await
    }
}

#[async_trait]
impl BanControl for GatedBans {
    async fn set_banned(&self, id: &RecordId, banned: bool) -> Result<Person> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let permit = self.gate.acquire().await.unwrap();
        permit.forget();
        self.inner.set_banned(id, banned).await
    }
}

// ============================================================================
// Load State Tests
// ============================================================================

#[tokio::test]
async fn test_mount_loads_rows() {
    let service = MemoryService::new();
    service.seed_person(person_fields("Alice", false));
    service.seed_person(person_fields("Bob", false));

    let controller: ListController<Person, _> = ListController::new(service);
    assert!(matches!(controller.load_state(), LoadState::Loading));

    controller.mount().await;

    assert!(controller.load_state().is_ready());
    assert_eq!(controller.rows().len(), 2);
}

#[tokio::test]
async fn test_mount_failure_is_terminal_and_distinct_from_empty() {
    let down = Flaky::new(MemoryService::new(), &["list"]);
    let controller: ListController<Person, _> = ListController::new(down);

    controller.mount().await;

    assert!(matches!(controller.load_state(), LoadState::Failed(_)));
    assert!(controller.rows().is_empty());

    // An empty collection, by contrast, is Ready.
    let empty: ListController<Person, _> = ListController::new(MemoryService::new());
    empty.mount().await;
    assert!(empty.load_state().is_ready());
}

// ============================================================================
// Create / Edit / Delete Tests
// ============================================================================

#[tokio::test]
async fn test_create_person_end_to_end() {
    let service = MemoryService::new();
    let (outcomes, notify) = recorder();
    let controller: ListController<Person, _> =
        ListController::with_notifier(service, notify);
    controller.mount().await;

    controller.open_add();
    let draft = PersonDraft {
        name: "Bob".to_string(),
        gender: "male".to_string(),
        // Ignored on create; new records are never pre-banned.
        banned: true,
    };
    controller.submit(draft).await.unwrap();

    assert_eq!(
        outcomes.lock().unwrap().as_slice(),
        &[ActionOutcome::succeeded(ActionKind::Added)]
    );
    assert_eq!(controller.modal(), ModalState::Closed);

    let rows = controller.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Bob");
    assert!(!rows[0].banned);
}

#[tokio::test]
async fn test_invalid_draft_never_reaches_the_service() {
    let service = MemoryService::new();
    let (outcomes, notify) = recorder();
    let controller: ListController<Animal, _> = ListController::with_notifier(service, notify);
    controller.mount().await;

    controller.open_add();
    let draft = AnimalDraft {
        name: "   ".to_string(),
        species: "dragon".to_string(),
        age: "2".to_string(),
    };
    let err = controller.submit(draft).await.unwrap_err();

    match err {
        Error::Validation(errors) => {
            assert_eq!(errors.for_field("name"), Some(&Issue::Required));
            assert!(matches!(
                errors.for_field("type"),
                Some(Issue::InvalidEnum { .. })
            ));
        }
        other => panic!("expected validation error, got {:?}", other),
    }

    // No notification, no record created, form still open.
    assert!(outcomes.lock().unwrap().is_empty());
    assert!(controller.rows().is_empty());
    assert_eq!(controller.modal(), ModalState::Adding);
}

#[tokio::test]
async fn test_edit_updates_record() {
    let service = MemoryService::new();
    let alice = service.seed_person(person_fields("Alice", false));
    let (outcomes, notify) = recorder();
    let controller: ListController<Person, _> = ListController::with_notifier(service, notify);
    controller.mount().await;

    controller.open_edit(alice.clone());
    let mut draft = alice.draft();
    draft.name = "Alicia".to_string();
    controller.submit(draft).await.unwrap();

    assert_eq!(
        outcomes.lock().unwrap().as_slice(),
        &[ActionOutcome::succeeded(ActionKind::Edited)]
    );
    assert_eq!(controller.modal(), ModalState::Closed);

    let rows = controller.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Alicia");
    assert_eq!(rows[0].id, alice.id);
}

#[tokio::test]
async fn test_edit_failure_keeps_the_form_open() {
    let service = MemoryService::new();
    let alice = service.seed_person(person_fields("Alice", false));
    let flaky = Flaky::new(service, &["update"]);
    let (outcomes, notify) = recorder();
    let controller: ListController<Person, _> = ListController::with_notifier(flaky, notify);
    controller.mount().await;

    controller.open_edit(alice.clone());
    let mut draft = alice.draft();
    draft.name = "Alicia".to_string();
    let err = controller.submit(draft).await.unwrap_err();

    assert!(err.is_remote());
    assert_eq!(
        outcomes.lock().unwrap().as_slice(),
        &[ActionOutcome::failed(ActionKind::Edited)]
    );
    // The form stays open for a retry and the in-flight slot is freed.
    assert_eq!(controller.modal(), ModalState::Editing(alice.clone()));
    assert!(controller.busy_ids().is_empty());
    assert_eq!(controller.rows()[0].name, "Alice");
}

#[tokio::test]
async fn test_remove_deletes_row_and_notifies_once() {
    let service = MemoryService::new();
    let alice = service.seed_person(person_fields("Alice", false));
    let bob = service.seed_person(person_fields("Bob", false));
    let (outcomes, notify) = recorder();
    let controller: ListController<Person, _> = ListController::with_notifier(service, notify);
    controller.mount().await;

    controller.remove(&alice.id).await.unwrap();

    assert_eq!(
        outcomes.lock().unwrap().as_slice(),
        &[ActionOutcome::succeeded(ActionKind::Deleted)]
    );
    let rows = controller.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, bob.id);
    assert!(controller.busy_ids().is_empty());
}

// ============================================================================
// Ban Toggle Tests
// ============================================================================

#[tokio::test]
async fn test_toggle_ban_round_trip() {
    let service = MemoryService::new();
    let alice = service.seed_person(person_fields("Alice", false));
    let (outcomes, notify) = recorder();
    let controller: ListController<Person, _> = ListController::with_notifier(service, notify);
    controller.mount().await;

    controller.toggle_ban(&alice.id, false).await.unwrap();
    assert!(controller.rows()[0].banned);

    controller.toggle_ban(&alice.id, true).await.unwrap();
    assert!(!controller.rows()[0].banned);

    assert_eq!(
        outcomes.lock().unwrap().as_slice(),
        &[
            ActionOutcome::succeeded(ActionKind::Banned),
            ActionOutcome::succeeded(ActionKind::Unbanned),
        ]
    );
}

#[tokio::test]
async fn test_same_record_rejected_while_toggle_in_flight() {
    let service = MemoryService::new();
    let alice = service.seed_person(person_fields("Alice", false));
    let bob = service.seed_person(person_fields("Bob", false));

    let gate = Arc::new(Semaphore::new(0));
    let calls = Arc::new(AtomicU32::new(0));
    let client = GatedBans {
        inner: service,
        gate: Arc::clone(&gate),
        calls: Arc::clone(&calls),
    };

    let (outcomes, notify) = recorder();
    let controller: Arc<ListController<Person, _>> =
        Arc::new(ListController::with_notifier(client, notify));
    controller.mount().await;

    let first = tokio::spawn({
        let controller = Arc::clone(&controller);
        let id = alice.id.clone();
        async move { controller.toggle_ban(&id, false).await }
    });
    while !controller.busy(&alice.id) {
        tokio::task::yield_now().await;
    }

    // A second toggle on the same record is rejected before any call.
    let err = controller.toggle_ban(&alice.id, false).await.unwrap_err();
    assert!(matches!(err, Error::ActionInFlight { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(outcomes.lock().unwrap().is_empty());

    // A toggle on a different record proceeds concurrently.
    let second = tokio::spawn({
        let controller = Arc::clone(&controller);
        let id = bob.id.clone();
        async move { controller.toggle_ban(&id, false).await }
    });
    while !controller.busy(&bob.id) {
        tokio::task::yield_now().await;
    }
    assert_eq!(controller.busy_ids().len(), 2);

    gate.add_permits(2);
    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();

    assert!(controller.busy_ids().is_empty());
    let outcomes = outcomes.lock().unwrap();
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.success));
    assert!(controller.rows().iter().all(|p| p.banned));
}

#[tokio::test]
async fn test_failed_toggle_frees_the_record_and_notifies() {
    let service = MemoryService::new();
    let alice = service.seed_person(person_fields("Alice", false));
    let flaky = Flaky::new(service, &["set_banned"]);
    let (outcomes, notify) = recorder();
    let controller: ListController<Person, _> = ListController::with_notifier(flaky, notify);
    controller.mount().await;

    let err = controller.toggle_ban(&alice.id, false).await.unwrap_err();

    assert!(err.is_remote());
    assert_eq!(
        outcomes.lock().unwrap().as_slice(),
        &[ActionOutcome::failed(ActionKind::Banned)]
    );
    assert!(controller.busy_ids().is_empty());
    assert!(!controller.rows()[0].banned);
}

// ============================================================================
// Query State Tests
// ============================================================================

#[tokio::test]
async fn test_search_filters_rows() {
    let service = MemoryService::new();
    service.seed_person(person_fields("Alice", false));
    service.seed_person(person_fields("Bob", false));
    let controller: ListController<Person, _> = ListController::new(service);
    controller.mount().await;

    controller.set_search("ALI");
    let rows = controller.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Alice");

    controller.clear_filters();
    assert_eq!(controller.rows().len(), 2);
}

#[tokio::test]
async fn test_set_sort_flips_direction_on_repeat() {
    let service = MemoryService::new();
    let controller: ListController<Person, _> = ListController::new(service);

    controller.set_sort(PersonField::Name);
    let query = controller.query();
    assert_eq!(query.sort_by, Some(PersonField::Name));
    assert!(!query.reversed);

    controller.set_sort(PersonField::Name);
    assert!(controller.query().reversed);

    // Switching columns resets the direction.
    controller.set_sort(PersonField::Gender);
    let query = controller.query();
    assert_eq!(query.sort_by, Some(PersonField::Gender));
    assert!(!query.reversed);
}

#[tokio::test]
async fn test_numeric_sort_on_animal_age() {
    let service = MemoryService::new();
    for (name, age) in [("Rex", 10), ("Tom", 2), ("Jerry", 9)] {
        service.seed_animal(AnimalFields {
            name: name.to_string(),
            species: Species::Other,
            age,
        });
    }
    let controller: ListController<Animal, _> = ListController::new(service);
    controller.mount().await;

    controller.set_sort(AnimalField::Age);
    let ages: Vec<u32> = controller.rows().iter().map(|a| a.age).collect();
    assert_eq!(ages, vec![2, 9, 10]);
}
