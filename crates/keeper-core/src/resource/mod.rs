//! The resource abstraction: what a record kind must expose so the
//! generic engine can search, sort, validate, and mutate it.

mod animal;
mod person;

pub use animal::{Animal, AnimalDraft, AnimalField, AnimalFields, AnimalPatch, Species};
pub use person::{Gender, Person, PersonDraft, PersonField, PersonFields, PersonPatch};

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::FieldErrors;
use crate::types::RecordId;

/// The kinds of resource the service manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A person record.
    Person,
    /// An animal record.
    Animal,
}

impl ResourceKind {
    /// Human-readable label for notifications ("user added", ...).
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Person => "user",
            ResourceKind::Animal => "animal",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a draft is being submitted as a new record or an edit.
///
/// Some fields behave differently between the two; a person's `banned`
/// flag is never client-settable on create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    /// Creating a new record.
    Create,
    /// Editing an existing record.
    Edit,
}

/// A record kind known to the remote service.
///
/// Implementations supply an explicit field registry instead of dynamic
/// field access, keeping the search/sort engine generic without losing
/// type safety.
pub trait Resource: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Enum of this resource's columns, in display order.
    type Field: Copy + Eq + fmt::Debug + Send + Sync + 'static;

    /// Operator input as entered, before validation. Permissively typed;
    /// enum and numeric fields arrive as text.
    type Draft: Clone + Default + fmt::Debug + Send + Sync;

    /// Validated record-without-id payload, the body of a create call.
    type Fields: Serialize + fmt::Debug + Send + Sync;

    /// Partial update payload; unset fields are omitted from the wire.
    type Patch: Serialize + fmt::Debug + Send + Sync;

    /// The resource kind tag.
    const KIND: ResourceKind;

    /// Base path on the remote service, e.g. `/users`.
    const BASE_PATH: &'static str;

    /// The server-assigned id.
    fn id(&self) -> &RecordId;

    /// All fields, in display order. This is the searchable-field
    /// registry: filtering matches against every entry.
    fn fields() -> &'static [Self::Field];

    /// Stable lowercase name of a field, for sort parsing and headers.
    fn field_name(field: Self::Field) -> &'static str;

    /// Canonical string form of one field of this record.
    fn field_text(&self, field: Self::Field) -> String;

    /// Numeric value of a field, when the field is numeric.
    ///
    /// Numeric fields compare numerically when sorting; everything else
    /// falls back to string comparison.
    fn field_number(&self, field: Self::Field) -> Option<f64>;

    /// Pre-populate a draft from this record, for edit mode.
    fn draft(&self) -> Self::Draft;

    /// Validate a draft into a create/update payload.
    ///
    /// Collects all field errors. Runs before any network call; on
    /// failure the caller must not contact the service.
    fn validate(draft: &Self::Draft, mode: SubmitMode) -> Result<Self::Fields, FieldErrors>;

    /// Turn validated fields into a full patch, for edit submits.
    fn patch_from(fields: Self::Fields) -> Self::Patch;

    /// Parse a field by its stable name, for CLI/query parsing.
    fn field_by_name(name: &str) -> Option<Self::Field> {
        Self::fields()
            .iter()
            .copied()
            .find(|&f| Self::field_name(f) == name)
    }
}
