//! keeper-core - Core types and traits for the keeper record-admin toolkit.

pub mod error;
pub mod outcome;
pub mod query;
pub mod resource;
pub mod traits;
pub mod types;

pub use error::{Error, FieldError, FieldErrors, Issue, RemoteError, TransportError};
pub use outcome::{ActionKind, ActionOutcome};
pub use query::{derive, QueryState};
pub use resource::{
    Animal, AnimalDraft, AnimalField, AnimalFields, AnimalPatch, Gender, Person, PersonDraft,
    PersonField, PersonFields, PersonPatch, Resource, ResourceKind, Species, SubmitMode,
};
pub use traits::{BanControl, ResourceClient};
pub use types::{RecordId, ServiceUrl};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
