//! Remote resource client traits.

use async_trait::async_trait;

use crate::resource::{Person, PersonPatch, Resource};
use crate::types::RecordId;
use crate::Result;

/// CRUD access to one resource kind on a remote service.
///
/// All operations fail with a typed error on non-success responses or
/// transport failure; no operation silently swallows a failure.
#[async_trait]
pub trait ResourceClient<R: Resource>: Send + Sync {
    /// Fetch the whole collection.
    async fn list(&self) -> Result<Vec<R>>;

    /// Create a record from validated fields. The service assigns the id
    /// and returns the canonical record.
    async fn create(&self, fields: &R::Fields) -> Result<R>;

    /// Apply a partial update; only supplied fields change. Returns the
    /// canonical record after the update.
    async fn update(&self, id: &RecordId, patch: &R::Patch) -> Result<R>;

    /// Delete a record.
    async fn delete(&self, id: &RecordId) -> Result<()>;
}

/// Ban management for person records.
#[async_trait]
pub trait BanControl: ResourceClient<Person> {
    /// Set the banned flag, implemented as a partial update of `banned`.
    async fn set_banned(&self, id: &RecordId, banned: bool) -> Result<Person> {
        self.update(id, &PersonPatch::set_banned(banned)).await
    }
}
