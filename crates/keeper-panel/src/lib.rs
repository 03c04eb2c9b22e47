//! keeper-panel - Entity list controllers for the keeper record-admin toolkit.
//!
//! Wraps any [`keeper_core::traits::ResourceClient`] in a
//! [`ListController`]: a versioned collection cache, a pure query layer
//! over it, per-row in-flight tracking, and mutation orchestration that
//! refetches after every change instead of patching rows locally.

pub mod cache;
pub mod controller;
pub mod inflight;
mod mutation;

pub use cache::CollectionCache;
pub use controller::{ListController, LoadState, ModalState};
pub use inflight::{InFlightGuard, InFlightSet};
