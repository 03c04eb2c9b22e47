//! Client-side collection cache.
//!
//! The cache is a snapshot, not a source of truth: it is stale the
//! moment any mutation settles and is only ever repopulated from a real
//! server read. Mutations never write rows into it directly.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::warn;

use keeper_core::Resource;

/// A versioned snapshot of one resource collection.
///
/// The generation counter orders reads against invalidations: a fetch
/// that started before a later invalidation is discarded on arrival, so
/// displayed rows are always traceable to a server read that no newer
/// mutation has outdated.
#[derive(Debug)]
pub struct CollectionCache<R> {
    rows: Vec<R>,
    generation: u64,
    fresh: bool,
    fetched_at: Option<DateTime<Utc>>,
}

impl<R> Default for CollectionCache<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            generation: 0,
            fresh: false,
            fetched_at: None,
        }
    }
}

impl<R: Resource> CollectionCache<R> {
    /// An empty, stale cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached snapshot.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// The current generation; bumped by every invalidation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the snapshot reflects a server read newer than any
    /// invalidation.
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    /// When the snapshot was last stored, for diagnostics.
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    /// Mark the snapshot stale and open a new generation.
    pub fn invalidate(&mut self) {
        self.fresh = false;
        self.generation += 1;
    }

    /// Store a server read that was started at `generation`.
    ///
    /// Returns `false` and discards the rows when a newer invalidation
    /// has happened since the read began (a late resolution).
    pub fn store(&mut self, rows: Vec<R>, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }

        self.rows = dedup_by_id(rows);
        self.fresh = true;
        self.fetched_at = Some(Utc::now());
        true
    }
}

/// Ids are never duplicated within a snapshot; if the server sends a
/// duplicate anyway, keep the first occurrence and warn.
fn dedup_by_id<R: Resource>(rows: Vec<R>) -> Vec<R> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(rows.len());

    for row in rows {
        if seen.insert(row.id().clone()) {
            out.push(row);
        } else {
            warn!(id = %row.id(), "Dropping duplicate id in server snapshot");
        }
    }

    out
}
