//! Core keeper types.
//!
//! These types enforce invariants at construction time,
//! ensuring invalid states are unrepresentable.

mod record_id;
mod service_url;

pub use record_id::RecordId;
pub use service_url::ServiceUrl;
