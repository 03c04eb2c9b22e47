//! Core traits for remote resource clients.

mod client;

pub use client::{BanControl, ResourceClient};
