//! keeper-mem - In-memory resource service.

mod service;

pub use service::MemoryService;
