//! Rendered-view caching.

mod memory;

pub use memory::InMemoryViewCache;
