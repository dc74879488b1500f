//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (wall clock in milliseconds)
//! - Storage (LocalStorage on web, in-memory elsewhere)

pub mod storage;
pub mod time;

pub use storage::{KeyValueStore, MemoryStore, default_store};
pub use time::now_ms;
