//! Background Tasks Module
//!
//! Long-running maintenance tasks for hosts that embed the cache engine.

mod cleanup;

pub use cleanup::spawn_cleanup_task;
