//! Depcache - a memory-bounded in-memory cache engine
//!
//! Provides TTL expiration, LRU eviction under memory pressure, sliding-window
//! rate limiting, and a module-dependency index for scoped invalidation.

pub mod cache;
pub mod config;
pub mod error;
pub mod metrics;
pub mod registry;
pub mod tasks;

pub use cache::{CacheEngine, CacheStats, EntryMetadata};
pub use config::Config;
pub use error::{CacheError, Result};
pub use metrics::{InMemoryMetrics, MetricsSink, NoopMetrics};
pub use registry::{shared, shared_with, InstanceRegistry, LocalRegistry};
pub use tasks::spawn_cleanup_task;
