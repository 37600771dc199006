//! Cache Module
//!
//! Provides a memory-bounded in-memory cache with TTL expiration, LRU
//! eviction, sliding-window rate limiting and module dependency tracking.

mod deps;
mod engine;
mod entry;
mod lru;
mod rate;
mod stats;
mod store;
pub mod validate;


// Re-export public types
pub use deps::DependencyIndex;
pub use engine::CacheEngine;
pub use entry::{estimated_size, CacheEntry, EntryMetadata};
pub use lru::RecencyTracker;
pub use rate::RateLimiter;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed module name length in bytes
pub const MAX_MODULE_LENGTH: usize = 128;

/// Maximum allowed TTL in seconds (one year)
pub const MAX_TTL_SECS: u64 = 365 * 24 * 60 * 60;
