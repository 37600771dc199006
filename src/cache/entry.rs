//! Cache Entry Module
//!
//! Defines the structure for individual cache entries and their read-only
//! metadata snapshots.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::Value;

// == Cache Entry ==
/// Represents a single cache entry with value, access metadata and an
/// estimated size used for memory accounting.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value (opaque JSON payload)
    pub value: Value,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// TTL in seconds, always > 0
    pub ttl_secs: u64,
    /// Owning module that sourced this entry, if any
    pub module: Option<String>,
    /// Number of successful reads since creation
    pub access_count: u64,
    /// Timestamp of the most recent read (Unix milliseconds)
    pub last_access: u64,
    /// Estimated size in bytes, fixed at creation
    pub size_bytes: usize,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry. `size_bytes` is computed by the caller so
    /// the store can reject oversized values before constructing anything.
    pub fn new(value: Value, ttl_secs: u64, module: Option<String>, size_bytes: usize) -> Self {
        let now = current_timestamp_ms();
        Self {
            value,
            created_at: now,
            ttl_secs,
            module,
            access_count: 0,
            last_access: now,
            size_bytes,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired: age strictly greater than the TTL.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() > self.created_at + self.ttl_secs * 1000
    }

    // == Age ==
    /// Returns the entry age in whole seconds.
    pub fn age_secs(&self) -> u64 {
        current_timestamp_ms().saturating_sub(self.created_at) / 1000
    }

    // == Time To Live ==
    /// Returns remaining TTL in whole seconds, zero once expired.
    pub fn ttl_remaining_secs(&self) -> u64 {
        let expires_at = self.created_at + self.ttl_secs * 1000;
        expires_at.saturating_sub(current_timestamp_ms()) / 1000
    }

    // == Touch ==
    /// Records a successful read: bumps the access count and refreshes the
    /// last-access timestamp.
    pub fn touch(&mut self) {
        self.access_count += 1;
        self.last_access = current_timestamp_ms();
    }

    // == Metadata Snapshot ==
    /// Builds a read-only metadata snapshot without mutating the entry.
    pub fn metadata(&self) -> EntryMetadata {
        EntryMetadata {
            module: self.module.clone(),
            created_at: self.created_at,
            age_secs: self.age_secs(),
            ttl_secs: self.ttl_secs,
            ttl_remaining_secs: self.ttl_remaining_secs(),
            access_count: self.access_count,
            last_access: self.last_access,
            size_bytes: self.size_bytes,
            is_expired: self.is_expired(),
        }
    }
}

// == Entry Metadata ==
/// Side-effect-free introspection record for a cache entry.
///
/// Expiry is reported via the `is_expired` flag rather than enforced, so
/// metadata queries never remove entries.
#[derive(Debug, Clone, Serialize)]
pub struct EntryMetadata {
    /// Owning module that sourced the entry, if any
    pub module: Option<String>,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Age in whole seconds
    pub age_secs: u64,
    /// Configured TTL in seconds
    pub ttl_secs: u64,
    /// Remaining TTL in whole seconds, zero once expired
    pub ttl_remaining_secs: u64,
    /// Number of successful reads since creation
    pub access_count: u64,
    /// Timestamp of the most recent read (Unix milliseconds)
    pub last_access: u64,
    /// Estimated size in bytes
    pub size_bytes: usize,
    /// Whether the entry's age exceeds its TTL
    pub is_expired: bool,
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Estimates the memory footprint of an entry in bytes.
///
/// Exact accounting is not a goal; the serialized JSON length of the value
/// plus the key's UTF-8 length is a stable, portable approximation.
pub fn estimated_size(key: &str, value: &Value) -> usize {
    let value_len = serde_json::to_string(value).map(|s| s.len()).unwrap_or(0);
    key.len() + value_len
}
