//! Configuration Module
//!
//! Handles loading and managing cache engine configuration from environment variables.

use std::env;

/// Cache engine configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Memory ceiling in bytes for aggregate entry size
    pub max_memory_bytes: usize,
    /// Default TTL in seconds for entries without explicit TTL
    pub default_ttl: u64,
    /// Rate limiter window duration in milliseconds
    pub rate_limit_window_ms: u64,
    /// Maximum gated operations per rate limiter window
    pub rate_limit_max_ops: u64,
    /// Background expiry sweep interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_MEMORY_BYTES` - Memory ceiling in bytes (default: 104857600 = 100 MiB)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `RATE_LIMIT_WINDOW_MS` - Rate limiter window in milliseconds (default: 1000)
    /// - `RATE_LIMIT_MAX_OPS` - Max operations per window (default: 1000)
    /// - `CLEANUP_INTERVAL` - Expiry sweep frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        Self {
            max_memory_bytes: env::var("MAX_MEMORY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100 * 1024 * 1024),
            default_ttl: env::var("DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            rate_limit_window_ms: env::var("RATE_LIMIT_WINDOW_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            rate_limit_max_ops: env::var("RATE_LIMIT_MAX_OPS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_memory_bytes: 100 * 1024 * 1024,
            default_ttl: 300,
            rate_limit_window_ms: 1000,
            rate_limit_max_ops: 1000,
            cleanup_interval: 1,
        }
    }
}
