//! Error types for the cache engine
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache engine.
///
/// Only validation failures are surfaced as errors. Absence is modeled as
/// `Option`/`bool` return values, and rate shedding degrades to a silent
/// no-op or a miss so cache failures are never fatal to callers.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Malformed cache key (empty or over the length limit)
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Malformed TTL (zero or over the maximum)
    #[error("Invalid TTL: {0}")]
    InvalidTtl(String),

    /// Malformed owning-module name
    #[error("Invalid module name: {0}")]
    InvalidModule(String),

    /// A single value whose estimated size exceeds the entire memory ceiling
    #[error("Value too large: {size} bytes exceeds memory ceiling of {ceiling} bytes")]
    ValueTooLarge { size: usize, ceiling: usize },
}

// == Result Type Alias ==
/// Convenience Result type for the cache engine.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CacheError::InvalidKey("key must not be empty".to_string());
        assert!(err.to_string().contains("Invalid key"));

        let err = CacheError::ValueTooLarge {
            size: 2048,
            ceiling: 1024,
        };
        assert!(err.to_string().contains("2048"));
        assert!(err.to_string().contains("1024"));
    }
}
