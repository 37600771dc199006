//! Validation Module
//!
//! Well-formedness checks for keys, TTLs and module names. The engine calls
//! these before any mutation so a malformed `set` fails fast with no partial
//! state change.

use crate::cache::{MAX_KEY_LENGTH, MAX_MODULE_LENGTH, MAX_TTL_SECS};
use crate::error::{CacheError, Result};

// == Validate Key ==
/// Checks that a key is non-empty and within the length limit.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidKey("key must not be empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidKey(format!(
            "key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(())
}

// == Validate TTL ==
/// Checks that a TTL is positive and within the maximum.
pub fn validate_ttl(ttl_secs: u64) -> Result<()> {
    if ttl_secs == 0 {
        return Err(CacheError::InvalidTtl("TTL must be positive".to_string()));
    }
    if ttl_secs > MAX_TTL_SECS {
        return Err(CacheError::InvalidTtl(format!(
            "TTL exceeds maximum of {} seconds",
            MAX_TTL_SECS
        )));
    }
    Ok(())
}

// == Validate Module ==
/// Checks that a module name is non-empty and within the length limit.
pub fn validate_module(module: &str) -> Result<()> {
    if module.is_empty() {
        return Err(CacheError::InvalidModule(
            "module name must not be empty".to_string(),
        ));
    }
    if module.len() > MAX_MODULE_LENGTH {
        return Err(CacheError::InvalidModule(format!(
            "module name exceeds maximum length of {} bytes",
            MAX_MODULE_LENGTH
        )));
    }
    Ok(())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_key() {
        assert!(validate_key("user:42").is_ok());
        assert!(validate_key(&"x".repeat(MAX_KEY_LENGTH)).is_ok());
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(validate_key(""), Err(CacheError::InvalidKey(_))));
    }

    #[test]
    fn test_oversized_key_rejected() {
        let key = "x".repeat(MAX_KEY_LENGTH + 1);
        assert!(matches!(validate_key(&key), Err(CacheError::InvalidKey(_))));
    }

    #[test]
    fn test_valid_ttl() {
        assert!(validate_ttl(1).is_ok());
        assert!(validate_ttl(300).is_ok());
        assert!(validate_ttl(MAX_TTL_SECS).is_ok());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        assert!(matches!(validate_ttl(0), Err(CacheError::InvalidTtl(_))));
    }

    #[test]
    fn test_oversized_ttl_rejected() {
        assert!(matches!(
            validate_ttl(MAX_TTL_SECS + 1),
            Err(CacheError::InvalidTtl(_))
        ));
    }

    #[test]
    fn test_valid_module() {
        assert!(validate_module("auth").is_ok());
    }

    #[test]
    fn test_empty_module_rejected() {
        assert!(matches!(
            validate_module(""),
            Err(CacheError::InvalidModule(_))
        ));
    }

    #[test]
    fn test_oversized_module_rejected() {
        let module = "m".repeat(MAX_MODULE_LENGTH + 1);
        assert!(matches!(
            validate_module(&module),
            Err(CacheError::InvalidModule(_))
        ));
    }
}
