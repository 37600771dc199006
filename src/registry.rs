//! Instance Registry Module
//!
//! Process-wide singleton lifecycle for the cache engine. Hosts that carry
//! their own instance registry plug it in through [`InstanceRegistry`];
//! everyone else gets the static fallback, so a caller can never fail to
//! obtain a usable cache.

use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crate::cache::CacheEngine;
use crate::config::Config;

// == Instance Registry Trait ==
/// Get-or-register-singleton semantics provided by the host.
pub trait InstanceRegistry: Send + Sync {
    /// Returns the registered engine, if any.
    fn lookup(&self) -> Option<Arc<CacheEngine>>;

    /// Registers an engine. Later lookups should return it.
    fn register(&self, engine: Arc<CacheEngine>);
}

// == Local Registry ==
/// A minimal in-process registry backed by a mutex slot. Useful for hosts
/// without a registry of their own and for tests.
#[derive(Default)]
pub struct LocalRegistry {
    slot: Mutex<Option<Arc<CacheEngine>>>,
}

impl LocalRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }
}

impl InstanceRegistry for LocalRegistry {
    fn lookup(&self) -> Option<Arc<CacheEngine>> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn register(&self, engine: Arc<CacheEngine>) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(engine);
    }
}

// Static fallback instance, created lazily from environment configuration.
static FALLBACK: OnceLock<Arc<CacheEngine>> = OnceLock::new();

// == Shared ==
/// Returns the process-wide cache engine, creating it on first use.
///
/// Every call returns the same instance; `reset()` reinitializes its state
/// in place without changing its identity.
pub fn shared() -> Arc<CacheEngine> {
    Arc::clone(FALLBACK.get_or_init(|| Arc::new(CacheEngine::new(Config::from_env()))))
}

// == Shared With ==
/// Returns the singleton through a host-provided registry, falling back to
/// the static instance (and registering it) when the registry is empty.
pub fn shared_with(registry: &dyn InstanceRegistry) -> Arc<CacheEngine> {
    if let Some(engine) = registry.lookup() {
        return engine;
    }
    let engine = shared();
    registry.register(Arc::clone(&engine));
    engine
}
