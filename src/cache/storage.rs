//! Named cache generations.
//!
//! Storage is injected into [`MediaCache`](super::MediaCache) rather than
//! being process-global, so tests and embedders choose the backing store.

use super::http::{CacheKey, Response};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};

/// Key-value store of responses, partitioned into named generations.
///
/// Implementations must allow concurrent readers. Concurrent writes to the
/// same key resolve last-write-wins.
pub trait CacheStorage: Send + Sync {
    /// Create the named generation if it does not exist yet.
    fn open(&self, name: &str);

    /// Names of all existing generations.
    fn keys(&self) -> Vec<String>;

    fn has(&self, name: &str) -> bool;

    /// Drop a whole generation. Returns whether it existed.
    fn delete(&self, name: &str) -> bool;

    fn lookup(&self, name: &str, key: &CacheKey) -> Option<Response>;

    /// Store `response` under `key`, creating the generation if needed.
    fn put(&self, name: &str, key: CacheKey, response: Response);
}

type Generation = HashMap<CacheKey, Response>;

/// In-memory storage behind a single read-write lock.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    generations: RwLock<BTreeMap<String, Generation>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in a generation, 0 if it doesn't exist.
    pub fn entry_count(&self, name: &str) -> usize {
        self.generations.read().get(name).map_or(0, |g| g.len())
    }
}

impl CacheStorage for MemoryStorage {
    fn open(&self, name: &str) {
        if self.has(name) {
            return;
        }
        self.generations.write().entry(name.to_string()).or_default();
    }

    fn keys(&self) -> Vec<String> {
        self.generations.read().keys().cloned().collect()
    }

    fn has(&self, name: &str) -> bool {
        self.generations.read().contains_key(name)
    }

    fn delete(&self, name: &str) -> bool {
        self.generations.write().remove(name).is_some()
    }

    fn lookup(&self, name: &str, key: &CacheKey) -> Option<Response> {
        self.generations.read().get(name)?.get(key).cloned()
    }

    fn put(&self, name: &str, key: CacheKey, response: Response) {
        self.generations
            .write()
            .entry(name.to_string())
            .or_default()
            .insert(key, response);
    }
}
