//! Implements the `Store` trait in memory.
//!
//! Note: this is compiled even in the "production" version of this crate so that library users
//! can run the recorder and aggregator without touching the filesystem.

use crate::store::Store;
use crate::Result;
use anyhow::bail;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

/// An implementation of the `Store` trait that holds its values in a map. Reads and writes can be
/// made to fail on demand, which is how storage failures are exercised.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When `fail` is true, every subsequent `get_item` returns an error.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// When `fail` is true, every subsequent `set_item` returns an error and stores nothing.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Returns the raw value under `key` without going through the failure switches.
    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // The map is only touched by single insert and clone calls, so poisoning is ignored.
        self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            bail!("Simulated read failure for '{key}'");
        }
        Ok(self.get(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("Simulated write failure for '{key}'");
        }
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_set() {
        let store = MemoryStore::new();
        assert!(store.get_item("k").await.unwrap().is_none());
        store.set_item("k", "v").await.unwrap();
        assert_eq!(store.get_item("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_failure_switches() {
        let store = MemoryStore::new();
        store.set_item("k", "v").await.unwrap();
        store.fail_reads(true);
        store.fail_writes(true);
        assert!(store.get_item("k").await.is_err());
        assert!(store.set_item("k", "w").await.is_err());
        store.fail_reads(false);
        assert_eq!(store.get_item("k").await.unwrap().as_deref(), Some("v"));
    }
}
