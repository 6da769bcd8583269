/*!
 * In-memory document store.
 *
 * Holds raw records in a map so the merge workflow can run without a
 * cluster. Counts fetches so tests can check the store was consulted.
 */

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::StoreError;
use crate::store::DocumentStore;

/// Store backed by a map of raw records
#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// Records by id
    records: HashMap<String, Value>,
    /// Number of fetches served, including misses
    fetch_count: AtomicUsize,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, replacing any record with the same id
    pub fn with_record(mut self, id: impl Into<String>, record: Value) -> Self {
        self.records.insert(id.into(), record);
        self
    }

    /// Number of fetches served so far
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn fetch_record(&self, id: &str) -> Result<Value, StoreError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        self.records
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::DocumentNotFound(format!("document {}", id)))
    }
}
