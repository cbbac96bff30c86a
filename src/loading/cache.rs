//! Memoizing cache with single-flight initialization.
//!
//! Each key maps to a shared [`OnceCell`]. The map lock is only held long
//! enough to find or create the cell, so callers computing different keys
//! run in parallel while callers racing on the same key wait for the one
//! computation. A failed computation leaves the cell empty and the next
//! caller retries.

use std::hash::Hash;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

pub struct MemoCache<K, V> {
    cells: Mutex<FxHashMap<K, Arc<OnceCell<V>>>>,
}

impl<K, V> Default for MemoCache<K, V> {
    fn default() -> Self {
        Self {
            cells: Mutex::new(FxHashMap::default()),
        }
    }
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    fn cell(&self, key: &K) -> Arc<OnceCell<V>> {
        self.cells.lock().entry(key.clone()).or_default().clone()
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let cell = self.cells.lock().get(key).cloned()?;
        cell.get().cloned()
    }

    pub fn get_or_insert_with<F>(&self, key: &K, init: F) -> V
    where
        F: FnOnce() -> V,
    {
        self.cell(key).get_or_init(init).clone()
    }

    pub fn get_or_try_insert_with<F, E>(&self, key: &K, init: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        self.cell(key).get_or_try_init(init).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Number of keys with a computed value.
    pub fn len(&self) -> usize {
        self.cells
            .lock()
            .values()
            .filter(|cell| cell.get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cells.lock().clear();
    }
}
