// Series registry - set-once store of derived series with change notification
use super::series::Series;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{watch, RwLock};

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("series '{key}' is already registered")]
    AlreadyRegistered { key: String },
}

/// Snapshot of the registry handed to readers. Keys missing here simply have not resolved yet.
pub type RegistrySnapshot = BTreeMap<String, Arc<Series>>;

/// Named collection of every derived series.
///
/// Each key is written at most once per run. Writers hold disjoint key sets, so the lock only
/// guards the map itself; readers get cheap `Arc` clones and never observe a half-applied batch.
#[derive(Debug)]
pub struct SeriesRegistry {
    series: RwLock<RegistrySnapshot>,
    revision: watch::Sender<u64>,
}

impl Default for SeriesRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesRegistry {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            series: RwLock::new(BTreeMap::new()),
            revision,
        }
    }

    pub async fn register(&self, key: impl Into<String>, series: Series) -> Result<(), RegistryError> {
        self.register_batch(vec![(key.into(), series)]).await
    }

    /// Insert every entry or none of them.
    pub async fn register_batch(&self, batch: Vec<(String, Series)>) -> Result<(), RegistryError> {
        let mut series = self.series.write().await;

        let mut seen = HashSet::new();
        for (key, _) in &batch {
            if series.contains_key(key) || !seen.insert(key.as_str()) {
                return Err(RegistryError::AlreadyRegistered { key: key.clone() });
            }
        }

        for (key, value) in batch {
            series.insert(key, Arc::new(value));
        }
        // Bumped under the write lock so a snapshot and its revision always agree
        self.revision.send_modify(|rev| *rev += 1);
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Option<Arc<Series>> {
        self.series.read().await.get(key).cloned()
    }

    pub async fn get_all(&self) -> RegistrySnapshot {
        self.series.read().await.clone()
    }

    /// Contents together with the revision that produced them.
    pub async fn versioned_snapshot(&self) -> (u64, RegistrySnapshot) {
        let series = self.series.read().await;
        (*self.revision.borrow(), series.clone())
    }

    pub async fn keys(&self) -> Vec<String> {
        self.series.read().await.keys().cloned().collect()
    }

    /// Revision counter, bumped once per successful registration.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }
}
