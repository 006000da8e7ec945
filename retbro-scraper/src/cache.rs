use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use retbro_core::MetadataRecord;

/// Session-scoped metadata store keyed by display name.
///
/// Records are shared behind `Arc`, so a hit hands back the very record that
/// was stored.
#[derive(Debug, Default)]
pub struct MetadataCache {
    entries: Mutex<HashMap<String, Arc<MetadataRecord>>>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Arc<MetadataRecord>>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get(&self, display_name: &str) -> Option<Arc<MetadataRecord>> {
        self.entries().get(display_name).cloned()
    }

    /// Store a record. An existing entry for the same name is kept and
    /// returned instead, so concurrent fetches of one title agree.
    pub fn insert(&self, display_name: &str, record: Arc<MetadataRecord>) -> Arc<MetadataRecord> {
        self.entries()
            .entry(display_name.to_string())
            .or_insert(record)
            .clone()
    }

    pub fn clear(&self) {
        self.entries().clear();
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}
