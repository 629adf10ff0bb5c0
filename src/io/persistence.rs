//! Durable storage of answered status
//!
//! Answers are keyed by dataset id, then by stable point id, so multiple
//! catalogs never collide and reordering a catalog never corrupts saved
//! state. Writes are synchronous and best-effort: a failure degrades to
//! "unsaved", it never fails the submission that triggered it.

use crate::domain::types::PointId;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, error, warn};

pub trait PersistenceAdapter: Send {
    /// Saved id -> correct mapping for a dataset; empty when nothing saved
    fn load(&self, dataset_id: &str) -> HashMap<PointId, bool>;

    /// Replace the saved mapping for a dataset; false on write failure
    fn save(&mut self, dataset_id: &str, answers: &HashMap<PointId, bool>) -> bool;
}

type DatasetMap = HashMap<String, HashMap<PointId, bool>>;

/// JSON-file-backed adapter: `{ "<dataset>": { "<point_id>": <correct> } }`
pub struct FilePersistence {
    file_path: String,
}

impl FilePersistence {
    pub fn new(file_path: &str) -> Self {
        Self { file_path: file_path.to_string() }
    }

    fn read_all(&self) -> DatasetMap {
        let path = Path::new(&self.file_path);
        if !path.exists() {
            return DatasetMap::new();
        }
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(map) => map,
                Err(e) => {
                    warn!(file = %self.file_path, error = %e, "persistence_file_unreadable");
                    DatasetMap::new()
                }
            },
            Err(e) => {
                warn!(file = %self.file_path, error = %e, "persistence_file_unreadable");
                DatasetMap::new()
            }
        }
    }

    fn write_all(&self, map: &DatasetMap) -> std::io::Result<()> {
        let path = Path::new(&self.file_path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(map).map_err(std::io::Error::other)?;
        fs::write(path, json)
    }
}

impl PersistenceAdapter for FilePersistence {
    fn load(&self, dataset_id: &str) -> HashMap<PointId, bool> {
        let loaded = self.read_all().remove(dataset_id).unwrap_or_default();
        debug!(dataset = %dataset_id, entries = %loaded.len(), "answers_restored");
        loaded
    }

    fn save(&mut self, dataset_id: &str, answers: &HashMap<PointId, bool>) -> bool {
        let mut all = self.read_all();
        all.insert(dataset_id.to_string(), answers.clone());

        match self.write_all(&all) {
            Ok(()) => {
                debug!(dataset = %dataset_id, entries = %answers.len(), "answers_saved");
                true
            }
            Err(e) => {
                error!(dataset = %dataset_id, file = %self.file_path, error = %e, "answers_save_failed");
                false
            }
        }
    }
}

/// In-memory adapter for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    datasets: DatasetMap,
    /// When set, every save reports failure (exercises the degraded path)
    pub fail_saves: bool,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceAdapter for MemoryPersistence {
    fn load(&self, dataset_id: &str) -> HashMap<PointId, bool> {
        self.datasets.get(dataset_id).cloned().unwrap_or_default()
    }

    fn save(&mut self, dataset_id: &str, answers: &HashMap<PointId, bool>) -> bool {
        if self.fail_saves {
            return false;
        }
        self.datasets.insert(dataset_id.to_string(), answers.clone());
        true
    }
}
