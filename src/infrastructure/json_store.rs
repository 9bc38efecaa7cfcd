// src/infrastructure/json_store.rs
use crate::infrastructure::error::{InfrastructureError, InfrastructureResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tempfile::NamedTempFile;
use tracing::{debug, instrument, trace};

/// Envelope version written alongside the state
pub const STORE_VERSION: u64 = 0;

/// A list of records persisted as one JSON document.
///
/// On disk: `{"state": {"<field>": [...]}, "version": 0}`. A missing file is an empty
/// store. Every mutation rewrites the whole file through a temp file and rename.
#[derive(Debug)]
pub struct JsonStore<T> {
    path: PathBuf,
    field: &'static str,
    items: RwLock<Vec<T>>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    #[instrument(level = "debug")]
    pub fn open(path: PathBuf, field: &'static str) -> InfrastructureResult<Self> {
        let items = Self::load(&path, field)?;
        debug!("Loaded {} records from {:?}", items.len(), path);
        Ok(Self {
            path,
            field,
            items: RwLock::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path, field: &str) -> InfrastructureResult<Vec<T>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(path).map_err(|e| {
            InfrastructureError::FileSystem(format!("Failed to read {}: {}", path.display(), e))
        })?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut document: Value = serde_json::from_str(&text).map_err(|e| {
            InfrastructureError::Serialization(format!(
                "Failed to parse {}: {}",
                path.display(),
                e
            ))
        })?;

        match document.pointer_mut(&format!("/state/{}", field)).map(Value::take) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(records) => serde_json::from_value(records).map_err(|e| {
                InfrastructureError::Serialization(format!(
                    "Invalid '{}' records in {}: {}",
                    field,
                    path.display(),
                    e
                ))
            }),
        }
    }

    fn save(&self, items: &[T]) -> InfrastructureResult<()> {
        let records = serde_json::to_value(items)
            .map_err(|e| InfrastructureError::Serialization(e.to_string()))?;
        let mut state = Map::new();
        state.insert(self.field.to_string(), records);
        let document = json!({
            "state": state,
            "version": STORE_VERSION,
        });
        let text = serde_json::to_string_pretty(&document)
            .map_err(|e| InfrastructureError::Serialization(e.to_string()))?;

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| {
            InfrastructureError::FileSystem(format!("Failed to create {}: {}", dir.display(), e))
        })?;

        let mut tmp = NamedTempFile::new_in(&dir)
            .map_err(|e| InfrastructureError::FileSystem(e.to_string()))?;
        tmp.write_all(text.as_bytes())
            .and_then(|_| tmp.flush())
            .map_err(|e| InfrastructureError::FileSystem(e.to_string()))?;
        tmp.persist(&self.path).map_err(|e| {
            InfrastructureError::FileSystem(format!(
                "Failed to write {}: {}",
                self.path.display(),
                e
            ))
        })?;
        trace!("Wrote {} records to {:?}", items.len(), self.path);
        Ok(())
    }

    /// Snapshot of all records
    pub fn read(&self) -> InfrastructureResult<Vec<T>> {
        let guard = self
            .items
            .read()
            .map_err(|e| InfrastructureError::Lock(e.to_string()))?;
        Ok(guard.clone())
    }

    /// Runs `f` on the records and persists the result.
    ///
    /// When `f` returns `Err` nothing is written and the in-memory state is untouched.
    pub fn mutate<R, E, F>(&self, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, E>,
        E: From<InfrastructureError>,
    {
        let mut guard = self
            .items
            .write()
            .map_err(|e| InfrastructureError::Lock(e.to_string()))?;
        let mut working = guard.clone();
        let result = f(&mut working)?;
        self.save(&working)?;
        *guard = working;
        Ok(result)
    }
}
