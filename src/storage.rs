use std::path::PathBuf;

use thiserror::Error;

use crate::core::task::Task;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("slot '{key}' holds malformed task data: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Named slots backed by one `<key>.json` file each.
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    dir: PathBuf,
}

impl KeyValueStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Raw slot bytes. Decoding is left to the caller so bad bytes surface as malformed data.
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.slot_path(key);
        match std::fs::read(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    pub fn set(&self, key: &str, value: impl AsRef<[u8]>) -> Result<(), StorageError> {
        let path = self.slot_path(key);
        std::fs::write(&path, value).map_err(|source| StorageError::Io { path, source })
    }

    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    /// Moves an unreadable slot to `<key>.json.corrupt` and returns the new path.
    pub fn quarantine(&self, key: &str) -> Result<PathBuf, StorageError> {
        let path = self.slot_path(key);
        let target = self.dir.join(format!("{}.json.corrupt", key));
        std::fs::rename(&path, &target).map_err(|source| StorageError::Io { path, source })?;
        Ok(target)
    }
}

/// Reads the whole task list from `key`. `None` when the slot has never been written.
pub fn load_tasks(store: &KeyValueStore, key: &str) -> Result<Option<Vec<Task>>, StorageError> {
    let Some(content) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_slice(&content)
        .map(Some)
        .map_err(|source| StorageError::Malformed {
            key: key.to_string(),
            source,
        })
}

/// Overwrites `key` with the full task list.
pub fn save_tasks(store: &KeyValueStore, key: &str, tasks: &[Task]) -> Result<(), StorageError> {
    let json = serde_json::to_string(tasks)?;
    store.set(key, &json)
}
