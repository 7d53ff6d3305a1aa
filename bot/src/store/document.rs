use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

/// Durable key-value JSON persistence for one logical document.
///
/// The whole document lives in memory as `guild id -> T`; `load` runs once
/// at startup and `save` flushes the full map back to disk. Each store owns
/// its own save mutex, so a slow flush of one document never blocks reads or
/// writes of another.
pub struct DocumentStore<T> {
    path: PathBuf,
    data: RwLock<HashMap<String, T>>,
    save_lock: tokio::sync::Mutex<()>,
}

impl<T> DocumentStore<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    /// Read the backing file fully into memory. A missing file is normal
    /// (the first save creates it); an unreadable or corrupt file falls
    /// back to an empty document.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(map) => {
                    info!("data loaded from {}", path.display());
                    map
                }
                Err(e) => {
                    error!(
                        "could not decode JSON from {}: {e}; starting with empty data",
                        path.display()
                    );
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "{} not found; a new file will be created on first save",
                    path.display()
                );
                HashMap::new()
            }
            Err(e) => {
                error!(
                    "could not read {}: {e}; starting with empty data",
                    path.display()
                );
                HashMap::new()
            }
        };

        Self {
            path,
            data: RwLock::new(data),
            save_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Clone the value stored under `key`, if any. Never touches the file.
    pub fn get(&self, key: &str) -> Option<T> {
        self.data.read().unwrap().get(key).cloned()
    }

    /// Like [`DocumentStore::get`], but substitutes `default` for an absent
    /// entry without inserting it.
    pub fn get_or(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Replace the value under `key` in memory. Call [`DocumentStore::save`]
    /// to persist.
    pub fn set(&self, key: impl Into<String>, value: T) {
        self.data.write().unwrap().insert(key.into(), value);
    }

    /// Flush the whole in-memory document to disk, overwriting the file.
    ///
    /// At most one write per store is in flight at a time: concurrent
    /// callers queue on the save mutex, and each writes the snapshot taken
    /// once the mutex is theirs, so the file is always one coherent
    /// snapshot. Failures are logged and dropped; the in-memory state stays
    /// authoritative until the next successful save.
    pub async fn save(&self) {
        let _flush = self.save_lock.lock().await;

        let snapshot = {
            let data = self.data.read().unwrap();
            serde_json::to_string_pretty(&*data)
        };

        match snapshot {
            Ok(body) => match tokio::fs::write(&self.path, body).await {
                Ok(()) => info!("data saved to {}", self.path.display()),
                Err(e) => error!("failed to save data to {}: {e}", self.path.display()),
            },
            Err(e) => error!("failed to encode data for {}: {e}", self.path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_load_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::<Vec<u32>>::load(dir.path().join("absent.json"));
        assert!(store.get("1").is_none());
    }

    #[test]
    fn test_load_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.json");
        std::fs::write(&path, "{not valid json!").unwrap();

        let store = DocumentStore::<Vec<u32>>::load(path);
        assert!(store.get("1").is_none());
    }

    #[test]
    fn test_get_or_returns_default_without_inserting() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::<Vec<u32>>::load(dir.path().join("d.json"));

        assert_eq!(store.get_or("1", vec![7]), vec![7]);
        // The default must not have been written into the store.
        assert!(store.get("1").is_none());
    }

    #[test]
    fn test_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::<String>::load(dir.path().join("d.json"));

        store.set("guild", "value".to_string());
        assert_eq!(store.get("guild").as_deref(), Some("value"));
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("d.json");

        let store = DocumentStore::<Vec<u32>>::load(path.clone());
        store.set("guild_a", vec![1, 2, 3]);
        store.set("guild_b", vec![]);
        store.save().await;

        let reloaded = DocumentStore::<Vec<u32>>::load(path);
        assert_eq!(reloaded.get("guild_a"), Some(vec![1, 2, 3]));
        assert_eq!(reloaded.get("guild_b"), Some(vec![]));
        assert!(reloaded.get("guild_c").is_none());
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("d.json");

        let store = DocumentStore::<String>::load(path.clone());
        store.set("guild", "first".to_string());
        store.save().await;
        store.set("guild", "second".to_string());
        store.save().await;

        let reloaded = DocumentStore::<String>::load(path);
        assert_eq!(reloaded.get("guild").as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_concurrent_saves_leave_one_coherent_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("d.json");
        let store = Arc::new(DocumentStore::<Vec<u32>>::load(path.clone()));

        let mut handles = Vec::new();
        for i in 0..8u32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.set(format!("guild_{i}"), vec![i]);
                store.save().await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // Saves are serialized, so the file must parse as a single snapshot,
        // and the last snapshot taken necessarily saw every earlier set.
        let contents = std::fs::read_to_string(&path).unwrap();
        let on_disk: HashMap<String, Vec<u32>> = serde_json::from_str(&contents).unwrap();
        assert_eq!(on_disk.len(), 8);
        for i in 0..8u32 {
            assert_eq!(on_disk[&format!("guild_{i}")], vec![i]);
        }
    }

    #[tokio::test]
    async fn test_failed_save_keeps_memory_authoritative() {
        let dir = tempfile::tempdir().unwrap();
        // A path inside a directory that doesn't exist makes the write fail.
        let path = dir.path().join("no_such_dir").join("d.json");

        let store = DocumentStore::<String>::load(path);
        store.set("guild", "value".to_string());
        store.save().await;

        assert_eq!(store.get("guild").as_deref(), Some("value"));
    }
}
