use anyhow::Result;
use movie_log_models::WatchedEntry;
use std::path::PathBuf;
use tracing::{debug, warn};

/// File-backed persistence for the watched list: a single JSON document,
/// rewritten wholesale after every mutation.
pub struct WatchedStorage {
    path: PathBuf,
}

impl WatchedStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the persisted list. A missing file or corrupt content loads as
    /// the empty list, never an error.
    pub fn load(&self) -> Vec<WatchedEntry> {
        if !self.path.exists() {
            debug!("Watched list file does not exist, starting empty");
            return Vec::new();
        }

        match std::fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str::<Vec<WatchedEntry>>(&content) {
                Ok(entries) => {
                    debug!("Loaded watched list: {} entries", entries.len());
                    entries
                }
                Err(e) => {
                    warn!(
                        "Corrupt watched list at {:?}: {}. Starting empty.",
                        self.path, e
                    );
                    Vec::new()
                }
            },
            Err(e) => {
                warn!(
                    "Failed to read watched list at {:?}: {}. Starting empty.",
                    self.path, e
                );
                Vec::new()
            }
        }
    }

    /// Write the complete list. Atomic from the reader's point of view:
    /// temp file, then rename.
    pub fn save(&self, entries: &[WatchedEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, json)?;
        std::fs::rename(&temp_path, &self.path)?;

        debug!("Saved watched list: {} entries", entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::watched_entry;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = WatchedStorage::new(dir.path().join("watched.json"));

        let entries = vec![watched_entry("tt0372784"), watched_entry("tt1877830")];
        storage.save(&entries).unwrap();

        let restored = WatchedStorage::new(dir.path().join("watched.json")).load();
        assert_eq!(restored, entries);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = WatchedStorage::new(dir.path().join("watched.json"));
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watched.json");
        std::fs::write(&path, "{not json").unwrap();

        let storage = WatchedStorage::new(path);
        assert!(storage.load().is_empty());
    }
}
