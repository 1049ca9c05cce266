use movie_log_models::WatchedEntry;
use thiserror::Error;

use crate::store::WatchedStorage;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("movie {0} is already in the watched list")]
    DuplicateEntry(String),
    #[error("failed to persist watched list: {0}")]
    Persist(#[source] anyhow::Error),
}

/// The user's rated movies, in insertion order, unique by id.
///
/// Every mutation writes the complete post-mutation list back to storage.
pub struct WatchedList {
    entries: Vec<WatchedEntry>,
    storage: WatchedStorage,
}

impl WatchedList {
    /// Restore the list from storage. Missing or corrupt data loads as empty.
    pub fn load(storage: WatchedStorage) -> Self {
        let entries = storage.load();
        Self { entries, storage }
    }

    /// Append an entry. An id already present is rejected outright; the
    /// caller surfaces the stored rating instead of re-adding.
    pub fn add(&mut self, entry: WatchedEntry) -> Result<(), StoreError> {
        if self.contains(&entry.imdb_id) {
            return Err(StoreError::DuplicateEntry(entry.imdb_id.clone()));
        }
        self.entries.push(entry);
        self.persist()
    }

    /// Remove by id; a no-op when absent (nothing is rewritten either).
    pub fn remove(&mut self, imdb_id: &str) -> Result<(), StoreError> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.imdb_id != imdb_id);
        if self.entries.len() == before {
            return Ok(());
        }
        self.persist()
    }

    pub fn contains(&self, imdb_id: &str) -> bool {
        self.entries.iter().any(|entry| entry.imdb_id == imdb_id)
    }

    pub fn get(&self, imdb_id: &str) -> Option<&WatchedEntry> {
        self.entries.iter().find(|entry| entry.imdb_id == imdb_id)
    }

    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.storage.save(&self.entries).map_err(StoreError::Persist)
    }
}
