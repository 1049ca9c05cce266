use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A rated movie in the user's watched list. Immutable once created;
/// unique by `imdb_id` within the list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedEntry {
    pub imdb_id: String,
    pub title: String,
    pub year: Option<u32>,
    pub poster_url: String,
    /// Critic rating carried over from the catalog detail record.
    pub imdb_rating: f64,
    pub runtime_minutes: u32,
    /// The user's star rating, 1-10.
    pub user_rating: u8,
    /// How many times the rating was changed before it was committed.
    pub rating_change_count: u32,
    pub date_added: DateTime<Utc>,
}
