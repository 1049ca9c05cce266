use std::sync::Arc;

use chrono::Utc;
use movie_log_catalog::Catalog;
use movie_log_models::{MovieDetail, MovieSummary, WatchedEntry};
use thiserror::Error;
use tracing::info;

use crate::detail::DetailLoader;
use crate::search::SearchController;
use crate::selection::SelectionController;
use crate::summary::{summarize, WatchedSummary};
use crate::watched::{StoreError, WatchedList};

#[derive(Debug, Error)]
pub enum CommitError {
    #[error("no movie is selected")]
    NoSelection,
    #[error("movie is already in the watched list")]
    AlreadyWatched,
    #[error("a rating must be given before committing")]
    NotRated,
    #[error("movie details are still loading")]
    DetailPending,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One user session: the search box, the result list, the open detail view
/// and the persisted watched list, wired together with the cross-component
/// rules (a new search closes the detail view, committing a rating clears
/// the selection, and so on).
pub struct Session {
    search: SearchController,
    selection: SelectionController,
    detail: DetailLoader,
    watched: WatchedList,
}

impl Session {
    pub fn new(catalog: Arc<dyn Catalog>, watched: WatchedList) -> Self {
        Self {
            search: SearchController::new(Arc::clone(&catalog)),
            selection: SelectionController::new(),
            detail: DetailLoader::new(catalog),
            watched,
        }
    }

    /// Every query change starts from a closed detail view.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.close();
        self.search.set_query(query);
    }

    /// Toggle the selection; opening fetches details, closing discards them.
    pub fn select(&mut self, imdb_id: &str) {
        match self.selection.toggle(imdb_id) {
            Some(id) => {
                let id = id.to_string();
                self.detail.open(&id);
            }
            None => self.detail.close(),
        }
    }

    /// Close the detail view, if any.
    pub fn close(&mut self) {
        self.selection.clear();
        self.detail.close();
    }

    pub fn set_rating(&mut self, rating: u8) {
        self.detail.set_rating(rating);
    }

    /// Move the open detail view into the watched list, then close it.
    pub fn commit(&mut self) -> Result<(), CommitError> {
        let Some(id) = self.selection.selected().map(str::to_string) else {
            return Err(CommitError::NoSelection);
        };
        if self.watched.contains(&id) {
            return Err(CommitError::AlreadyWatched);
        }
        let rating = self.detail.rating();
        if rating == 0 {
            return Err(CommitError::NotRated);
        }
        let Some(movie) = self.detail.movie() else {
            return Err(CommitError::DetailPending);
        };

        let entry = WatchedEntry {
            imdb_id: id.clone(),
            title: movie.title,
            year: movie.year,
            poster_url: movie.poster_url,
            imdb_rating: movie.imdb_rating.unwrap_or(0.0),
            runtime_minutes: movie.runtime_minutes.unwrap_or(0),
            user_rating: rating,
            rating_change_count: self.detail.rating_changes(),
            date_added: Utc::now(),
        };

        self.watched.add(entry)?;
        info!("Added {} to the watched list (rating {})", id, rating);
        self.close();
        Ok(())
    }

    /// Remove a movie from the watched list by id.
    pub fn remove_watched(&mut self, imdb_id: &str) -> Result<(), StoreError> {
        self.watched.remove(imdb_id)
    }

    /// Title for the presentation layer to apply while a detail view with a
    /// known title is open; `None` means restore the default.
    pub fn page_title(&self) -> Option<String> {
        self.detail.title().map(|title| format!("Movie | {}", title))
    }

    /// The stored rating, when the selected movie is already watched. The
    /// presentation shows this read-only instead of the rating input.
    pub fn selected_watched_rating(&self) -> Option<u8> {
        let id = self.selection.selected()?;
        self.watched.get(id).map(|entry| entry.user_rating)
    }

    /// Wait for all in-flight fetches (and superseded ones) to settle.
    pub async fn settle(&mut self) {
        self.search.settle().await;
        self.detail.settle().await;
    }

    pub fn query(&self) -> String {
        self.search.query()
    }

    pub fn results(&self) -> Vec<MovieSummary> {
        self.search.results()
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_loading()
    }

    pub fn search_error(&self) -> Option<String> {
        self.search.error()
    }

    pub fn selected(&self) -> Option<String> {
        self.selection.selected().map(str::to_string)
    }

    pub fn movie(&self) -> Option<MovieDetail> {
        self.detail.movie()
    }

    pub fn is_loading_detail(&self) -> bool {
        self.detail.is_loading()
    }

    pub fn detail_error(&self) -> Option<String> {
        self.detail.error()
    }

    pub fn rating(&self) -> u8 {
        self.detail.rating()
    }

    pub fn rating_changes(&self) -> u32 {
        self.detail.rating_changes()
    }

    pub fn watched(&self) -> &WatchedList {
        &self.watched
    }

    pub fn summary(&self) -> WatchedSummary {
        summarize(self.watched.entries())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::WatchedStorage;
    use crate::test_util::{detail, watched_entry, MockCatalog};
    use tempfile::TempDir;

    fn session_with(catalog: MockCatalog) -> (TempDir, Session) {
        let dir = tempfile::tempdir().unwrap();
        let watched = WatchedList::load(WatchedStorage::new(dir.path().join("watched.json")));
        (dir, Session::new(Arc::new(catalog), watched))
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_flow_end_to_end() {
        let catalog = MockCatalog::new().with_movies("batman", &["tt0372784", "tt1877830"]);
        let (_dir, mut session) = session_with(catalog);

        session.set_query("batman");
        assert!(session.is_searching());
        session.settle().await;

        assert_eq!(session.results().len(), 2);
        assert!(!session.is_searching());
        assert_eq!(session.search_error(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_and_commit_end_to_end() {
        let catalog = MockCatalog::new()
            .with_movies("batman", &["tt0372784"])
            .with_detail(detail("tt0372784"));
        let (_dir, mut session) = session_with(catalog);

        session.set_query("batman");
        session.settle().await;

        session.select("tt0372784");
        session.settle().await;
        assert_eq!(session.movie().unwrap().imdb_id, "tt0372784");

        session.set_rating(7);
        session.set_rating(7);
        session.set_rating(7);
        assert_eq!(session.rating_changes(), 3);

        session.commit().unwrap();

        assert_eq!(session.watched().len(), 1);
        let entry = session.watched().get("tt0372784").unwrap();
        assert_eq!(entry.user_rating, 7);
        assert_eq!(entry.rating_change_count, 3);
        assert_eq!(entry.runtime_minutes, 140);
        assert_eq!(entry.imdb_rating, 8.2);
        assert_eq!(session.selected(), None);
        assert_eq!(session.movie(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_without_rating_is_a_noop() {
        let catalog = MockCatalog::new()
            .with_movies("batman", &["tt0372784"])
            .with_detail(detail("tt0372784"));
        let (_dir, mut session) = session_with(catalog);

        session.set_query("batman");
        session.settle().await;
        session.select("tt0372784");
        session.settle().await;

        let err = session.commit().unwrap_err();
        assert!(matches!(err, CommitError::NotRated));
        assert!(session.watched().is_empty());
        // The detail view stays open; nothing was committed.
        assert_eq!(session.selected().as_deref(), Some("tt0372784"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_without_selection_fails() {
        let (_dir, mut session) = session_with(MockCatalog::new());
        assert!(matches!(session.commit(), Err(CommitError::NoSelection)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_watched_blocks_commit_and_exposes_stored_rating() {
        let catalog = MockCatalog::new()
            .with_movies("batman", &["tt0372784"])
            .with_detail(detail("tt0372784"));
        let dir = tempfile::tempdir().unwrap();
        let mut watched =
            WatchedList::load(WatchedStorage::new(dir.path().join("watched.json")));
        watched.add(watched_entry("tt0372784")).unwrap();
        let mut session = Session::new(Arc::new(catalog), watched);

        session.set_query("batman");
        session.settle().await;
        session.select("tt0372784");
        session.settle().await;

        assert_eq!(session.selected_watched_rating(), Some(8));

        session.set_rating(5);
        let err = session.commit().unwrap_err();
        assert!(matches!(err, CommitError::AlreadyWatched));
        assert_eq!(session.watched().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_query_closes_the_detail_view() {
        let catalog = MockCatalog::new()
            .with_movies("batman", &["tt0372784"])
            .with_movies("inception", &["tt1375666"])
            .with_detail(detail("tt0372784"));
        let (_dir, mut session) = session_with(catalog);

        session.set_query("batman");
        session.settle().await;
        session.select("tt0372784");
        session.settle().await;
        assert!(session.movie().is_some());

        session.set_query("inception");
        session.settle().await;

        assert_eq!(session.selected(), None);
        assert_eq!(session.movie(), None);
        assert_eq!(session.results().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_inactive_query_clears_results_and_closes_detail() {
        let catalog = MockCatalog::new()
            .with_movies("batman", &["tt0372784"])
            .with_detail(detail("tt0372784"));
        let (_dir, mut session) = session_with(catalog);

        session.set_query("batman");
        session.settle().await;
        session.select("tt0372784");
        session.settle().await;

        session.set_query("b");
        session.settle().await;

        assert!(session.results().is_empty());
        assert_eq!(session.search_error(), None);
        assert_eq!(session.selected(), None);
        assert_eq!(session.movie(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_title_tracks_the_open_detail_view() {
        let catalog = MockCatalog::new()
            .with_movies("batman", &["tt0372784"])
            .with_detail(detail("tt0372784"));
        let (_dir, mut session) = session_with(catalog);

        assert_eq!(session.page_title(), None);

        session.set_query("batman");
        session.settle().await;
        session.select("tt0372784");
        session.settle().await;

        assert_eq!(
            session.page_title().as_deref(),
            Some("Movie | Movie tt0372784")
        );

        session.close();
        assert_eq!(session.page_title(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_watched_delegates_to_the_list() {
        let (_dir, mut session) = session_with(MockCatalog::new());
        session.remove_watched("tt0372784").unwrap();
        assert!(session.watched().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_summary_follows_the_watched_list() {
        let catalog = MockCatalog::new()
            .with_movies("batman", &["tt0372784"])
            .with_detail(detail("tt0372784"));
        let (_dir, mut session) = session_with(catalog);

        assert_eq!(session.summary().count, 0);
        assert_eq!(session.summary().avg_user_rating, 0.0);

        session.set_query("batman");
        session.settle().await;
        session.select("tt0372784");
        session.settle().await;
        session.set_rating(6);
        session.commit().unwrap();

        let summary = session.summary();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.avg_user_rating, 6.0);
        assert_eq!(summary.avg_runtime, 140.0);
    }
}
