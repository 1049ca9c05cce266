use std::sync::{Arc, Mutex};

use movie_log_catalog::Catalog;
use movie_log_models::MovieSummary;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::inflight::Inflight;

/// Queries shorter than this (after trimming) are inactive: no request is
/// issued and any previous results are cleared.
pub const MIN_QUERY_LEN: usize = 2;

#[derive(Debug, Default)]
struct SearchState {
    query: String,
    results: Vec<MovieSummary>,
    loading: bool,
    error: Option<String>,
}

/// Owns the current query string and the request lifecycle behind it.
///
/// Each query change cancels the previous in-flight request before issuing
/// the next one, so a slow earlier response can never overwrite state
/// produced by a later query. A cancelled request leaves loading and error
/// untouched; they belong to the next request.
pub struct SearchController {
    catalog: Arc<dyn Catalog>,
    state: Arc<Mutex<SearchState>>,
    inflight: Option<Inflight>,
    retired: Vec<JoinHandle<()>>,
}

impl SearchController {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            catalog,
            state: Arc::new(Mutex::new(SearchState::default())),
            inflight: None,
            retired: Vec::new(),
        }
    }

    /// Update the query and (re)start the search behind it.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();

        if let Some(inflight) = self.inflight.take() {
            self.retired.push(inflight.cancel());
        }

        let active = {
            let mut state = self.state.lock().unwrap();
            state.query = query.clone();

            let trimmed = query.trim();
            if trimmed.chars().count() < MIN_QUERY_LEN {
                state.results.clear();
                state.error = None;
                state.loading = false;
                None
            } else {
                state.error = None;
                state.loading = true;
                Some(trimmed.to_string())
            }
        };

        let Some(term) = active else { return };

        let token = CancellationToken::new();
        let task_token = token.clone();
        let catalog = Arc::clone(&self.catalog);
        let state = Arc::clone(&self.state);

        let handle = tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = task_token.cancelled() => return,
                outcome = catalog.search(&term) => outcome,
            };

            let mut state = state.lock().unwrap();
            // Cancelled between response arrival and this lock: the next
            // request owns loading and error now.
            if task_token.is_cancelled() {
                return;
            }

            match outcome {
                Ok(results) => {
                    debug!("Search for {:?} returned {} results", term, results.len());
                    state.results = results;
                    state.error = None;
                }
                Err(err) => {
                    debug!("Search for {:?} failed: {}", term, err);
                    state.results.clear();
                    state.error = Some(err.to_string());
                }
            }
            state.loading = false;
        });

        self.inflight = Some(Inflight { token, handle });
    }

    /// Wait until the current request and any superseded ones have fully
    /// settled. One-shot callers use this; an interactive loop can poll
    /// `is_loading()` instead.
    pub async fn settle(&mut self) {
        for handle in self.retired.drain(..) {
            let _ = handle.await;
        }
        if let Some(inflight) = self.inflight.take() {
            let _ = inflight.handle.await;
        }
    }

    pub fn query(&self) -> String {
        self.state.lock().unwrap().query.clone()
    }

    pub fn results(&self) -> Vec<MovieSummary> {
        self.state.lock().unwrap().results.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().unwrap().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().unwrap().error.clone()
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        if let Some(inflight) = self.inflight.take() {
            inflight.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::MockCatalog;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_short_query_issues_no_request() {
        let catalog = Arc::new(MockCatalog::new());
        let mut search = SearchController::new(catalog.clone());

        search.set_query("b");
        search.settle().await;

        assert_eq!(catalog.search_calls(), 0);
        assert!(search.results().is_empty());
        assert!(!search.is_loading());
        assert_eq!(search.error(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_whitespace_padding_does_not_activate_search() {
        let catalog = Arc::new(MockCatalog::new());
        let mut search = SearchController::new(catalog.clone());

        search.set_query("  b  ");
        search.settle().await;

        assert_eq!(catalog.search_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_search_populates_results() {
        let catalog = Arc::new(
            MockCatalog::new().with_movies("batman", &["tt0372784", "tt1877830"]),
        );
        let mut search = SearchController::new(catalog);

        search.set_query("batman");
        assert!(search.is_loading());
        search.settle().await;

        let results = search.results();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].imdb_id, "tt0372784");
        assert!(!search.is_loading());
        assert_eq!(search.error(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_matches_reports_movie_not_found() {
        let catalog = Arc::new(MockCatalog::new().with_movies("batman", &["tt0372784"]));
        let mut search = SearchController::new(catalog);

        search.set_query("batman");
        search.settle().await;
        assert_eq!(search.results().len(), 1);

        // Unknown query: the catalog signals zero matches.
        search.set_query("zzzzzz");
        search.settle().await;

        assert_eq!(search.error().as_deref(), Some("Movie not found"));
        assert!(search.results().is_empty());
        assert!(!search.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_http_failure_reports_fetch_error() {
        let catalog = Arc::new(MockCatalog::new().with_search_failure("batman", 500));
        let mut search = SearchController::new(catalog);

        search.set_query("batman");
        search.settle().await;

        assert_eq!(
            search.error().as_deref(),
            Some("Something went wrong with fetching movies")
        );
        assert!(search.results().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_request_never_overwrites_newer_state() {
        let catalog = Arc::new(
            MockCatalog::new()
                .with_movies("bat", &["tt0000001"])
                .with_movies("batman", &["tt0372784"])
                .with_delay(Duration::from_millis(50)),
        );
        let mut search = SearchController::new(catalog);

        search.set_query("bat");
        // Let the first request reach its suspension point before superseding it.
        tokio::task::yield_now().await;
        search.set_query("batman");
        search.settle().await;

        let results = search.results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].imdb_id, "tt0372784");
        assert_eq!(search.error(), None);
        assert!(!search.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_failure_is_silent() {
        let catalog = Arc::new(
            MockCatalog::new()
                .with_search_failure("zzz", 500)
                .with_movies("batman", &["tt0372784"])
                .with_delay(Duration::from_millis(50)),
        );
        let mut search = SearchController::new(catalog);

        search.set_query("zzz");
        tokio::task::yield_now().await;
        search.set_query("batman");
        search.settle().await;

        // The cancelled failure never became a user-visible error.
        assert_eq!(search.error(), None);
        assert_eq!(search.results().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_query_resets_results_and_error() {
        let catalog = Arc::new(MockCatalog::new().with_movies("batman", &["tt0372784"]));
        let mut search = SearchController::new(catalog);

        search.set_query("batman");
        search.settle().await;
        assert_eq!(search.results().len(), 1);

        search.set_query("");
        search.settle().await;

        assert!(search.results().is_empty());
        assert_eq!(search.error(), None);
        assert!(!search.is_loading());
        assert_eq!(search.query(), "");
    }
}
