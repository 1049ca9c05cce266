use std::sync::{Arc, Mutex};

use movie_log_catalog::Catalog;
use movie_log_models::MovieDetail;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::inflight::Inflight;

pub const MAX_RATING: u8 = 10;

#[derive(Debug, Default)]
struct DetailState {
    movie: Option<MovieDetail>,
    loading: bool,
    error: Option<String>,
    rating: u8,
    rating_changes: u32,
}

/// Fetches the full record for the currently selected movie and tracks the
/// in-progress rating for it.
///
/// Each `open` starts a fresh detail session: the previous fetch is
/// cancelled, and the rating draft and its change counter start over.
pub struct DetailLoader {
    catalog: Arc<dyn Catalog>,
    state: Arc<Mutex<DetailState>>,
    inflight: Option<Inflight>,
    retired: Vec<JoinHandle<()>>,
}

impl DetailLoader {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            catalog,
            state: Arc::new(Mutex::new(DetailState::default())),
            inflight: None,
            retired: Vec::new(),
        }
    }

    /// Start a detail session for `imdb_id`.
    pub fn open(&mut self, imdb_id: &str) {
        if let Some(inflight) = self.inflight.take() {
            self.retired.push(inflight.cancel());
        }

        {
            let mut state = self.state.lock().unwrap();
            *state = DetailState {
                loading: true,
                ..DetailState::default()
            };
        }

        let token = CancellationToken::new();
        let task_token = token.clone();
        let catalog = Arc::clone(&self.catalog);
        let state = Arc::clone(&self.state);
        let id = imdb_id.to_string();

        let handle = tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = task_token.cancelled() => return,
                outcome = catalog.detail(&id) => outcome,
            };

            let mut state = state.lock().unwrap();
            if task_token.is_cancelled() {
                return;
            }

            match outcome {
                Ok(movie) => {
                    debug!("Loaded details for {}", id);
                    state.movie = Some(movie);
                    state.error = None;
                }
                Err(err) => {
                    debug!("Detail fetch for {} failed: {}", id, err);
                    state.error = Some(err.to_string());
                }
            }
            state.loading = false;
        });

        self.inflight = Some(Inflight { token, handle });
    }

    /// End the detail session and discard everything about it.
    pub fn close(&mut self) {
        if let Some(inflight) = self.inflight.take() {
            self.retired.push(inflight.cancel());
        }
        *self.state.lock().unwrap() = DetailState::default();
    }

    /// Record a rating change. Every non-zero submission bumps the change
    /// counter, including re-submitting the current value.
    pub fn set_rating(&mut self, rating: u8) {
        let rating = rating.min(MAX_RATING);
        let mut state = self.state.lock().unwrap();
        if rating > 0 {
            state.rating_changes += 1;
        }
        state.rating = rating;
    }

    /// Wait until the current fetch and any superseded ones have settled.
    pub async fn settle(&mut self) {
        for handle in self.retired.drain(..) {
            let _ = handle.await;
        }
        if let Some(inflight) = self.inflight.take() {
            let _ = inflight.handle.await;
        }
    }

    pub fn movie(&self) -> Option<MovieDetail> {
        self.state.lock().unwrap().movie.clone()
    }

    pub fn title(&self) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .movie
            .as_ref()
            .map(|movie| movie.title.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().unwrap().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().unwrap().error.clone()
    }

    pub fn rating(&self) -> u8 {
        self.state.lock().unwrap().rating
    }

    pub fn rating_changes(&self) -> u32 {
        self.state.lock().unwrap().rating_changes
    }
}

impl Drop for DetailLoader {
    fn drop(&mut self) {
        if let Some(inflight) = self.inflight.take() {
            inflight.cancel();
        }
    }
}
