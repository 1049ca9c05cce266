use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::TimeZone;
use movie_log_catalog::{Catalog, CatalogError};
use movie_log_models::{MovieDetail, MovieSummary, WatchedEntry};

enum CannedSearch {
    Movies(Vec<MovieSummary>),
    HttpFailure(u16),
}

/// Catalog double with canned responses. Unknown queries and ids answer
/// with the "no matches" signal, like the real catalog does.
pub struct MockCatalog {
    searches: HashMap<String, CannedSearch>,
    details: HashMap<String, MovieDetail>,
    delay: Option<Duration>,
    search_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self {
            searches: HashMap::new(),
            details: HashMap::new(),
            delay: None,
            search_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_movies(mut self, query: &str, ids: &[&str]) -> Self {
        let movies = ids.iter().map(|id| summary(id)).collect();
        self.searches
            .insert(query.to_string(), CannedSearch::Movies(movies));
        self
    }

    pub fn with_search_failure(mut self, query: &str, status: u16) -> Self {
        self.searches
            .insert(query.to_string(), CannedSearch::HttpFailure(status));
        self
    }

    pub fn with_detail(mut self, detail: MovieDetail) -> Self {
        self.details.insert(detail.imdb_id.clone(), detail);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, CatalogError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.searches.get(query) {
            Some(CannedSearch::Movies(movies)) => Ok(movies.clone()),
            Some(CannedSearch::HttpFailure(status)) => Err(CatalogError::HttpStatus(*status)),
            None => Err(CatalogError::NotFound),
        }
    }

    async fn detail(&self, imdb_id: &str) -> Result<MovieDetail, CatalogError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.details
            .get(imdb_id)
            .cloned()
            .ok_or(CatalogError::NotFound)
    }
}

pub fn summary(imdb_id: &str) -> MovieSummary {
    MovieSummary {
        imdb_id: imdb_id.to_string(),
        title: format!("Movie {}", imdb_id),
        year: Some(2005),
        poster_url: "https://example.com/poster.jpg".to_string(),
    }
}

pub fn detail(imdb_id: &str) -> MovieDetail {
    MovieDetail {
        imdb_id: imdb_id.to_string(),
        title: format!("Movie {}", imdb_id),
        year: Some(2005),
        poster_url: "https://example.com/poster.jpg".to_string(),
        runtime_minutes: Some(140),
        imdb_rating: Some(8.2),
        plot: "A plot.".to_string(),
        released: "15 Jun 2005".to_string(),
        actors: "Some Actors".to_string(),
        director: "A Director".to_string(),
        genre: "Drama".to_string(),
    }
}

pub fn watched_entry(imdb_id: &str) -> WatchedEntry {
    WatchedEntry {
        imdb_id: imdb_id.to_string(),
        title: format!("Movie {}", imdb_id),
        year: Some(2005),
        poster_url: "https://example.com/poster.jpg".to_string(),
        imdb_rating: 8.2,
        runtime_minutes: 140,
        user_rating: 8,
        rating_change_count: 1,
        date_added: chrono::Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}
