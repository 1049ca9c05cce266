use async_trait::async_trait;
use movie_log_models::{MovieDetail, MovieSummary};
use reqwest::Client;

use crate::error::CatalogError;
use crate::omdb::api;
use crate::traits::Catalog;

/// HTTP client for the movie catalog. Base URL and API key are injected at
/// construction; nothing here reads global state.
#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Catalog for OmdbClient {
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, CatalogError> {
        api::search(&self.client, &self.base_url, &self.api_key, query).await
    }

    async fn detail(&self, imdb_id: &str) -> Result<MovieDetail, CatalogError> {
        api::detail(&self.client, &self.base_url, &self.api_key, imdb_id).await
    }
}
