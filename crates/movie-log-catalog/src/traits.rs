use async_trait::async_trait;
use movie_log_models::{MovieDetail, MovieSummary};

use crate::error::CatalogError;

/// The external movie-metadata API, behind a trait so the core state
/// machine can be driven by a test double.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Free-text search returning lightweight summaries.
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, CatalogError>;

    /// Full record for a single title.
    async fn detail(&self, imdb_id: &str) -> Result<MovieDetail, CatalogError>;
}
