use thiserror::Error;

/// Failures surfaced by the catalog. The `Display` strings are the
/// user-visible error banners, so they must stay stable.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog answered but reported zero matches.
    #[error("Movie not found")]
    NotFound,

    /// The catalog answered with a non-success HTTP status.
    #[error("Something went wrong with fetching movies")]
    HttpStatus(u16),

    /// The request never produced a usable response (connect, TLS, decode).
    #[error("Something went wrong with fetching movies")]
    Transport(#[from] reqwest::Error),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound)
    }
}
