pub mod error;
pub mod omdb;
pub mod rates;
pub mod traits;

pub use error::CatalogError;
pub use omdb::OmdbClient;
pub use rates::RatesClient;
pub use traits::Catalog;
