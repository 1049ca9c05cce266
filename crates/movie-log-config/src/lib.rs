pub mod config;
pub mod paths;

pub use config::{CatalogConfig, Config, RatesConfig, PLACEHOLDER_API_KEY};
pub use paths::PathManager;
