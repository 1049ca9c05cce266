pub mod config;
pub mod convert;
pub mod interactive;
pub mod rate;
pub mod search;
pub mod show;
pub mod watched;

use std::sync::Arc;
use std::time::Duration;

use color_eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use movie_log_catalog::OmdbClient;
use movie_log_config::{Config, PathManager};
use movie_log_core::{Session, WatchedList, WatchedStorage};

use crate::output::{Output, OutputFormat};

/// Load and validate the config, then assemble a session against the real
/// catalog and the persisted watched list.
pub fn build_session() -> Result<Session> {
    let paths = PathManager::default();
    let config = Config::load_or_default(&paths.config_file())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load configuration: {}", e))?;
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let catalog = OmdbClient::new(
        config.catalog.base_url.clone(),
        config.catalog.api_key.clone(),
    );
    tracing::debug!("Using watched list at {:?}", paths.watched_file());
    let watched = WatchedList::load(WatchedStorage::new(paths.watched_file()));

    Ok(Session::new(Arc::new(catalog), watched))
}

/// The watched list alone; commands that never hit the network skip config
/// validation entirely.
pub fn load_watched() -> WatchedList {
    let paths = PathManager::default();
    WatchedList::load(WatchedStorage::new(paths.watched_file()))
}

/// Spinner shown while a fetch is in flight. Hidden in quiet or JSON mode.
pub fn loading_spinner(output: &Output, message: &str) -> ProgressBar {
    if output.is_quiet() || output.format() != OutputFormat::Human {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
