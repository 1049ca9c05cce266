use color_eyre::Result;
use serde_json::json;

use crate::commands::{build_session, loading_spinner};
use crate::output::{Output, OutputFormat};

pub async fn run_rate(id: &str, rating: u8, output: &Output) -> Result<()> {
    let mut session = build_session()?;

    let spinner = loading_spinner(output, "Loading...");
    session.select(id);
    session.settle().await;
    spinner.finish_and_clear();

    if let Some(message) = session.detail_error() {
        output.error(&message);
        return Ok(());
    }

    if let Some(stored) = session.selected_watched_rating() {
        output.warn(format!(
            "{} is already in your watched list, rated {}",
            id, stored
        ));
        return Ok(());
    }

    let title = session
        .movie()
        .map(|movie| movie.title)
        .unwrap_or_else(|| id.to_string());

    session.set_rating(rating);
    match session.commit() {
        Ok(()) => match output.format() {
            OutputFormat::Human => {
                output.success(format!(
                    "Added {} to your watched list (rating {})",
                    title, rating
                ));
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                output.json(&json!({
                    "type": "rated",
                    "id": id,
                    "title": title,
                    "rating": rating,
                }));
            }
        },
        Err(err) => output.error(err.to_string()),
    }

    Ok(())
}
