use color_eyre::Result;
use movie_log_models::MovieDetail;
use owo_colors::OwoColorize;

use crate::commands::{build_session, loading_spinner};
use crate::output::{Output, OutputFormat};

pub async fn run_show(id: &str, output: &Output) -> Result<()> {
    let mut session = build_session()?;

    let spinner = loading_spinner(output, "Loading...");
    session.select(id);
    session.settle().await;
    spinner.finish_and_clear();

    if let Some(message) = session.detail_error() {
        output.error(&message);
        return Ok(());
    }

    let Some(movie) = session.movie() else {
        output.error("Movie not found");
        return Ok(());
    };

    match output.format() {
        OutputFormat::Human => {
            print_detail(&movie);
            if let Some(stored) = session.selected_watched_rating() {
                println!();
                println!("You watched this movie once and rated it {}", stored);
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&serde_json::to_value(&movie)?);
        }
    }

    Ok(())
}

pub(crate) fn print_detail(movie: &MovieDetail) {
    let runtime = movie
        .runtime_minutes
        .map(|minutes| format!("{} min", minutes))
        .unwrap_or_else(|| "-".to_string());
    let rating = movie
        .imdb_rating
        .map(|rating| rating.to_string())
        .unwrap_or_else(|| "-".to_string());

    println!("{}", movie.title.bold());
    println!("{} • {}", movie.released, runtime);
    println!("{}", movie.genre);
    println!("⭐ {} IMDb rating", rating);
    println!();
    println!("{}", movie.plot.italic());
    println!("Starring: {}", movie.actors);
    println!("Directed by: {}", movie.director);
}
