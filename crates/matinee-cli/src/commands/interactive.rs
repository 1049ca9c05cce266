use color_eyre::Result;
use dialoguer::{Confirm, Input, Select};
use movie_log_core::{Session, MIN_QUERY_LEN};
use owo_colors::OwoColorize;

use crate::commands::{build_session, loading_spinner, show};
use crate::output::Output;

const DEFAULT_TITLE: &str = "matinee";

/// Interactive session: search, pick a result, rate it, repeat.
///
/// Submitting an empty search clears the current results; Esc backs out of
/// any open detail view; 'q' quits.
pub async fn run_interactive(output: &Output) -> Result<()> {
    let mut session = build_session()?;

    println!("🍿 matinee");
    println!("Type a search (at least {} characters). Empty input clears, 'q' quits.", MIN_QUERY_LEN);
    set_terminal_title(DEFAULT_TITLE);

    loop {
        let query: String = Input::new()
            .with_prompt("Search movies")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))?;

        if query.trim() == "q" {
            break;
        }

        session.set_query(query);

        if session.query().trim().chars().count() < MIN_QUERY_LEN {
            continue;
        }

        let spinner = loading_spinner(output, "Loading...");
        session.settle().await;
        spinner.finish_and_clear();

        if let Some(message) = session.search_error() {
            println!("{} {}", "✗".red(), message);
            continue;
        }

        let results = session.results();
        println!("Found {} results", results.len());
        if results.is_empty() {
            continue;
        }

        let labels: Vec<String> = results
            .iter()
            .map(|movie| match movie.year {
                Some(year) => format!("{} ({})", movie.title, year),
                None => movie.title.clone(),
            })
            .collect();

        // Esc backs out of the list without opening anything.
        let picked = Select::new()
            .with_prompt("Open details")
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read selection: {}", e))?;

        let Some(index) = picked else {
            session.close();
            continue;
        };

        let id = results[index].imdb_id.clone();
        session.select(&id);

        let spinner = loading_spinner(output, "Loading...");
        session.settle().await;
        spinner.finish_and_clear();

        if let Some(message) = session.detail_error() {
            println!("{} {}", "✗".red(), message);
            session.close();
            continue;
        }

        if let Some(title) = session.page_title() {
            set_terminal_title(&title);
        }
        if let Some(movie) = session.movie() {
            println!();
            show::print_detail(&movie);
            println!();
        }

        if let Some(stored) = session.selected_watched_rating() {
            println!("You watched this movie once and rated it {}", stored);
        } else {
            rate_and_commit(&mut session)?;
        }

        session.close();
        set_terminal_title(DEFAULT_TITLE);
    }

    Ok(())
}

fn rate_and_commit(session: &mut Session) -> Result<()> {
    loop {
        let Some(rating) = prompt_rating()? else {
            return Ok(());
        };
        session.set_rating(rating);

        let add = Confirm::new()
            .with_prompt("Add to watched list?")
            .default(true)
            .interact()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))?;

        if add {
            match session.commit() {
                Ok(()) => println!("{} Added to your watched list", "✓".green()),
                Err(e) => println!("{} {}", "✗".red(), e),
            }
            return Ok(());
        }
        // Not confirmed: loop so the user can change the rating. Every
        // submission counts toward the change counter.
    }
}

fn prompt_rating() -> Result<Option<u8>> {
    let raw: String = Input::new()
        .with_prompt("Your rating (1-10, empty to skip)")
        .allow_empty(true)
        .validate_with(|value: &String| {
            if value.is_empty() {
                return Ok(());
            }
            match value.parse::<u8>() {
                Ok(1..=10) => Ok(()),
                _ => Err("Enter a whole number from 1 to 10"),
            }
        })
        .interact_text()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))?;

    if raw.is_empty() {
        return Ok(None);
    }
    Ok(Some(raw.parse()?))
}

/// OSC 0 sets the terminal window title, standing in for the browser tab
/// title the core's page-title output was designed for.
fn set_terminal_title(title: &str) {
    use std::io::Write;
    print!("\x1b]0;{}\x07", title);
    let _ = std::io::stdout().flush();
}
