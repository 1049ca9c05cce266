use color_eyre::Result;
use comfy_table::{Cell, Table};
use movie_log_core::MIN_QUERY_LEN;
use serde_json::json;

use crate::commands::{build_session, loading_spinner};
use crate::output::{Output, OutputFormat};

pub async fn run_search(query: &str, output: &Output) -> Result<()> {
    let mut session = build_session()?;

    let spinner = loading_spinner(output, "Searching...");
    session.set_query(query);
    session.settle().await;
    spinner.finish_and_clear();

    if let Some(message) = session.search_error() {
        output.error(&message);
        return Ok(());
    }

    let results = session.results();

    match output.format() {
        OutputFormat::Human => {
            if results.is_empty() {
                if query.trim().chars().count() < MIN_QUERY_LEN {
                    output.println(format!(
                        "Type at least {} characters to search",
                        MIN_QUERY_LEN
                    ));
                } else {
                    output.println("No results");
                }
                return Ok(());
            }

            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("ID").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Year").add_attribute(comfy_table::Attribute::Bold),
            ]);
            for movie in &results {
                table.add_row(vec![
                    Cell::new(&movie.imdb_id),
                    Cell::new(&movie.title),
                    Cell::new(
                        movie
                            .year
                            .map(|year| year.to_string())
                            .unwrap_or_else(|| "-".to_string()),
                    ),
                ]);
            }
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

            output.println(format!("Found {} results", results.len()));
            output.println(table.to_string());
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "query": query,
                "results": serde_json::to_value(&results)?,
            }));
        }
    }

    Ok(())
}
