use color_eyre::Result;
use comfy_table::{Cell, Table};
use movie_log_core::summarize;
use serde_json::json;

use crate::commands::load_watched;
use crate::output::{Output, OutputFormat};

pub fn run_watched(output: &Output) -> Result<()> {
    let watched = load_watched();
    let summary = summarize(watched.entries());

    match output.format() {
        OutputFormat::Human => {
            if watched.is_empty() {
                output.println("Your watched list is empty");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("ID").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Year").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("⭐ IMDb").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("🌟 Yours").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("⏳ Runtime").add_attribute(comfy_table::Attribute::Bold),
            ]);
            for entry in watched.entries() {
                table.add_row(vec![
                    Cell::new(&entry.imdb_id),
                    Cell::new(&entry.title),
                    Cell::new(
                        entry
                            .year
                            .map(|year| year.to_string())
                            .unwrap_or_else(|| "-".to_string()),
                    ),
                    Cell::new(entry.imdb_rating),
                    Cell::new(entry.user_rating),
                    Cell::new(format!("{} min", entry.runtime_minutes)),
                ]);
            }
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

            output.println("Movies you watched");
            output.println(table.to_string());
            output.println(format!(
                "#️⃣ {} movies  ⭐ {:.2}  🌟 {:.2}  ⏳ {:.2} min",
                summary.count,
                summary.avg_imdb_rating,
                summary.avg_user_rating,
                summary.avg_runtime
            ));
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "entries": serde_json::to_value(watched.entries())?,
                "summary": {
                    "count": summary.count,
                    "avg_imdb_rating": summary.avg_imdb_rating,
                    "avg_user_rating": summary.avg_user_rating,
                    "avg_runtime": summary.avg_runtime,
                },
            }));
        }
    }

    Ok(())
}

pub fn run_remove(id: &str, output: &Output) -> Result<()> {
    let mut watched = load_watched();

    if !watched.contains(id) {
        output.warn(format!("{} is not in your watched list", id));
        return Ok(());
    }

    watched
        .remove(id)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    output.success(format!("Removed {} from your watched list", id));

    Ok(())
}
