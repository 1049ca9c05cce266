use color_eyre::Result;
use comfy_table::{Cell, Table};
use movie_log_config::{Config, PathManager};
use serde_json::json;

use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;

pub fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => run_show(full, output),
        ConfigCommands::SetKey { key } => run_set_key(&key, output),
    }
}

fn run_show(full: bool, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config_file = paths.config_file();
    let config = Config::load_or_default(&config_file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e)
    })?;

    let api_key_display = if !config.is_catalog_configured() {
        "(not set)".to_string()
    } else if full {
        config.catalog.api_key.clone()
    } else {
        mask(&config.catalog.api_key)
    };

    match output.format() {
        OutputFormat::Human => {
            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Setting").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Value").add_attribute(comfy_table::Attribute::Bold),
            ]);
            table.add_row(vec![
                Cell::new("Config file"),
                Cell::new(config_file.display().to_string()),
            ]);
            table.add_row(vec![Cell::new("Catalog API key"), Cell::new(&api_key_display)]);
            table.add_row(vec![
                Cell::new("Catalog base URL"),
                Cell::new(&config.catalog.base_url),
            ]);
            table.add_row(vec![
                Cell::new("Rates base URL"),
                Cell::new(&config.rates.base_url),
            ]);
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

            output.println(table.to_string());
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": config_file.display().to_string(),
                "catalog": {
                    "api_key": api_key_display,
                    "base_url": config.catalog.base_url,
                },
                "rates": {
                    "base_url": config.rates.base_url,
                },
            }));
        }
    }

    Ok(())
}

fn run_set_key(key: &str, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    paths.ensure_directories().map_err(|e| {
        color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e)
    })?;

    let config_file = paths.config_file();
    let mut config = Config::load_or_default(&config_file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e)
    })?;

    config.catalog.api_key = key.to_string();
    config.save_to_file(&config_file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e)
    })?;

    output.success(format!("Saved catalog API key to {}", config_file.display()));
    Ok(())
}

fn mask(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    format!("{}****", visible)
}
