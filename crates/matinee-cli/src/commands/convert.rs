use color_eyre::Result;
use movie_log_catalog::RatesClient;
use movie_log_config::{Config, PathManager};
use serde_json::json;

use crate::commands::loading_spinner;
use crate::output::{Output, OutputFormat};

pub async fn run_convert(amount: f64, from: &str, to: &str, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config = Config::load_or_default(&paths.config_file())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load configuration: {}", e))?;

    let client = RatesClient::new(config.rates.base_url.clone());

    let spinner = loading_spinner(output, "Fetching exchange rate...");
    let converted = client.convert(amount, from, to).await;
    spinner.finish_and_clear();

    match converted {
        Ok(converted) => match output.format() {
            OutputFormat::Human => {
                output.println(format!(
                    "{} {} = {:.2} {}",
                    amount,
                    from.to_uppercase(),
                    converted,
                    to.to_uppercase()
                ));
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                output.json(&json!({
                    "amount": amount,
                    "from": from.to_uppercase(),
                    "to": to.to_uppercase(),
                    "converted": converted,
                }));
            }
        },
        Err(e) => output.error(e.to_string()),
    }

    Ok(())
}
