use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: HashMap<String, f64>,
}

/// Client for the public exchange-rate API backing the currency converter.
#[derive(Clone)]
pub struct RatesClient {
    client: Client,
    base_url: String,
}

impl RatesClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Convert `amount` between two currency codes. Identical source and
    /// target currencies skip the request entirely.
    pub async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64> {
        let from = from.to_ascii_uppercase();
        let to = to.to_ascii_uppercase();
        if from == to {
            debug!("Identical currencies ({}), skipping rate lookup", from);
            return Ok(amount);
        }

        let url = format!(
            "{}/latest?amount={}&from={}&to={}",
            self.base_url, amount, from, to
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!(
                "Failed to fetch exchange rate: {}",
                response.status()
            ));
        }

        let body: RatesResponse = response.json().await?;
        body.rates
            .get(&to)
            .copied()
            .ok_or_else(|| anyhow!("No rate for {} in response", to))
    }
}
