use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub rates: RatesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub api_key: String,
    #[serde(default = "default_catalog_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatesConfig {
    #[serde(default = "default_rates_base_url")]
    pub base_url: String,
}

fn default_catalog_base_url() -> String {
    "https://www.omdbapi.com".to_string()
}

fn default_rates_base_url() -> String {
    "https://api.frankfurter.app".to_string()
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            base_url: default_rates_base_url(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig {
                api_key: PLACEHOLDER_API_KEY.to_string(),
                base_url: default_catalog_base_url(),
            },
            rates: RatesConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Missing config file means first run; start from defaults.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.is_catalog_configured() {
            return Err(anyhow::anyhow!(
                "Catalog API key is not configured. Run `matinee config set-key <KEY>` first"
            ));
        }
        if self.catalog.base_url.is_empty() {
            return Err(anyhow::anyhow!("catalog.base_url cannot be empty"));
        }
        if self.rates.base_url.is_empty() {
            return Err(anyhow::anyhow!("rates.base_url cannot be empty"));
        }
        Ok(())
    }

    pub fn is_catalog_configured(&self) -> bool {
        !self.catalog.api_key.is_empty() && self.catalog.api_key != PLACEHOLDER_API_KEY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            catalog: CatalogConfig {
                api_key: "test_key".to_string(),
                base_url: "https://catalog.example".to_string(),
            },
            rates: RatesConfig::default(),
        };

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.catalog.api_key, "test_key");
        assert_eq!(loaded.catalog.base_url, "https://catalog.example");
        assert_eq!(loaded.rates.base_url, default_rates_base_url());
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_err());
        assert!(!config.is_catalog_configured());

        config.catalog.api_key = "real_key".to_string();
        assert!(config.validate().is_ok());
        assert!(config.is_catalog_configured());
    }

    #[test]
    fn test_missing_base_url_falls_back_to_default() {
        let config: Config = toml::from_str("[catalog]\napi_key = \"k\"\n").unwrap();
        assert_eq!(config.catalog.base_url, default_catalog_base_url());
        assert_eq!(config.rates.base_url, default_rates_base_url());
    }

    #[test]
    fn test_load_or_default_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config.catalog.api_key, PLACEHOLDER_API_KEY);
    }
}
