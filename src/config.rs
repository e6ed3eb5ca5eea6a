use serde::Deserialize;

use crate::constants::ModelConstants;
use crate::services::exchange_rate_service::DEFAULT_ENDPOINT;

fn default_offline_mode() -> bool { false }

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default = "default_offline_mode")]
    pub offline_mode: bool,
    #[serde(default)]
    pub exchange_rate: ExchangeRateConfig,
    /// Overrides for the shared constant table
    #[serde(default)]
    pub constants: ModelConstants,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExchangeRateConfig {
    pub endpoint: String,
    pub refresh_interval_s: u64,
}

impl Default for ExchangeRateConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            refresh_interval_s: 3600,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config = serde_json::from_str(content)?;
        Ok(config)
    }
}
