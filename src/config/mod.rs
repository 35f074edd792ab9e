use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub web: WebConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub sources: HashMap<String, SourceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret required as the `key` query parameter. Compared with
    /// plain string equality, exactly as clients send it.
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Upper bound for the whole upstream fetch, including body read.
    pub timeout_seconds: u64,
}

/// One named upstream feed as written in the configuration file. Validated
/// and compiled into a [`crate::models::FeedSource`] at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// URL of the upstream RSS feed.
    pub feed_url: String,
    /// Name of the item child element holding the size text.
    pub size_field: String,
    /// Regex with capture group 1 = numeric magnitude, group 2 = unit token.
    pub size_pattern: String,
    /// Lower size bound in MiB, inclusive. Defaults to 0.
    pub min_size_mib: Option<f64>,
    /// Upper size bound in MiB, inclusive. Defaults to unbounded.
    pub max_size_mib: Option<f64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web: WebConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            auth: AuthConfig {
                password: "change-me".to_string(),
            },
            upstream: UpstreamConfig::default(),
            sources: HashMap::new(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());

        if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(&config_file)?;
            Ok(toml::from_str(&contents)?)
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(&config_file, contents)?;
            Ok(default_config)
        }
    }
}
