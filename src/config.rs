use crate::api::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

pub const DEFAULT_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_PREFIX: &str = "/katib";

/// Where and how to reach the Katib UI backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub url: String,
    pub prefix: String,
    /// Unset means the HTTP client's own defaults apply.
    pub timeout_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            url: DEFAULT_URL.to_owned(),
            prefix: DEFAULT_PREFIX.to_owned(),
            timeout_ms: None,
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Config::from_toml(&text)
    }

    /// Defaults overridden by `KATIB_UI_URL`, `KATIB_UI_PREFIX` and `KATIB_UI_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        let mut config = Config::default();
        if let Ok(url) = std::env::var("KATIB_UI_URL") {
            config.url = url;
        }
        if let Ok(prefix) = std::env::var("KATIB_UI_PREFIX") {
            config.prefix = prefix;
        }
        config.timeout_ms = std::env::var("KATIB_UI_TIMEOUT_MS")
            .ok()
            .and_then(|timeout| timeout.parse().ok());
        config
    }

    pub fn api_url(&self) -> String {
        let url = self.url.trim_end_matches('/');
        match self.prefix.trim_matches('/') {
            "" => url.to_owned(),
            prefix => format!("{}/{}", url, prefix),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::from_toml("url = \"http://katib.local/\"").unwrap();
        assert_eq!(config.prefix, DEFAULT_PREFIX);
        assert_eq!(config.api_url(), "http://katib.local/katib");
        assert_eq!(config.timeout(), None);

        let bare = Config::from_toml("prefix = \"\"").unwrap();
        assert_eq!(bare.api_url(), DEFAULT_URL);
    }

    #[test]
    fn timeout_in_milliseconds() {
        let config = Config::from_toml("timeout_ms = 1500").unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn invalid_toml_is_reported() {
        assert!(matches!(Config::from_toml("url = "), Err(ConfigError::Toml(_))));
    }
}
