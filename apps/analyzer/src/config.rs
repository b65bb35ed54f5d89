use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Origin of the hosted ATS scoring service.
pub const DEFAULT_BASE_URL: &str = "https://resume-analyzer-bcbc.onrender.com";
pub const SCORE_PATH: &str = "/api/score";
pub const HEALTH_PATH: &str = "/health";

/// Application configuration loaded from environment variables.
/// Every variable has a default; only malformed values are rejected.
#[derive(Debug, Clone)]
pub struct Config {
    pub client: ClientConfig,
    pub rust_log: String,
}

/// Settings handed to the HTTP client. Nothing here is global; tests build
/// their own pointing at a local stub server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Send cookies with cross-origin requests.
    pub with_credentials: bool,
    /// `None` lets a request run until the transport gives up.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            with_credentials: true,
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn score_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), SCORE_PATH)
    }

    pub fn health_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), HEALTH_PATH)
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so parsing can be
    /// exercised without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("ANALYZER_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let with_credentials = match lookup("ANALYZER_WITH_CREDENTIALS") {
            Some(raw) => parse_bool(&raw)
                .with_context(|| format!("ANALYZER_WITH_CREDENTIALS has invalid value '{raw}'"))?,
            None => true,
        };

        let timeout = match lookup("ANALYZER_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(
                raw.trim()
                    .parse::<u64>()
                    .context("ANALYZER_TIMEOUT_SECS must be a whole number of seconds")?,
            )),
            None => None,
        };

        Ok(Config {
            client: ClientConfig {
                base_url,
                with_credentials,
                timeout,
            },
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.client, ClientConfig::default());
        assert_eq!(config.client.base_url, DEFAULT_BASE_URL);
        assert!(config.client.with_credentials);
        assert!(config.client.timeout.is_none());
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("ANALYZER_BASE_URL", "http://localhost:5000"),
            ("ANALYZER_WITH_CREDENTIALS", "no"),
            ("ANALYZER_TIMEOUT_SECS", "30"),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.client.base_url, "http://localhost:5000");
        assert!(!config.client.with_credentials);
        assert_eq!(config.client.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.rust_log, "debug");
    }

    #[test]
    fn test_invalid_credentials_flag_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("ANALYZER_WITH_CREDENTIALS", "maybe")]))
            .unwrap_err();
        assert!(err.to_string().contains("ANALYZER_WITH_CREDENTIALS"));
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("ANALYZER_TIMEOUT_SECS", "soon")])).is_err());
    }

    #[test]
    fn test_urls_join_without_double_slash() {
        let client = ClientConfig {
            base_url: "http://127.0.0.1:8080/".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(client.score_url(), "http://127.0.0.1:8080/api/score");
        assert_eq!(client.health_url(), "http://127.0.0.1:8080/health");
    }
}
