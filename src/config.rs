use std::env;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};

use crate::ingest::{DEFAULT_SOURCE_TIMEOUT, DEFAULT_SOURCE_URL};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub source_url: String,
    pub source_timeout: Duration,
    pub cors_enabled: bool,
    pub load_on_start: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5005,
            database_url: "memory://".to_string(),
            source_url: DEFAULT_SOURCE_URL.to_string(),
            source_timeout: DEFAULT_SOURCE_TIMEOUT,
            cors_enabled: true,
            load_on_start: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup, falling back to
    /// defaults for absent keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("APP_HOST").unwrap_or(defaults.host);

        let port = match lookup("APP_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .context("APP_PORT must be a valid u16")?,
            None => defaults.port,
        };

        let database_url = lookup("DATABASE_URL").unwrap_or(defaults.database_url);
        let source_url = lookup("SOURCE_URL").unwrap_or(defaults.source_url);

        let source_timeout = match lookup("SOURCE_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse::<u64>()
                    .context("SOURCE_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            None => defaults.source_timeout,
        };

        let cors_enabled = match lookup("CORS_ENABLED") {
            Some(raw) => parse_flag("CORS_ENABLED", &raw)?,
            None => defaults.cors_enabled,
        };

        let load_on_start = match lookup("LOAD_ON_START") {
            Some(raw) => parse_flag("LOAD_ON_START", &raw)?,
            None => defaults.load_on_start,
        };

        Ok(Self {
            host,
            port,
            database_url,
            source_url,
            source_timeout,
            cors_enabled,
            load_on_start,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("{name} must be a boolean, got '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.address(), "0.0.0.0:5005");
    }

    #[test]
    fn values_are_read_from_the_lookup() {
        let config = AppConfig::from_lookup(lookup(&[
            ("APP_HOST", "127.0.0.1"),
            ("APP_PORT", "8080"),
            ("DATABASE_URL", "file:///var/lib/salesboard/store.json"),
            ("SOURCE_URL", "http://mirror.local/data.json"),
            ("SOURCE_TIMEOUT_SECS", "5"),
            ("CORS_ENABLED", "off"),
            ("LOAD_ON_START", "TRUE"),
        ]))
        .unwrap();

        assert_eq!(config.address(), "127.0.0.1:8080");
        assert_eq!(config.database_url, "file:///var/lib/salesboard/store.json");
        assert_eq!(config.source_url, "http://mirror.local/data.json");
        assert_eq!(config.source_timeout, Duration::from_secs(5));
        assert!(!config.cors_enabled);
        assert!(config.load_on_start);
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(AppConfig::from_lookup(lookup(&[("APP_PORT", "http")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("SOURCE_TIMEOUT_SECS", "-1")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("CORS_ENABLED", "maybe")])).is_err());
    }
}
