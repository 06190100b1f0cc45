use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_START_WAIT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub sdk_key: String,
    /// How long startup waits for the flag client's initial sync.
    pub start_wait: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sdk_key = lookup("SDK_KEY")
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingSdkKey)?;

        let port = match lookup("PORT").filter(|p| !p.is_empty()) {
            Some(raw) => raw
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value: raw, source })?,
            None => DEFAULT_PORT,
        };

        let start_wait_secs = match lookup("START_WAIT_SECS").filter(|s| !s.is_empty()) {
            Some(raw) => raw
                .parse()
                .map_err(|source| ConfigError::InvalidStartWait { value: raw, source })?,
            None => DEFAULT_START_WAIT_SECS,
        };

        Ok(Self {
            port,
            sdk_key,
            start_wait: Duration::from_secs(start_wait_secs),
        })
    }

    pub fn addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
