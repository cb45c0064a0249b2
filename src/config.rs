use std::time::Duration;

use chrono::NaiveTime;
use thiserror::Error;

use crate::api::cbr::CbrClient;

/// CBR internal id of the US dollar
pub const USD_CURRENCY_CODE: &str = "R01235";

const DEFAULT_STORE_PATH: &str = "dollar_rate.json";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_REMINDER_TIME: &str = "10:00";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not a valid number of seconds: {value}")]
    InvalidTimeout { name: &'static str, value: String },
    #[error("{name} is not a valid HH:MM time: {value}")]
    InvalidTime { name: &'static str, value: String },
}

/// Runtime settings, read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub currency_code: String,
    pub store_path: String,
    pub http_timeout: Duration,
    pub reminder_time: NaiveTime,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: CbrClient::DEFAULT_BASE_URL.to_string(),
            currency_code: USD_CURRENCY_CODE.to_string(),
            store_path: DEFAULT_STORE_PATH.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            reminder_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; unset variables take their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timeout_secs = match lookup("RATE_HTTP_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout {
                    name: "RATE_HTTP_TIMEOUT_SECS",
                    value,
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let reminder_value = lookup("RATE_REMINDER_TIME")
            .unwrap_or_else(|| DEFAULT_REMINDER_TIME.to_string());
        let reminder_time = NaiveTime::parse_from_str(reminder_value.trim(), "%H:%M")
            .map_err(|_| ConfigError::InvalidTime {
                name: "RATE_REMINDER_TIME",
                value: reminder_value.clone(),
            })?;

        Ok(Self {
            base_url: lookup("CBR_BASE_URL").unwrap_or(defaults.base_url),
            currency_code: lookup("RATE_CURRENCY_CODE").unwrap_or(defaults.currency_code),
            store_path: lookup("RATE_STORE_PATH").unwrap_or(defaults.store_path),
            http_timeout: Duration::from_secs(timeout_secs),
            reminder_time,
        })
    }
}
