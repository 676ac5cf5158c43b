//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is read first if present.
//!
//! | Variable            | Default                      |
//! |---------------------|------------------------------|
//! | `APP_HOST`          | `0.0.0.0`                    |
//! | `APP_PORT`          | `3000`                       |
//! | `LOG_FILTER`        | `info,campus_records=debug`  |
//! | `CURRENCY_SYMBOL`   | `$`                          |
//! | `SHORT_DATE_FORMAT` | `%-m/%-d/%Y`                 |
//! | `SEED_DEMO_DATA`    | `true`                       |

use std::env;
use std::str::FromStr;

use crate::school::Formatting;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_filter: String,
    pub formatting: Formatting,
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_filter: "info,campus_records=debug".to_string(),
            formatting: Formatting::default(),
            seed_demo_data: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            host: lookup("APP_HOST").unwrap_or(defaults.host),
            port: parsed(&lookup, "APP_PORT", defaults.port)?,
            log_filter: lookup("LOG_FILTER").unwrap_or(defaults.log_filter),
            formatting: Formatting {
                currency_symbol: lookup("CURRENCY_SYMBOL")
                    .unwrap_or(defaults.formatting.currency_symbol),
                short_date_format: date_format(&lookup)?
                    .unwrap_or(defaults.formatting.short_date_format),
            },
            seed_demo_data: parsed(&lookup, "SEED_DEMO_DATA", defaults.seed_demo_data)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn date_format<F>(lookup: &F) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup("SHORT_DATE_FORMAT") {
        Some(value) if !Formatting::is_valid_date_format(&value) => Err(ConfigError::Invalid {
            key: "SHORT_DATE_FORMAT",
            value,
        }),
        other => Ok(other),
    }
}

fn parsed<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => match value.trim().parse() {
            Ok(parsed) => Ok(parsed),
            Err(_) => Err(ConfigError::Invalid { key, value }),
        },
        None => Ok(default),
    }
}
