use std::env;
use std::str::FromStr;
use std::time::Duration;

use padel_core::DEFAULT_MAX_SCORE;
use padel_persistence::connection::DEFAULT_DATABASE_URL;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_score: i32,
    pub store_timeout_ms: u64,
    pub recent_matches_limit: u64,
    pub default_page_size: u64,
    pub bcrypt_cost: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7777,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_score: DEFAULT_MAX_SCORE,
            store_timeout_ms: 5000,
            recent_matches_limit: 20,
            default_page_size: 10,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Config {
    /// Read settings from the environment, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let config = Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: setting("PORT", env::var("PORT").ok(), defaults.port)?,
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            max_score: setting("MAX_SCORE", env::var("MAX_SCORE").ok(), defaults.max_score)?,
            store_timeout_ms: setting(
                "STORE_TIMEOUT_MS",
                env::var("STORE_TIMEOUT_MS").ok(),
                defaults.store_timeout_ms,
            )?,
            recent_matches_limit: setting(
                "RECENT_MATCHES_LIMIT",
                env::var("RECENT_MATCHES_LIMIT").ok(),
                defaults.recent_matches_limit,
            )?,
            default_page_size: setting(
                "DEFAULT_PAGE_SIZE",
                env::var("DEFAULT_PAGE_SIZE").ok(),
                defaults.default_page_size,
            )?,
            bcrypt_cost: setting(
                "BCRYPT_COST",
                env::var("BCRYPT_COST").ok(),
                defaults.bcrypt_cost,
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_score < 0 {
            return Err(ConfigError::Invalid {
                key: "MAX_SCORE",
                value: self.max_score.to_string(),
            });
        }
        // bcrypt only accepts costs in 4..=31
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }
        if self.store_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "STORE_TIMEOUT_MS",
                value: "0".to_string(),
            });
        }
        if self.default_page_size == 0 {
            return Err(ConfigError::Invalid {
                key: "DEFAULT_PAGE_SIZE",
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

fn setting<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
