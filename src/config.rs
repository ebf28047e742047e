// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use crate::services::SortKey;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Where the workout document is stored
    pub workouts_file: PathBuf,
    /// List order used when a request does not name one
    pub default_sort: SortKey,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            workouts_file: PathBuf::from("data/workouts.json"),
            default_sort: SortKey::Date,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let default_sort = match env::var("DEFAULT_SORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("DEFAULT_SORT", raw))?,
            Err(_) => SortKey::Date,
        };

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            workouts_file: env::var("WORKOUTS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/workouts.json")),
            default_sort,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("WORKOUTS_FILE", "/tmp/test-workouts.json");
        env::set_var("DEFAULT_SORT", "type");

        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.workouts_file, PathBuf::from("/tmp/test-workouts.json"));
        assert_eq!(config.default_sort, SortKey::Type);

        env::set_var("DEFAULT_SORT", "speed");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("DEFAULT_SORT", _))
        ));

        env::remove_var("DEFAULT_SORT");
        env::remove_var("WORKOUTS_FILE");
    }
}
