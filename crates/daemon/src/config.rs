// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Route Daemon Contributors

//! Process configuration loaded once at startup from environment variables,
//! gathered into one struct with documented defaults so it can travel as
//! `axum::extract::State` and into the reconciler task.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "./routes.json";
const DEFAULT_ROUTE_CHECK_INTERVAL_SECS: u64 = 10;
const DEFAULT_API_TOKEN: &str = "this_is_something_secret";
const DEFAULT_PORT: u16 = 8172;

/// Startup configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: PathBuf,
    pub route_check_interval_secs: u64,
    pub api_token: String,
    pub port: u16,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a valid integer, got {value:?}")]
    InvalidInteger { var: &'static str, value: String },
}

impl Config {
    /// Load configuration from the environment, falling back to the
    /// documented defaults. Fails fast on a malformed integer value rather
    /// than silently falling back to the default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
            .into();

        let route_check_interval_secs = match env::var("ROUTE_CHECK_INTERVAL") {
            Ok(value) => value.parse().map_err(|_| ConfigError::InvalidInteger {
                var: "ROUTE_CHECK_INTERVAL",
                value,
            })?,
            Err(_) => DEFAULT_ROUTE_CHECK_INTERVAL_SECS,
        };

        let api_token =
            env::var("APITOKEN").unwrap_or_else(|_| DEFAULT_API_TOKEN.to_string());

        let port = match env::var("PORT") {
            Ok(value) => {
                value.parse().map_err(|_| ConfigError::InvalidInteger { var: "PORT", value })?
            }
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self { database_url, route_check_interval_secs, api_token, port })
    }
}
