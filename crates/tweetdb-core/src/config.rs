use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_INGEST_BATCH_SIZE: usize = 1000;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_batch_size = |var: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, &DEFAULT_INGEST_BATCH_SIZE.to_string());
        match raw.parse::<usize>() {
            Ok(0) => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "batch size must be greater than zero".to_string(),
            }),
            Ok(n) => Ok(n),
            Err(e) => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
        }
    };

    let database_url = lookup("DATABASE_URL")
        .ok()
        .filter(|v| !v.trim().is_empty());
    let log_level = or_default("TWEETDB_LOG_LEVEL", "info");
    let companies_path = lookup("TWEETDB_COMPANIES_PATH").ok().map(PathBuf::from);

    let db_max_connections = parse_u32("TWEETDB_DB_MAX_CONNECTIONS", "5")?;
    let db_min_connections = parse_u32("TWEETDB_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("TWEETDB_DB_ACQUIRE_TIMEOUT_SECS", "10")?;
    let ingest_batch_size = parse_batch_size("TWEETDB_INGEST_BATCH_SIZE")?;

    Ok(AppConfig {
        database_url,
        log_level,
        companies_path,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        ingest_batch_size,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
