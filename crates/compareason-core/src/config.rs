use crate::app_config::AppConfig;
use crate::ConfigError;

pub(crate) const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
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
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// development config.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_limit = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let value = or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be at least 1".to_string()));
        }
        Ok(value)
    };

    let bind_addr = parse_addr("COMPAREASON_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default("COMPAREASON_LOG_LEVEL", "info");
    let sources_path = lookup("COMPAREASON_SOURCES_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);

    let navigation_timeout_ms = parse_u64("COMPAREASON_NAVIGATION_TIMEOUT_MS", "30000")?;
    let user_agent = or_default("COMPAREASON_USER_AGENT", DEFAULT_USER_AGENT);
    let max_retries = parse_u32("COMPAREASON_MAX_RETRIES", "1")?;
    let retry_backoff_base_ms = parse_u64("COMPAREASON_RETRY_BACKOFF_BASE_MS", "500")?;

    let default_max_results = parse_limit("COMPAREASON_DEFAULT_MAX_RESULTS", "20")?;
    let default_max_results_per_source =
        parse_limit("COMPAREASON_DEFAULT_MAX_RESULTS_PER_SOURCE", "10")?;
    let max_results_cap = parse_limit("COMPAREASON_MAX_RESULTS_CAP", "50")?;

    Ok(AppConfig {
        bind_addr,
        log_level,
        sources_path,
        navigation_timeout_ms,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        default_max_results,
        default_max_results_per_source,
        max_results_cap,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
