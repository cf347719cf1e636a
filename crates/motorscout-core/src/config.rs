use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is invalid or the page limits are inconsistent.
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
/// Returns `ConfigError` if a value is invalid or the page limits are inconsistent.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("MOTORSCOUT_ENV", "development"))?;
    let log_level = or_default("MOTORSCOUT_LOG_LEVEL", "info");

    let default_page_size = parse_usize("MOTORSCOUT_DEFAULT_PAGE_SIZE", "20")?;
    let max_page_size = parse_usize("MOTORSCOUT_MAX_PAGE_SIZE", "100")?;
    if default_page_size == 0 || max_page_size == 0 {
        return Err(ConfigError::Validation(
            "page sizes must be at least 1".to_string(),
        ));
    }
    if default_page_size > max_page_size {
        return Err(ConfigError::Validation(format!(
            "default page size {default_page_size} exceeds max page size {max_page_size}"
        )));
    }

    let geocoder_base_url = or_default("MOTORSCOUT_GEOCODER_BASE_URL", "https://api.postcodes.io");
    let geocoder_timeout_secs = parse_u64("MOTORSCOUT_GEOCODER_TIMEOUT_SECS", "10")?;
    let geocoder_user_agent = or_default(
        "MOTORSCOUT_GEOCODER_USER_AGENT",
        "motorscout/0.1 (vehicle-search)",
    );

    Ok(AppConfig {
        env,
        log_level,
        default_page_size,
        max_page_size,
        geocoder_base_url,
        geocoder_timeout_secs,
        geocoder_user_agent,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MOTORSCOUT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
