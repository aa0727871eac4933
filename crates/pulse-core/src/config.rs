use crate::app_config::{AppConfig, BucketStrategy, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("PULSE_ENV", "development"));
    let bind_addr = parse_addr("PULSE_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("PULSE_LOG_LEVEL", "info");
    let user_agent = or_default(
        "PULSE_USER_AGENT",
        "pulse/0.1 (topic-sentiment; +https://github.com)",
    );
    let fetch_timeout_secs = parse_u64("PULSE_FETCH_TIMEOUT_SECS", "8")?;
    let bucketing = parse_bucketing("PULSE_BUCKETING", &or_default("PULSE_BUCKETING", "daily"))?;
    let max_items_default = parse_usize("PULSE_MAX_ITEMS", "100")?;
    let newsapi_key = lookup("NEWSAPI_KEY").ok().filter(|k| !k.trim().is_empty());
    let openai_api_key = lookup("OPENAI_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());
    let openai_model = or_default("OPENAI_MODEL", "gpt-4o-mini");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        user_agent,
        fetch_timeout_secs,
        bucketing,
        max_items_default,
        newsapi_key,
        openai_api_key,
        openai_model,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_bucketing(var: &str, s: &str) -> Result<BucketStrategy, ConfigError> {
    match s {
        "daily" => Ok(BucketStrategy::Daily),
        "hourly" => Ok(BucketStrategy::Hourly),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected 'daily' or 'hourly', got '{other}'"),
        }),
    }
}
