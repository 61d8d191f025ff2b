//! Environment-driven configuration.

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Reads `.env` (if present) and then the `ONGKIR_*` variables.
///
/// # Errors
///
/// `ConfigError::MissingEnvVar` when the pricing API base URL is unset, or
/// `ConfigError::InvalidEnvVar` for an unparsable timeout or courier list.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Same as [`load_app_config`] without touching `.env`; for callers that
/// already loaded it.
///
/// # Errors
///
/// See [`load_app_config`].
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Assembles an [`AppConfig`] from an arbitrary variable lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_owned())
    };

    let parse_secs = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default).trim().parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let api_base_url = require("ONGKIR_API_BASE_URL")?;
    let csrf_token = lookup("ONGKIR_CSRF_TOKEN")
        .ok()
        .filter(|v| !v.trim().is_empty());

    let env = parse_environment(&or_default("ONGKIR_ENV", "development"));
    let log_level = or_default("ONGKIR_LOG_LEVEL", "info");

    let request_timeout_secs = parse_secs("ONGKIR_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "ONGKIR_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("ONGKIR_USER_AGENT", "ongkir/0.1 (shipping-quote)");
    let couriers = parse_couriers(&or_default("ONGKIR_COURIERS", "jne,pos,tiki"))?;

    Ok(AppConfig {
        api_base_url,
        csrf_token,
        env,
        log_level,
        request_timeout_secs,
        user_agent,
        couriers,
    })
}

/// Anything unrecognized runs as development.
fn parse_environment(raw: &str) -> Environment {
    match raw.trim().to_ascii_lowercase().as_str() {
        "production" | "prod" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

/// Lowercase courier codes with blanks and duplicates dropped, keeping the
/// first-seen order.
pub fn normalize_courier_codes<'a, I>(codes: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut couriers: Vec<String> = Vec::new();
    for code in codes.into_iter().map(|c| c.trim().to_lowercase()) {
        if !code.is_empty() && !couriers.contains(&code) {
            couriers.push(code);
        }
    }
    couriers
}

fn parse_couriers(raw: &str) -> Result<Vec<String>, ConfigError> {
    let couriers = normalize_courier_codes(raw.split(','));
    if couriers.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "ONGKIR_COURIERS".to_string(),
            reason: "at least one courier code is required".to_string(),
        });
    }
    Ok(couriers)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
