use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files. Used by tests
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a config that
/// points at the local development services.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

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

    let parse_url = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        let trimmed = raw.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected an http(s) URL, got '{raw}'"),
            });
        }
        Ok(trimmed.to_string())
    };

    let env = parse_environment(&or_default("SME_ENV", "development"))?;
    let log_level = or_default("SME_LOG_LEVEL", "info");

    let backend_url = parse_url("SME_BACKEND_URL", "http://localhost:8080")?;
    let ml_service_url = parse_url("SME_ML_SERVICE_URL", "http://localhost:8001")?;
    let api_token = lookup("SME_API_TOKEN").ok().filter(|t| !t.trim().is_empty());

    let request_timeout_secs = parse_u64("SME_REQUEST_TIMEOUT_SECS", "30")?;
    let health_timeout_secs = parse_u64("SME_HEALTH_TIMEOUT_SECS", "10")?;
    let max_retries = parse_u32("SME_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("SME_RETRY_BACKOFF_BASE_MS", "500")?;

    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SME_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be greater than zero".to_string(),
        });
    }

    // Production tokens only go over https.
    if env == Environment::Production && api_token.is_some() {
        for (var, url) in [
            ("SME_BACKEND_URL", &backend_url),
            ("SME_ML_SERVICE_URL", &ml_service_url),
        ] {
            if !url.starts_with("https://") {
                return Err(ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: "https is required in production when SME_API_TOKEN is set"
                        .to_string(),
                });
            }
        }
    }

    let session_path = PathBuf::from(or_default("SME_SESSION_PATH", "./.sme/session.json"));
    let user_agent = or_default("SME_USER_AGENT", "sme-analytics/0.1");

    Ok(AppConfig {
        env,
        log_level,
        backend_url,
        ml_service_url,
        api_token,
        request_timeout_secs,
        health_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        session_path,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SME_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
