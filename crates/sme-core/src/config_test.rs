use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SME_ENV"));
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.backend_url, "http://localhost:8080");
    assert_eq!(cfg.ml_service_url, "http://localhost:8001");
    assert!(cfg.api_token.is_none());
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.health_timeout_secs, 10);
    assert_eq!(cfg.max_retries, 2);
    assert_eq!(cfg.retry_backoff_base_ms, 500);
    assert_eq!(cfg.session_path.to_string_lossy(), "./.sme/session.json");
    assert_eq!(cfg.user_agent, "sme-analytics/0.1");
}

#[test]
fn backend_url_override_strips_trailing_slash() {
    let mut map = HashMap::new();
    map.insert("SME_BACKEND_URL", "https://api.example.com/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.backend_url, "https://api.example.com");
}

#[test]
fn backend_url_without_scheme_fails() {
    let mut map = HashMap::new();
    map.insert("SME_BACKEND_URL", "localhost:8080");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SME_BACKEND_URL"),
        "expected InvalidEnvVar(SME_BACKEND_URL), got: {result:?}"
    );
}

#[test]
fn ml_service_url_without_scheme_fails() {
    let mut map = HashMap::new();
    map.insert("SME_ML_SERVICE_URL", "ftp://ml.internal");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SME_ML_SERVICE_URL"),
        "expected InvalidEnvVar(SME_ML_SERVICE_URL), got: {result:?}"
    );
}

#[test]
fn blank_api_token_is_treated_as_unset() {
    let mut map = HashMap::new();
    map.insert("SME_API_TOKEN", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.api_token.is_none());
}

#[test]
fn api_token_is_redacted_in_debug_output() {
    let mut map = HashMap::new();
    map.insert("SME_API_TOKEN", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn request_timeout_secs_override() {
    let mut map = HashMap::new();
    map.insert("SME_REQUEST_TIMEOUT_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 60);
}

#[test]
fn request_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("SME_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SME_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(SME_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn request_timeout_secs_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("SME_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SME_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(SME_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn max_retries_override() {
    let mut map = HashMap::new();
    map.insert("SME_MAX_RETRIES", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_retries, 5);
}

#[test]
fn max_retries_invalid() {
    let mut map = HashMap::new();
    map.insert("SME_MAX_RETRIES", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SME_MAX_RETRIES"),
        "expected InvalidEnvVar(SME_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn retry_backoff_base_ms_invalid() {
    let mut map = HashMap::new();
    map.insert("SME_RETRY_BACKOFF_BASE_MS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SME_RETRY_BACKOFF_BASE_MS"),
        "expected InvalidEnvVar(SME_RETRY_BACKOFF_BASE_MS), got: {result:?}"
    );
}

#[test]
fn session_path_override() {
    let mut map = HashMap::new();
    map.insert("SME_SESSION_PATH", "/tmp/sme/session.json");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.session_path.to_string_lossy(), "/tmp/sme/session.json");
}

#[test]
fn production_token_requires_https_backend() {
    let mut map = HashMap::new();
    map.insert("SME_ENV", "production");
    map.insert("SME_API_TOKEN", "tok");
    map.insert("SME_BACKEND_URL", "http://api.example.com");
    map.insert("SME_ML_SERVICE_URL", "https://ml.example.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SME_BACKEND_URL"),
        "expected InvalidEnvVar(SME_BACKEND_URL), got: {result:?}"
    );
}

#[test]
fn production_token_over_https_is_accepted() {
    let mut map = HashMap::new();
    map.insert("SME_ENV", "production");
    map.insert("SME_API_TOKEN", "tok");
    map.insert("SME_BACKEND_URL", "https://api.example.com");
    map.insert("SME_ML_SERVICE_URL", "https://ml.example.com");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
}

#[test]
fn development_token_allows_plain_http() {
    let mut map = HashMap::new();
    map.insert("SME_API_TOKEN", "tok");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.backend_url, "http://localhost:8080");
}

#[test]
fn production_without_token_allows_plain_http() {
    let mut map = HashMap::new();
    map.insert("SME_ENV", "production");
    assert!(build_app_config(lookup_from_map(&map)).is_ok());
}
