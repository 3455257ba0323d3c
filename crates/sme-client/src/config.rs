use std::time::Duration;

use sme_core::AppConfig;

/// Connection settings shared by [`crate::BackendClient`] and [`crate::MlClient`].
#[derive(Clone)]
pub struct ClientConfig {
    pub backend_url: String,
    pub ml_service_url: String,
    pub api_token: Option<String>,
    pub request_timeout: Duration,
    pub health_timeout: Duration,
    pub connect_timeout: Duration,
    /// Additional attempts after the first failure for transient errors.
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub user_agent: String,
}

impl ClientConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            backend_url: config.backend_url.clone(),
            ml_service_url: config.ml_service_url.clone(),
            api_token: config.api_token.clone(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            health_timeout: Duration::from_secs(config.health_timeout_secs),
            ..Self::default()
        }
        .with_retries(config.max_retries, config.retry_backoff_base_ms)
        .with_user_agent(&config.user_agent)
    }

    /// Points both services at `base_url` (wiremock tests).
    #[must_use]
    pub fn for_base_url(base_url: &str) -> Self {
        Self {
            backend_url: base_url.to_owned(),
            ml_service_url: base_url.to_owned(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.retry_backoff_base_ms = backoff_base_ms;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        user_agent.clone_into(&mut self.user_agent);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8080".to_owned(),
            ml_service_url: "http://localhost:8001".to_owned(),
            api_token: None,
            request_timeout: Duration::from_secs(30),
            health_timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(10),
            max_retries: 2,
            retry_backoff_base_ms: 500,
            user_agent: "sme-analytics/0.1".to_owned(),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("backend_url", &self.backend_url)
            .field("ml_service_url", &self.ml_service_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[redacted]"))
            .field("request_timeout", &self.request_timeout)
            .field("health_timeout", &self.health_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
