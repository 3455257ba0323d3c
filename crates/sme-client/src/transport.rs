//! Shared request plumbing for the backend and ML service clients.
//!
//! Calls go through [`HttpTransport::execute`] (retried) or
//! [`HttpTransport::execute_once`]. Both apply the bearer token and map the
//! services' `{ "success": false, "message": ... }` envelope to
//! [`ClientError::Api`].

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::retry::retry_with_backoff;

pub(crate) struct HttpTransport {
    client: Client,
    base_url: String,
    api_token: Option<String>,
    max_retries: u32,
    backoff_base_ms: u64,
    health_timeout: std::time::Duration,
}

impl HttpTransport {
    pub(crate) fn new(config: &ClientConfig, base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self {
            client,
            base_url: trimmed.to_owned(),
            api_token: config.api_token.clone(),
            max_retries: config.max_retries,
            backoff_base_ms: config.retry_backoff_base_ms,
            health_timeout: config.health_timeout,
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request built by `make`, retrying transient failures, and
    /// returns the JSON body. An empty 2xx body yields `Value::Null`.
    ///
    /// Only for requests that are safe to repeat (GET, PUT, DELETE and pure
    /// computations). Requests with side effects go through
    /// [`HttpTransport::execute_once`].
    pub(crate) async fn execute<F>(&self, context: &str, make: F) -> Result<Value, ClientError>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let make = &make;
        retry_with_backoff(self.max_retries, self.backoff_base_ms, move || {
            self.send(context, make)
        })
        .await
    }

    /// Sends the request built by `make` exactly once. For requests with side
    /// effects, where a timeout or 5xx does not mean the server did nothing.
    pub(crate) async fn execute_once<F>(&self, context: &str, make: F) -> Result<Value, ClientError>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        self.send(context, &make).await
    }

    async fn send<F>(&self, context: &str, make: &F) -> Result<Value, ClientError>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let response = self.authorize(make(&self.client)).send().await?;
        let status = response.status();
        let url = response.url().to_string();
        let body = response.text().await?;
        tracing::debug!(status = status.as_u16(), %url, context, "service response");

        if !status.is_success() {
            let parsed = serde_json::from_str::<Value>(&body).ok();
            if let Some(message) = parsed.as_ref().and_then(failure_message) {
                return Err(ClientError::Api(message));
            }
            if status == StatusCode::NOT_FOUND {
                return Err(ClientError::NotFound { url });
            }
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url,
                message: parsed.as_ref().and_then(detail_message),
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        let value = serde_json::from_str::<Value>(&body).map_err(|e| ClientError::Deserialize {
            context: context.to_owned(),
            source: e,
        })?;
        if let Some(message) = failure_message(&value) {
            return Err(ClientError::Api(message));
        }
        Ok(value)
    }

    /// Single-attempt GET with the health timeout; any failure is `false`.
    pub(crate) async fn is_healthy(&self, path: &str) -> bool {
        let url = self.url(path);
        let request = self.authorize(self.client.get(&url).timeout(self.health_timeout));
        match request.send().await {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                tracing::debug!(%url, error = %err, "health check failed");
                false
            }
        }
    }
}

/// `Some(message)` when the body is an object with `"success": false`.
fn failure_message(body: &Value) -> Option<String> {
    if body.get("success").and_then(Value::as_bool) != Some(false) {
        return None;
    }
    Some(detail_message(body).unwrap_or_else(|| "request failed".to_owned()))
}

fn detail_message(body: &Value) -> Option<String> {
    body.get("message")
        .or_else(|| body.get("detail"))
        .and_then(Value::as_str)
        .map(str::to_owned)
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value, context: &str) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(|e| ClientError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

/// Decodes one field of an envelope such as `{ "success": true, "schedule": {...} }`.
pub(crate) fn decode_field<T: DeserializeOwned>(
    mut value: Value,
    field: &str,
    context: &str,
) -> Result<T, ClientError> {
    let inner = value.get_mut(field).map(Value::take).unwrap_or(Value::Null);
    decode(inner, context)
}
