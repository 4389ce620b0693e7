use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use serde::Serialize;
use serde_json::Value;

use crate::config::GatewayConfig;

use super::types::{GatewayResponse, SessionRequest};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug)]
pub enum GatewayError {
    Transport(reqwest::Error),
    InvalidBody(reqwest::Error),
    InvalidToken(reqwest::header::InvalidHeaderValue),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Transport(e) => write!(f, "transport error: {e}"),
            GatewayError::InvalidBody(e) => write!(f, "invalid response body: {e}"),
            GatewayError::InvalidToken(e) => write!(f, "invalid gateway token: {e}"),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        GatewayError::Transport(e)
    }
}

/// Retry for safe (idempotent) methods only. POST is never retried.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    fn applies_to(&self, method: &Method) -> bool {
        matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
    }

    // Doubles each retry: 1, 2, 4 base units.
    fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

pub struct GatewayClient {
    http: Client,
    base_url: String,
    token: String,
    retry: RetryPolicy,
}

impl GatewayClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        // The gateway ships a self-signed certificate, so verification
        // stays off until proper CA material is distributed with the
        // snap. Revisit before exposing this to untrusted networks.
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(true)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub async fn request<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
        body: Option<&T>,
    ) -> Result<Response, GatewayError> {
        let url = format!("{}{}", self.base_url, path);

        // insert() replaces any caller-supplied value; callers cannot
        // opt out of the forced authorization and content-type.
        let mut headers = headers;
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("macaroon root={}", self.token))
                .map_err(GatewayError::InvalidToken)?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let retryable = self.retry.applies_to(&method);
        let mut attempt = 0u32;

        loop {
            let mut builder = self
                .http
                .request(method.clone(), &url)
                .headers(headers.clone());
            if let Some(body) = body {
                builder = builder.json(body);
            }

            let result = builder.send().await;
            let failed = match &result {
                Ok(resp) => resp.status().is_server_error(),
                Err(e) => e.is_connect() || e.is_timeout(),
            };

            if retryable && failed && attempt < self.retry.max_retries {
                attempt += 1;
                let delay = self.retry.backoff(attempt);
                tracing::debug!(%method, path, attempt, ?delay, "gateway request failed, retrying");
                tokio::time::sleep(delay).await;
                continue;
            }

            return result.map_err(GatewayError::Transport);
        }
    }

    pub async fn create_session(
        &self,
        session: &SessionRequest,
    ) -> Result<GatewayResponse, GatewayError> {
        let resp = self
            .request(Method::POST, "/1.0/sessions", HeaderMap::new(), Some(session))
            .await?;
        resp.json().await.map_err(GatewayError::InvalidBody)
    }

    pub async fn list_applications(&self) -> Result<GatewayResponse, GatewayError> {
        let resp = self
            .request(Method::GET, "/1.0/applications/", HeaderMap::new(), None::<&Value>)
            .await?;
        resp.json().await.map_err(GatewayError::InvalidBody)
    }
}
