use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, Result};

const SLOW_WARN: Duration = Duration::from_secs(5);

/// A single GET against a provider endpoint.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub timeout: Duration,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            timeout,
        }
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn param_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    /// First value for `key`, if present.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Full URL including query string.
    pub fn to_url(&self) -> std::result::Result<Url, url::ParseError> {
        Url::parse_with_params(&self.url, &self.query)
    }

    /// URL used in logs and errors. Never includes query parameters so API
    /// keys stay out of diagnostics.
    pub fn display_url(&self) -> &str {
        &self.url
    }
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn ok(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body. Providers send their error envelopes with non-2xx
    /// statuses, so decoding is attempted regardless of status.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        match serde_json::from_str(&self.body) {
            Ok(v) => Ok(v),
            Err(_) if !self.is_success() => Err(Error::Status {
                url: self.url.clone(),
                status: self.status,
            }),
            Err(source) => Err(Error::Decode {
                url: self.url.clone(),
                source,
            }),
        }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

/// `reqwest` transport with a shared in-flight limit.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    permits: Arc<Semaphore>,
}

impl HttpTransport {
    pub fn new(max_in_flight: usize) -> std::result::Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("feedboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, max_in_flight))
    }

    pub fn with_client(client: reqwest::Client, max_in_flight: usize) -> Self {
        Self {
            client,
            permits: Arc::new(Semaphore::new(max_in_flight.max(1))),
        }
    }

    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("permits_available", &self.permits.available_permits())
            .finish()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let shown_url = request.display_url().to_string();
        let url = request.to_url().map_err(|e| Error::Provider {
            provider: "http",
            message: format!("invalid url {shown_url}: {e}"),
        })?;

        // Held only for this exchange; callers fan out freely.
        let _permit = self.permits.acquire().await.map_err(|_| Error::Provider {
            provider: "http",
            message: "transport is shut down".to_string(),
        })?;

        let start = Instant::now();
        debug!(url = %shown_url, "GET");
        let map_err = |source: reqwest::Error| {
            if source.is_timeout() {
                Error::Timeout {
                    url: shown_url.clone(),
                }
            } else {
                // reqwest's message embeds the full url, query and key included.
                Error::Transport {
                    url: shown_url.clone(),
                    source: source.without_url(),
                }
            }
        };
        let resp = self
            .client
            .get(url)
            .timeout(request.timeout)
            .send()
            .await
            .map_err(map_err)?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(map_err)?;

        let elapsed = start.elapsed();
        if elapsed > SLOW_WARN {
            warn!(url = %shown_url, ?elapsed, "slow provider response");
        }
        Ok(ApiResponse {
            url: shown_url,
            status,
            body,
        })
    }
}
