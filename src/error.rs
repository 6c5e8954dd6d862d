use crate::keys::Service;

/// Errors produced while talking to the content providers.
///
/// Only [`Error::InvalidCredential`] ever escapes an aggregator call; every
/// other variant is isolated to the request that produced it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} API key is missing or invalid")]
    InvalidCredential(Service),

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{provider} rate limit reached")]
    RateLimited { provider: &'static str },

    #[error("{provider} reported an error: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }

    pub fn is_credential(&self) -> bool {
        matches!(self, Error::InvalidCredential(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
