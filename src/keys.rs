use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// External services that require an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    News,
    Movies,
}

impl Service {
    pub const ALL: [Service; 2] = [Service::News, Service::Movies];

    pub fn as_str(&self) -> &'static str {
        match self {
            Service::News => "news",
            Service::Movies => "movies",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Values shipped in sample env files that must never reach a provider.
const PLACEHOLDERS: &[&str] = &[
    "api_key",
    "apikey",
    "changeme",
    "placeholder",
    "xxx",
    "none",
    "null",
    "undefined",
];

/// API keys for the credentialed providers.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub news_api_key: Option<String>,
    pub movie_api_key: Option<String>,
}

impl Credentials {
    pub fn new(news_api_key: Option<String>, movie_api_key: Option<String>) -> Self {
        Self {
            news_api_key,
            movie_api_key,
        }
    }

    pub fn key(&self, service: Service) -> Option<&str> {
        match service {
            Service::News => self.news_api_key.as_deref(),
            Service::Movies => self.movie_api_key.as_deref(),
        }
    }

    pub fn is_service_key_valid(&self, service: Service) -> bool {
        self.key(service).is_some_and(is_usable_key)
    }

    /// Returns the trimmed key or [`Error::InvalidCredential`].
    pub fn require(&self, service: Service) -> Result<&str> {
        match self.key(service) {
            Some(k) if is_usable_key(k) => Ok(k.trim()),
            _ => Err(Error::InvalidCredential(service)),
        }
    }
}

fn is_usable_key(key: &str) -> bool {
    let k = key.trim();
    if k.is_empty() {
        return false;
    }
    let lower = k.to_ascii_lowercase();
    if lower.starts_with("your_") || lower.starts_with("your-") || lower.starts_with('<') {
        return false;
    }
    !PLACEHOLDERS.contains(&lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_blank_keys_are_invalid() {
        let c = Credentials::new(None, Some("   ".into()));
        assert!(!c.is_service_key_valid(Service::News));
        assert!(!c.is_service_key_valid(Service::Movies));
    }

    #[test]
    fn placeholders_are_invalid() {
        for p in ["your_api_key_here", "YOUR_NEWS_API_KEY", "changeme", "<omdb-key>", "undefined"] {
            let c = Credentials::new(Some(p.into()), None);
            assert!(!c.is_service_key_valid(Service::News), "{p} should be rejected");
        }
    }

    #[test]
    fn real_looking_keys_are_valid_and_trimmed() {
        let c = Credentials::new(Some(" 3f9a1c0b ".into()), Some("a1b2c3d4".into()));
        assert!(c.is_service_key_valid(Service::News));
        assert_eq!(c.require(Service::News).unwrap(), "3f9a1c0b");
        assert_eq!(c.require(Service::Movies).unwrap(), "a1b2c3d4");
    }

    #[test]
    fn require_reports_the_failing_service() {
        let c = Credentials::default();
        let err = c.require(Service::Movies).unwrap_err();
        assert!(matches!(err, Error::InvalidCredential(Service::Movies)));
        assert_eq!(err.to_string(), "movies API key is missing or invalid");
    }
}
