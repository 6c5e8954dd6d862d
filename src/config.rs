use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::keys::Credentials;

pub const DEFAULT_NEWS_URL: &str = "https://newsapi.org/v2";
pub const DEFAULT_MOVIE_URL: &str = "https://www.omdbapi.com/";
pub const DEFAULT_POSTS_URL: &str = "https://jsonplaceholder.typicode.com";

/// Runtime configuration. Every field is optional in the TOML file.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub news_api_key: Option<String>,
    pub movie_api_key: Option<String>,
    pub news_base_url: String,
    pub movie_base_url: String,
    pub posts_base_url: String,
    pub country: String,
    pub language: String,
    /// Upper bound on concurrent outbound requests.
    pub max_in_flight: usize,
    pub news_timeout_ms: u64,
    pub movie_search_timeout_ms: u64,
    pub detail_timeout_ms: u64,
    pub posts_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            news_api_key: None,
            movie_api_key: None,
            news_base_url: DEFAULT_NEWS_URL.to_string(),
            movie_base_url: DEFAULT_MOVIE_URL.to_string(),
            posts_base_url: DEFAULT_POSTS_URL.to_string(),
            country: "us".to_string(),
            language: "en".to_string(),
            max_in_flight: 8,
            news_timeout_ms: 10_000,
            movie_search_timeout_ms: 15_000,
            detail_timeout_ms: 10_000,
            posts_timeout_ms: 10_000,
        }
    }
}

impl Config {
    /// Load from an explicit path, `$FEEDBOARD_CONFIG`, or the per-user config
    /// dir (in that order), then apply environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut cfg = match explicit {
            Some(p) => Self::from_file(p)?,
            None => match std::env::var_os("FEEDBOARD_CONFIG") {
                Some(p) => Self::from_file(Path::new(&p))?,
                None => match default_config_path() {
                    Some(p) if p.exists() => Self::from_file(&p)?,
                    _ => Self::default(),
                },
            },
        };
        cfg.apply_env(|k| std::env::var(k).ok());
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file: {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("parsing config file: {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(Into::into)
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        if let Some(v) = get("FEEDBOARD_NEWS_API_KEY") {
            self.news_api_key = Some(v);
        }
        if let Some(v) = get("FEEDBOARD_MOVIE_API_KEY") {
            self.movie_api_key = Some(v);
        }
        if let Some(v) = get("FEEDBOARD_NEWS_URL") {
            self.news_base_url = v;
        }
        if let Some(v) = get("FEEDBOARD_MOVIE_URL") {
            self.movie_base_url = v;
        }
        if let Some(v) = get("FEEDBOARD_POSTS_URL") {
            self.posts_base_url = v;
        }
        if let Some(n) = get("FEEDBOARD_MAX_IN_FLIGHT").and_then(|s| s.parse().ok()) {
            self.max_in_flight = n;
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.news_api_key.clone(), self.movie_api_key.clone())
    }

    pub fn news_timeout(&self) -> Duration {
        Duration::from_millis(self.news_timeout_ms)
    }

    pub fn movie_search_timeout(&self) -> Duration {
        Duration::from_millis(self.movie_search_timeout_ms)
    }

    pub fn detail_timeout(&self) -> Duration {
        Duration::from_millis(self.detail_timeout_ms)
    }

    pub fn posts_timeout(&self) -> Duration {
        Duration::from_millis(self.posts_timeout_ms)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "feedboard", "feedboard").map(|p| p.config_dir().join("config.toml"))
}
