use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::http::{ApiRequest, Transport};
use crate::keys::{Credentials, Service};
use crate::mapping::{news_item_from_article, NewsApiResponse, RawArticle};
use crate::mock::mock_news;
use crate::sampling::Clock;
use crate::types::{NewsCategory, NewsItem};

const PROVIDER: &str = "news";
const HEADLINES_PAGE_SIZE: u32 = 100;
const SEARCH_PAGE_SIZE: u32 = 5;

#[derive(Debug, Clone)]
pub struct NewsSettings {
    pub base_url: String,
    pub country: String,
    pub language: String,
    pub timeout: Duration,
}

impl From<&Config> for NewsSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            base_url: cfg.news_base_url.clone(),
            country: cfg.country.clone(),
            language: cfg.language.clone(),
            timeout: cfg.news_timeout(),
        }
    }
}

/// Options for the popularity-sorted trending feed.
#[derive(Debug, Clone)]
pub struct TrendingOptions {
    pub query: Option<String>,
    pub language: Option<String>,
    /// Explicit ISO-8601 lower bound, sent as `from`.
    pub from: Option<String>,
    /// Explicit ISO-8601 upper bound, sent as `to`.
    pub to: Option<String>,
    /// Informational only; not translated into a date range.
    pub time_window_days: u32,
    pub page_size: u32,
    pub page: u32,
}

impl Default for TrendingOptions {
    fn default() -> Self {
        Self {
            query: None,
            language: None,
            from: None,
            to: None,
            time_window_days: 7,
            page_size: 20,
            page: 1,
        }
    }
}

pub struct NewsAggregator {
    transport: Arc<dyn Transport>,
    credentials: Credentials,
    settings: NewsSettings,
    clock: Arc<dyn Clock>,
}

impl NewsAggregator {
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: Credentials,
        settings: NewsSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            transport,
            credentials,
            settings,
            clock,
        }
    }

    /// Top headlines for each requested category, deduplicated by url.
    /// Falls back to mock articles when nothing usable comes back.
    pub async fn fetch_by_categories<S: AsRef<str>>(
        &self,
        categories: &[S],
    ) -> Result<Vec<NewsItem>> {
        let key = self.credentials.require(Service::News)?;
        let resolved = resolve_categories(categories);
        debug!(categories = ?resolved, "fetching headlines");

        let per_category = join_all(resolved.iter().map(|&c| self.headlines(key, c))).await;
        let items = dedup_by_url(per_category.into_iter().flatten());

        if items.is_empty() {
            warn!(categories = ?resolved, "no news articles fetched, using mock data");
            return Ok(mock_news(&resolved, self.clock.now()));
        }
        info!(count = items.len(), "fetched headlines");
        Ok(items)
    }

    pub async fn fetch_trending(&self, options: &TrendingOptions) -> Result<Vec<NewsItem>> {
        let key = self.credentials.require(Service::News)?;
        debug!(time_window_days = options.time_window_days, "fetching trending news");

        let query = options
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .unwrap_or("news");
        let language = options
            .language
            .as_deref()
            .unwrap_or(&self.settings.language);
        let req = ApiRequest::get(self.endpoint("everything"), self.settings.timeout)
            .param("apiKey", key)
            .param("q", query)
            .param("sortBy", "popularity")
            .param("language", language)
            .param("pageSize", options.page_size)
            .param("page", options.page)
            .param_opt("from", options.from.as_deref())
            .param_opt("to", options.to.as_deref());

        match self.articles(&req).await {
            Ok(articles) => Ok(normalize(articles, NewsCategory::Trending)),
            Err(e) => {
                log_failure("trending", &e);
                Ok(Vec::new())
            }
        }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<NewsItem>> {
        let key = self.credentials.require(Service::News)?;
        let query = query.trim();
        if query.is_empty() {
            debug!("empty news search query");
            return Ok(Vec::new());
        }
        let req = ApiRequest::get(self.endpoint("everything"), self.settings.timeout)
            .param("apiKey", key)
            .param("q", query)
            .param("language", &self.settings.language)
            .param("pageSize", SEARCH_PAGE_SIZE)
            .param("sortBy", "relevancy");

        match self.articles(&req).await {
            Ok(articles) => Ok(normalize(articles, NewsCategory::Search)),
            Err(e) => {
                log_failure("search", &e);
                Ok(Vec::new())
            }
        }
    }

    async fn headlines(&self, key: &str, category: NewsCategory) -> Vec<NewsItem> {
        let req = ApiRequest::get(self.endpoint("top-headlines"), self.settings.timeout)
            .param("apiKey", key)
            .param("country", &self.settings.country)
            .param("category", category)
            .param("pageSize", HEADLINES_PAGE_SIZE);
        match self.articles(&req).await {
            Ok(articles) => {
                if articles.is_empty() {
                    debug!(%category, "no articles for category");
                }
                normalize(articles, category)
            }
            Err(e) => {
                log_failure(category.as_str(), &e);
                Vec::new()
            }
        }
    }

    async fn articles(&self, req: &ApiRequest) -> Result<Vec<RawArticle>> {
        let resp: NewsApiResponse = self.transport.get(req).await?.json()?;
        if resp.is_error() {
            if resp.is_rate_limited() {
                return Err(Error::RateLimited { provider: PROVIDER });
            }
            let message = resp.message.unwrap_or_else(|| "unknown API error".to_string());
            return Err(Error::Provider {
                provider: PROVIDER,
                message,
            });
        }
        Ok(resp.articles)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), path)
    }
}

/// Map requested names onto headline categories. No input means all of
/// them; input with nothing recognizable means `general`.
pub fn resolve_categories<S: AsRef<str>>(requested: &[S]) -> Vec<NewsCategory> {
    if requested.is_empty() {
        return NewsCategory::HEADLINES.to_vec();
    }
    let mut out = Vec::new();
    for name in requested {
        match name.as_ref().parse::<NewsCategory>() {
            Ok(c) if c.is_headline() && !out.contains(&c) => out.push(c),
            Ok(_) => {}
            Err(e) => debug!(error = %e, "dropping category"),
        }
    }
    if out.is_empty() {
        info!("no valid categories selected, falling back to general");
        out.push(NewsCategory::General);
    }
    out
}

/// Keep the first occurrence of each url.
pub fn dedup_by_url<I: IntoIterator<Item = NewsItem>>(items: I) -> Vec<NewsItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|n| seen.insert(n.url.clone()))
        .collect()
}

fn normalize(articles: Vec<RawArticle>, category: NewsCategory) -> Vec<NewsItem> {
    let total = articles.len();
    let items = dedup_by_url(
        articles
            .into_iter()
            .filter_map(|a| news_item_from_article(a, category)),
    );
    if items.len() < total {
        debug!(%category, dropped = total - items.len(), "discarded unusable articles");
    }
    items
}

fn log_failure(scope: &str, err: &Error) {
    match err {
        Error::RateLimited { .. } => {
            warn!(
                scope,
                code = "rateLimited",
                "news provider rate limit exceeded; free tier allows 100 requests per day"
            )
        }
        Error::Timeout { .. } => warn!(scope, "news request timed out"),
        other => warn!(scope, error = %other, "news request failed"),
    }
}
