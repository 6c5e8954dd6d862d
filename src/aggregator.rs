use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::Config;
use crate::http::{HttpTransport, Transport};
use crate::keys::{Credentials, Service};
use crate::movies::{MovieAggregator, MovieSettings};
use crate::news::{NewsAggregator, NewsSettings, TrendingOptions};
use crate::posts::PostSearch;
use crate::sampling::{Clock, Sampler};
use crate::social::SocialGenerator;
use crate::types::{ContentItem, MovieItem, NewsItem, SearchResults, SocialPost};

/// What to put in a combined feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRequest {
    pub news_categories: Vec<String>,
    pub movie_genres: Vec<String>,
    pub social_categories: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Feed {
    pub news: Vec<NewsItem>,
    pub movies: Vec<MovieItem>,
    pub social: Vec<SocialPost>,
}

impl Feed {
    pub fn len(&self) -> usize {
        self.news.len() + self.movies.len() + self.social.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// News first, then movies, then social posts.
    pub fn into_items(self) -> Vec<ContentItem> {
        let mut items = Vec::with_capacity(self.len());
        items.extend(self.news.into_iter().map(ContentItem::from));
        items.extend(self.movies.into_iter().map(ContentItem::from));
        items.extend(self.social.into_iter().map(ContentItem::from));
        items
    }
}

/// Composition root: wires one transport and sampler into every source and
/// exposes entry points that never fail. Missing credentials degrade to an
/// empty list.
pub struct Aggregator {
    credentials: Credentials,
    news: NewsAggregator,
    movies: MovieAggregator,
    social: SocialGenerator,
    posts: PostSearch,
}

impl Aggregator {
    pub fn new(cfg: &Config) -> Result<Self> {
        let transport = HttpTransport::new(cfg.max_in_flight).context("building http client")?;
        Ok(Self::with_transport(cfg, Arc::new(transport), Arc::new(Sampler::from_entropy())))
    }

    pub fn with_transport(
        cfg: &Config,
        transport: Arc<dyn Transport>,
        sampler: Arc<Sampler>,
    ) -> Self {
        let credentials = cfg.credentials();
        let clock: Arc<dyn Clock> = Arc::new(SamplerClock(sampler.clone()));
        Self {
            news: NewsAggregator::new(
                transport.clone(),
                credentials.clone(),
                NewsSettings::from(cfg),
                clock,
            ),
            movies: MovieAggregator::new(
                transport.clone(),
                credentials.clone(),
                MovieSettings::from(cfg),
            ),
            social: SocialGenerator::new(sampler.clone()),
            posts: PostSearch::from_config(transport, sampler, cfg),
            credentials,
        }
    }

    pub fn news_aggregator(&self) -> &NewsAggregator {
        &self.news
    }

    pub fn movie_aggregator(&self) -> &MovieAggregator {
        &self.movies
    }

    /// Validity of each service credential, for diagnostics.
    pub fn credentials_report(&self) -> Vec<(Service, bool)> {
        Service::ALL
            .iter()
            .map(|&s| (s, self.credentials.is_service_key_valid(s)))
            .collect()
    }

    pub async fn news<S: AsRef<str>>(&self, categories: &[S]) -> Vec<NewsItem> {
        degrade("news", self.news.fetch_by_categories(categories).await)
    }

    pub async fn trending(&self, options: &TrendingOptions) -> Vec<NewsItem> {
        degrade("trending", self.news.fetch_trending(options).await)
    }

    pub async fn movies<S: AsRef<str>>(&self, genres: &[S]) -> Vec<MovieItem> {
        degrade("movies", self.movies.fetch_by_genres(genres).await)
    }

    pub fn social<S: AsRef<str>>(&self, categories: &[S]) -> Vec<SocialPost> {
        self.social.generate(categories)
    }

    /// Query news, movies and placeholder posts at once. Each field is
    /// empty when its source fails.
    pub async fn search(&self, query: &str) -> SearchResults {
        let (news, movies, social) = tokio::join!(
            self.news.search(query),
            self.movies.search(query),
            self.posts.search(query)
        );
        let results = SearchResults {
            news: degrade("news search", news),
            movies: degrade("movie search", movies),
            social,
        };
        info!(
            query,
            news = results.news.len(),
            movies = results.movies.len(),
            social = results.social.len(),
            "search done"
        );
        results
    }

    pub async fn feed(&self, request: &FeedRequest) -> Feed {
        let (news, movies) = tokio::join!(
            self.news(&request.news_categories),
            self.movies(&request.movie_genres)
        );
        Feed {
            news,
            movies,
            social: self.social(&request.social_categories),
        }
    }
}

fn degrade<T>(what: &str, result: crate::error::Result<Vec<T>>) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            error!(source = what, error = %e, "fetch failed, returning empty list");
            Vec::new()
        }
    }
}

/// Lets the news fallback share the sampler's clock.
struct SamplerClock(Arc<Sampler>);

impl Clock for SamplerClock {
    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.0.now()
    }
}
