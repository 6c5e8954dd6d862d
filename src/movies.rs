use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::enrich::DetailEnricher;
use crate::error::Result;
use crate::http::{ApiRequest, Transport};
use crate::keys::{Credentials, Service};
use crate::mapping::{apply_details, movie_from_search_entry, OmdbSearchEntry, OmdbSearchResponse};
use crate::types::{sort_by_year_desc, MovieItem};

pub const DEFAULT_GENRES: [&str; 3] = ["action", "comedy", "drama"];
pub const MAX_PAGES_PER_GENRE: u32 = 5;
pub const RESULT_CAP: usize = 100;
/// The provider returns ten results per search page.
const PROVIDER_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone)]
pub struct MovieSettings {
    pub base_url: String,
    pub search_timeout: Duration,
    pub detail_timeout: Duration,
}

impl From<&Config> for MovieSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            base_url: cfg.movie_base_url.clone(),
            search_timeout: cfg.movie_search_timeout(),
            detail_timeout: cfg.detail_timeout(),
        }
    }
}

pub struct MovieAggregator {
    transport: Arc<dyn Transport>,
    credentials: Credentials,
    settings: MovieSettings,
    enricher: DetailEnricher,
}

impl MovieAggregator {
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: Credentials,
        settings: MovieSettings,
    ) -> Self {
        let enricher = DetailEnricher::new(
            transport.clone(),
            credentials.clone(),
            settings.base_url.clone(),
            settings.detail_timeout,
        );
        Self {
            transport,
            credentials,
            settings,
            enricher,
        }
    }

    /// Search each genre (up to five pages), enrich every hit, then sort by
    /// year, newest first, and cap the combined list.
    pub async fn fetch_by_genres<S: AsRef<str>>(&self, genres: &[S]) -> Result<Vec<MovieItem>> {
        let key = self.credentials.require(Service::Movies)?;
        let mut terms: Vec<&str> = genres
            .iter()
            .map(|g| g.as_ref().trim())
            .filter(|g| !g.is_empty())
            .collect();
        if terms.is_empty() {
            terms = DEFAULT_GENRES.to_vec();
        }

        let per_genre = join_all(terms.iter().map(|g| self.genre(key, g))).await;
        let mut movies: Vec<MovieItem> = per_genre.into_iter().flatten().collect();
        sort_by_year_desc(&mut movies);
        movies.truncate(RESULT_CAP);
        info!(count = movies.len(), genres = ?terms, "fetched movies");
        Ok(movies)
    }

    /// First page of results for `query`, enriched and sorted. Not capped.
    pub async fn search(&self, query: &str) -> Result<Vec<MovieItem>> {
        let key = self.credentials.require(Service::Movies)?;
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let mut movies = match self.search_page(key, query, 1).await {
            Ok(resp) if resp.succeeded() => self.enrich_all(resp.search, "search").await,
            Ok(resp) => {
                let reason = resp.error.as_deref().unwrap_or("no results");
                debug!(query, reason, "movie search empty");
                Vec::new()
            }
            Err(e) => {
                warn!(query, error = %e, "movie search failed");
                Vec::new()
            }
        };
        sort_by_year_desc(&mut movies);
        Ok(movies)
    }

    async fn genre(&self, key: &str, genre: &str) -> Vec<MovieItem> {
        let first = match self.search_page(key, genre, 1).await {
            Ok(resp) if resp.succeeded() => resp,
            Ok(_) => {
                debug!(genre, "no movies for genre");
                return Vec::new();
            }
            Err(e) if e.is_timeout() => {
                warn!(genre, "timeout fetching movies, skipping genre");
                return Vec::new();
            }
            Err(e) => {
                warn!(genre, error = %e, "failed to fetch movies for genre");
                return Vec::new();
            }
        };

        let pages = pages_to_fetch(first.total());
        let mut movies = self.enrich_all(first.search, genre).await;
        if pages > 1 {
            let rest = join_all((2..=pages).map(|page| self.page(key, genre, page))).await;
            movies.extend(rest.into_iter().flatten());
        }
        debug!(genre, pages, count = movies.len(), "genre done");
        movies
    }

    async fn page(&self, key: &str, genre: &str, page: u32) -> Vec<MovieItem> {
        match self.search_page(key, genre, page).await {
            Ok(resp) if resp.succeeded() => self.enrich_all(resp.search, genre).await,
            Ok(_) => Vec::new(),
            Err(e) => {
                warn!(genre, page, error = %e, "failed to fetch movie page");
                Vec::new()
            }
        }
    }

    async fn enrich_all(&self, entries: Vec<OmdbSearchEntry>, category: &str) -> Vec<MovieItem> {
        join_all(entries.into_iter().map(|entry| async move {
            let mut movie = movie_from_search_entry(entry, category);
            let detail = self.enricher.enrich(&movie.imdb_id, &movie.title).await;
            apply_details(&mut movie, detail);
            movie
        }))
        .await
    }

    async fn search_page(&self, key: &str, term: &str, page: u32) -> Result<OmdbSearchResponse> {
        let req = ApiRequest::get(self.settings.base_url.as_str(), self.settings.search_timeout)
            .param("apikey", key)
            .param("s", term)
            .param("type", "movie")
            .param("page", page);
        self.transport.get(&req).await?.json()
    }
}

/// Pages worth requesting for a reported result total.
pub fn pages_to_fetch(total_results: u32) -> u32 {
    let pages = total_results.saturating_add(PROVIDER_PAGE_SIZE - 1) / PROVIDER_PAGE_SIZE;
    pages.min(MAX_PAGES_PER_GENRE)
}
