//! Content aggregation for a personalized dashboard: top headlines and
//! trending news, genre-based movie listings with detail enrichment,
//! synthesized social posts, and a cross-source search.
//!
//! [`Aggregator`] is the entry point. It owns one HTTP transport with a shared
//! concurrency limit and never returns an error from its fetch methods.

pub mod aggregator;
pub mod config;
pub mod enrich;
pub mod error;
pub mod http;
pub mod keys;
pub mod mapping;
pub mod mock;
pub mod movies;
pub mod news;
pub mod posts;
pub mod sampling;
pub mod social;
pub mod types;

#[cfg(test)]
mod testing;

pub use aggregator::{Aggregator, Feed, FeedRequest};
pub use config::Config;
pub use error::{Error, Result};

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::aggregator::{Aggregator, Feed, FeedRequest};
    pub use crate::config::Config;
    pub use crate::keys::{Credentials, Service};
    pub use crate::news::TrendingOptions;
    pub use crate::sampling::{Clock, FixedClock, Sampler, SystemClock};
    pub use crate::types::{
        ContentItem, ContentKind, MovieItem, NewsCategory, NewsItem, Rating, SearchResults,
        SocialCategory, SocialPost,
    };
}
