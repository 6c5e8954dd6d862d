use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel the movie provider uses for "not available".
pub const NOT_AVAILABLE: &str = "N/A";

// --- News ---

/// Category attached to a news item. The first seven are the provider's
/// headline categories; `Trending` and `Search` mark non-categorical fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsCategory {
    Business,
    Entertainment,
    General,
    Health,
    Science,
    Sports,
    Technology,
    Trending,
    Search,
}

impl NewsCategory {
    /// Categories accepted by the headlines endpoint.
    pub const HEADLINES: [NewsCategory; 7] = [
        NewsCategory::Business,
        NewsCategory::Entertainment,
        NewsCategory::General,
        NewsCategory::Health,
        NewsCategory::Science,
        NewsCategory::Sports,
        NewsCategory::Technology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NewsCategory::Business => "business",
            NewsCategory::Entertainment => "entertainment",
            NewsCategory::General => "general",
            NewsCategory::Health => "health",
            NewsCategory::Science => "science",
            NewsCategory::Sports => "sports",
            NewsCategory::Technology => "technology",
            NewsCategory::Trending => "trending",
            NewsCategory::Search => "search",
        }
    }

    pub fn is_headline(&self) -> bool {
        Self::HEADLINES.contains(self)
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NewsCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "business" => Ok(NewsCategory::Business),
            "entertainment" => Ok(NewsCategory::Entertainment),
            "general" => Ok(NewsCategory::General),
            "health" => Ok(NewsCategory::Health),
            "science" => Ok(NewsCategory::Science),
            "sports" => Ok(NewsCategory::Sports),
            "technology" => Ok(NewsCategory::Technology),
            "trending" => Ok(NewsCategory::Trending),
            "search" => Ok(NewsCategory::Search),
            other => Err(format!("unknown news category `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsSource {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Canonical article link; news results are deduplicated on it.
    pub url: String,
    pub url_to_image: Option<String>,
    pub source: NewsSource,
    pub author: Option<String>,
    /// ISO-8601, as reported by the provider.
    pub published_at: String,
    pub category: NewsCategory,
    pub content: Option<String>,
}

// --- Movies ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Rating {
    pub source: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieItem {
    pub id: String,
    pub title: String,
    /// Release year, possibly a range such as `2019-2021`.
    pub year: String,
    pub poster: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    /// Genre or query the movie was found with.
    pub category: String,
    pub runtime: String,
    pub genre: String,
    pub director: String,
    pub writer: String,
    pub actors: String,
    pub plot: String,
    pub language: String,
    pub country: String,
    pub rated: String,
    pub released: String,
    pub awards: String,
    pub ratings: Vec<Rating>,
    pub imdb_rating: String,
    pub metascore: String,
    pub box_office: String,
}

impl MovieItem {
    /// Leading year as a number; `"2021-2022"` yields 2021.
    pub fn leading_year(&self) -> Option<i32> {
        leading_year(&self.year)
    }
}

pub fn leading_year(year: &str) -> Option<i32> {
    let digits: String = year.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Stable sort, most recent first. Unparseable years go last.
pub fn sort_by_year_desc(movies: &mut [MovieItem]) {
    movies.sort_by(|a, b| b.leading_year().cmp(&a.leading_year()));
}

// --- Social ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocialCategory {
    #[serde(rename = "Technology")]
    Technology,
    #[serde(rename = "Health & Wellness")]
    HealthWellness,
    #[serde(rename = "Fitness")]
    Fitness,
    #[serde(rename = "Travel & Lifestyle")]
    TravelLifestyle,
    #[serde(rename = "Humor & Relatable Moments")]
    Humor,
    #[serde(rename = "search")]
    Search,
}

impl SocialCategory {
    pub const BANK: [SocialCategory; 5] = [
        SocialCategory::Technology,
        SocialCategory::HealthWellness,
        SocialCategory::Fitness,
        SocialCategory::TravelLifestyle,
        SocialCategory::Humor,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SocialCategory::Technology => "Technology",
            SocialCategory::HealthWellness => "Health & Wellness",
            SocialCategory::Fitness => "Fitness",
            SocialCategory::TravelLifestyle => "Travel & Lifestyle",
            SocialCategory::Humor => "Humor & Relatable Moments",
            SocialCategory::Search => "search",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let l = label.trim();
        Self::BANK
            .into_iter()
            .chain([SocialCategory::Search])
            .find(|c| c.label().eq_ignore_ascii_case(l))
    }
}

impl fmt::Display for SocialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialPost {
    pub id: u64,
    pub user_id: u64,
    pub username: String,
    pub handle: String,
    pub avatar: String,
    pub title: Option<String>,
    pub body: String,
    pub hashtags: Vec<String>,
    pub category: SocialCategory,
    pub image: String,
    pub timestamp: DateTime<Utc>,
    pub likes: u32,
    pub comments: u32,
    pub shares: u32,
}

// --- Unified display model ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    News,
    Movie,
    Social,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::News => "news",
            ContentKind::Movie => "movie",
            ContentKind::Social => "social",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One card on the dashboard. The variant is fixed by the aggregator that
/// built the item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentItem {
    News(NewsItem),
    Movie(MovieItem),
    Social(SocialPost),
}

impl ContentItem {
    pub fn kind(&self) -> ContentKind {
        match self {
            ContentItem::News(_) => ContentKind::News,
            ContentItem::Movie(_) => ContentKind::Movie,
            ContentItem::Social(_) => ContentKind::Social,
        }
    }

    /// Key used by favorites storage.
    pub fn id(&self) -> String {
        match self {
            ContentItem::News(n) => n.id.clone(),
            ContentItem::Movie(m) => m.id.clone(),
            ContentItem::Social(s) => s.id.to_string(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ContentItem::News(n) => &n.title,
            ContentItem::Movie(m) => &m.title,
            ContentItem::Social(s) => s.title.as_deref().unwrap_or(&s.body),
        }
    }
}

impl From<NewsItem> for ContentItem {
    fn from(v: NewsItem) -> Self {
        ContentItem::News(v)
    }
}

impl From<MovieItem> for ContentItem {
    fn from(v: MovieItem) -> Self {
        ContentItem::Movie(v)
    }
}

impl From<SocialPost> for ContentItem {
    fn from(v: SocialPost) -> Self {
        ContentItem::Social(v)
    }
}

/// Results of a cross-source search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub news: Vec<NewsItem>,
    pub movies: Vec<MovieItem>,
    pub social: Vec<SocialPost>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.news.is_empty() && self.movies.is_empty() && self.social.is_empty()
    }

    pub fn len(&self) -> usize {
        self.news.len() + self.movies.len() + self.social.len()
    }
}

#[cfg(test)]
pub(crate) fn movie_fixture(title: &str, year: &str) -> MovieItem {
    crate::mapping::movie_from_search_entry(
        crate::mapping::OmdbSearchEntry {
            title: Some(title.to_string()),
            year: Some(year.to_string()),
            poster: None,
            kind: Some("movie".to_string()),
            imdb_id: Some(format!("tt-{title}")),
        },
        "test",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_sort_is_descending_and_stable() {
        let mut movies = vec![
            movie_fixture("a", "2019"),
            movie_fixture("b", "2021-2022"),
            movie_fixture("c", "2020"),
            movie_fixture("d", "2019"),
        ];
        sort_by_year_desc(&mut movies);
        let titles: Vec<_> = movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["b", "c", "a", "d"]);
    }

    #[test]
    fn leading_year_handles_ranges_and_garbage() {
        assert_eq!(leading_year("2019\u{2013}2021"), Some(2019));
        assert_eq!(leading_year("2005-"), Some(2005));
        assert_eq!(leading_year("N/A"), None);
        assert_eq!(leading_year(""), None);
    }

    #[test]
    fn unparseable_years_sort_last() {
        let mut movies = vec![movie_fixture("x", "N/A"), movie_fixture("y", "1999")];
        sort_by_year_desc(&mut movies);
        assert_eq!(movies[0].title, "y");
    }

    #[test]
    fn news_category_round_trips_through_str() {
        for c in NewsCategory::HEADLINES {
            assert_eq!(c.as_str().parse::<NewsCategory>().unwrap(), c);
        }
        assert!("Sports ".parse::<NewsCategory>().is_ok());
        assert!("weather".parse::<NewsCategory>().is_err());
        assert!(!NewsCategory::Trending.is_headline());
    }

    #[test]
    fn social_labels_match_case_insensitively() {
        assert_eq!(SocialCategory::from_label("fitness"), Some(SocialCategory::Fitness));
        assert_eq!(
            SocialCategory::from_label("health & wellness"),
            Some(SocialCategory::HealthWellness)
        );
        assert_eq!(SocialCategory::from_label("cooking"), None);
    }

    #[test]
    fn content_item_carries_explicit_kind() {
        let item: ContentItem = movie_fixture("Heat", "1995").into();
        assert_eq!(item.kind(), ContentKind::Movie);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "movie");
        assert_eq!(json["imdbID"], "tt-Heat");
        assert_eq!(json["type"], "movie");
        assert_eq!(json["boxOffice"], NOT_AVAILABLE);
    }
}
