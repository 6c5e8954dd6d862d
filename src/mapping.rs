//! Provider payloads and their normalization into the display model.

use serde::Deserialize;

use crate::types::{MovieItem, NewsCategory, NewsItem, NewsSource, Rating, NOT_AVAILABLE};

const DESCRIPTION_FROM_CONTENT_CHARS: usize = 160;

// --- News provider ---

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiResponse {
    #[serde(default)]
    pub status: String,
    pub code: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub articles: Vec<RawArticle>,
}

impl NewsApiResponse {
    pub fn is_error(&self) -> bool {
        self.status == "error"
    }

    pub fn is_rate_limited(&self) -> bool {
        self.code.as_deref() == Some("rateLimited")
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    #[serde(default)]
    pub source: Option<RawSource>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<String>,
    pub content: Option<String>,
}

/// Normalize one article. Articles without a title, a url, or any text are
/// rejected.
pub fn news_item_from_article(article: RawArticle, category: NewsCategory) -> Option<NewsItem> {
    let title = non_empty(article.title)?;
    let url = non_empty(article.url)?;
    let content = non_empty(article.content);
    let description = match non_empty(article.description) {
        Some(d) => d,
        None => content.as_deref().map(|c| truncate_chars(c, DESCRIPTION_FROM_CONTENT_CHARS))?,
    };
    let source = article.source.unwrap_or_default();
    Some(NewsItem {
        id: uuid::Uuid::new_v4().to_string(),
        title,
        description,
        url,
        url_to_image: non_empty(article.url_to_image),
        source: NewsSource {
            id: non_empty(source.id),
            name: non_empty(source.name).unwrap_or_else(|| "Unknown".to_string()),
        },
        author: non_empty(article.author),
        published_at: non_empty(article.published_at).unwrap_or_default(),
        category,
        content,
    })
}

// --- Movie provider ---

#[derive(Debug, Deserialize, Default)]
pub struct OmdbSearchResponse {
    #[serde(rename = "Response", default)]
    pub response: String,
    #[serde(rename = "Search", default)]
    pub search: Vec<OmdbSearchEntry>,
    #[serde(rename = "totalResults")]
    pub total_results: Option<String>,
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl OmdbSearchResponse {
    pub fn succeeded(&self) -> bool {
        self.response == "True" && !self.search.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.total_results
            .as_deref()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbSearchEntry {
    pub title: Option<String>,
    pub year: Option<String>,
    pub poster: Option<String>,
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
}

/// Detail lookup payload. Also serves as the enrichment record: a default
/// (all `None`) value means "no enrichment".
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbDetail {
    pub response: Option<String>,
    pub error: Option<String>,
    pub title: Option<String>,
    pub poster: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub rated: Option<String>,
    pub released: Option<String>,
    pub awards: Option<String>,
    pub ratings: Option<Vec<Rating>>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    pub metascore: Option<String>,
    pub box_office: Option<String>,
}

impl OmdbDetail {
    pub fn succeeded(&self) -> bool {
        self.response.as_deref() == Some("True")
    }

    /// Successful and carrying every field a detail card needs.
    pub fn is_complete(&self) -> bool {
        self.succeeded()
            && [&self.poster, &self.runtime, &self.genre, &self.imdb_rating, &self.plot]
                .iter()
                .all(|f| f.as_deref().is_some_and(|v| !v.trim().is_empty()))
    }

    pub fn is_empty(&self) -> bool {
        *self == OmdbDetail::default()
    }
}

pub fn movie_from_search_entry(entry: OmdbSearchEntry, category: &str) -> MovieItem {
    let na = || NOT_AVAILABLE.to_string();
    MovieItem {
        id: uuid::Uuid::new_v4().to_string(),
        title: non_empty(entry.title).unwrap_or_default(),
        year: non_empty(entry.year).unwrap_or_else(na),
        poster: non_empty(entry.poster).unwrap_or_else(na),
        kind: non_empty(entry.kind).unwrap_or_else(|| "movie".to_string()),
        imdb_id: non_empty(entry.imdb_id).unwrap_or_default(),
        category: category.to_string(),
        runtime: na(),
        genre: na(),
        director: na(),
        writer: na(),
        actors: na(),
        plot: na(),
        language: na(),
        country: na(),
        rated: na(),
        released: na(),
        awards: na(),
        ratings: Vec::new(),
        imdb_rating: na(),
        metascore: na(),
        box_office: na(),
    }
}

/// Merge a detail record into a movie. An empty record leaves the movie
/// untouched.
pub fn apply_details(movie: &mut MovieItem, detail: OmdbDetail) {
    if detail.is_empty() {
        return;
    }
    let or_na = |v: Option<String>| non_empty(v).unwrap_or_else(|| NOT_AVAILABLE.to_string());
    if let Some(p) = non_empty(detail.poster) {
        movie.poster = p;
    }
    movie.runtime = or_na(detail.runtime);
    movie.genre = or_na(detail.genre);
    movie.director = or_na(detail.director);
    movie.writer = or_na(detail.writer);
    movie.actors = or_na(detail.actors);
    movie.plot = or_na(detail.plot);
    movie.language = or_na(detail.language);
    movie.country = or_na(detail.country);
    movie.rated = or_na(detail.rated);
    movie.released = or_na(detail.released);
    movie.awards = or_na(detail.awards);
    movie.ratings = detail.ratings.unwrap_or_default();
    movie.imdb_rating = or_na(detail.imdb_rating);
    movie.metascore = or_na(detail.metascore);
    movie.box_office = or_na(detail.box_office);
}

// --- Generic post source ---

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderPost {
    pub user_id: u64,
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlaceholderUser {
    pub id: u64,
    pub name: String,
    pub username: String,
}

// --- helpers ---

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(
        title: Option<&str>,
        url: Option<&str>,
        desc: Option<&str>,
        content: Option<&str>,
    ) -> RawArticle {
        RawArticle {
            source: Some(RawSource {
                id: None,
                name: Some("Wire".into()),
            }),
            title: title.map(Into::into),
            url: url.map(Into::into),
            description: desc.map(Into::into),
            content: content.map(Into::into),
            published_at: Some("2024-05-01T10:00:00Z".into()),
            ..Default::default()
        }
    }

    #[test]
    fn rejects_articles_missing_required_fields() {
        let cat = NewsCategory::General;
        let no_title = article(None, Some("u"), Some("d"), None);
        let no_url = article(Some("t"), Some(""), Some("d"), None);
        let no_text = article(Some("t"), Some("u"), None, None);
        let content_only = article(Some("t"), Some("u"), None, Some("body"));
        assert!(news_item_from_article(no_title, cat).is_none());
        assert!(news_item_from_article(no_url, cat).is_none());
        assert!(news_item_from_article(no_text, cat).is_none());
        assert!(news_item_from_article(content_only, cat).is_some());
    }

    #[test]
    fn description_backfills_from_content() {
        let long = "x".repeat(300);
        let raw = article(Some("t"), Some("u"), Some(" "), Some(&long));
        let item = news_item_from_article(raw, NewsCategory::Science).unwrap();
        assert_eq!(item.description.chars().count(), 160);
        assert_eq!(item.content.as_deref(), Some(long.as_str()));
        assert_eq!(item.category, NewsCategory::Science);
        assert_eq!(item.source.name, "Wire");
    }

    #[test]
    fn decodes_omdb_search_payload() {
        let raw = r#"{"Search":[{"Title":"Heat","Year":"1995","imdbID":"tt0113277",
                                 "Type":"movie","Poster":"N/A"}],
                      "totalResults":"42","Response":"True"}"#;
        let resp: OmdbSearchResponse = serde_json::from_str(raw).unwrap();
        assert!(resp.succeeded());
        assert_eq!(resp.total(), 42);
        let movie = movie_from_search_entry(resp.search[0].clone(), "crime");
        assert_eq!(movie.imdb_id, "tt0113277");
        assert_eq!(movie.poster, NOT_AVAILABLE);
        assert_eq!(movie.category, "crime");
    }

    #[test]
    fn failed_search_has_no_results() {
        let resp: OmdbSearchResponse =
            serde_json::from_str(r#"{"Response":"False","Error":"Movie not found!"}"#).unwrap();
        assert!(!resp.succeeded());
        assert_eq!(resp.total(), 0);
    }

    #[test]
    fn completeness_requires_all_card_fields() {
        let mut d = OmdbDetail {
            response: Some("True".into()),
            poster: Some("p".into()),
            runtime: Some("120 min".into()),
            genre: Some("Drama".into()),
            imdb_rating: Some("7.1".into()),
            plot: Some("A plot.".into()),
            ..Default::default()
        };
        assert!(d.is_complete());
        d.plot = None;
        assert!(!d.is_complete());
        d.plot = Some("N/A".into());
        assert!(d.is_complete());
    }

    #[test]
    fn apply_details_fills_sentinels() {
        let mut m = movie_from_search_entry(
            OmdbSearchEntry {
                title: Some("Heat".into()),
                poster: Some("search.jpg".into()),
                ..Default::default()
            },
            "crime",
        );
        apply_details(&mut m, OmdbDetail::default());
        assert_eq!(m.poster, "search.jpg");

        apply_details(
            &mut m,
            OmdbDetail {
                response: Some("True".into()),
                director: Some("Michael Mann".into()),
                poster: Some("".into()),
                ratings: Some(vec![Rating {
                    source: "Internet Movie Database".into(),
                    value: "8.3/10".into(),
                }]),
                ..Default::default()
            },
        );
        assert_eq!(m.director, "Michael Mann");
        assert_eq!(m.poster, "search.jpg");
        assert_eq!(m.plot, NOT_AVAILABLE);
        assert_eq!(m.ratings.len(), 1);
    }

    #[test]
    fn provider_extras_are_ignored() {
        let raw = r#"{"status":"ok","totalResults":3,"articles":[]}"#;
        let resp: NewsApiResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.status, "ok");
        assert!(resp.articles.is_empty());

        let raw = r#"[{"id":1,"name":"Leanne Graham","username":"Bret",
                       "email":"Sincere@april.biz","phone":"1-770-736-8031"}]"#;
        let users: Vec<PlaceholderUser> = serde_json::from_str(raw).unwrap();
        assert_eq!(users[0].username, "Bret");
    }
}
