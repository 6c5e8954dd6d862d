use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::types::{NewsCategory, NewsItem, NewsSource};

struct Template {
    source: &'static str,
    author: &'static str,
    title: &'static str,
    description: &'static str,
    url: &'static str,
    image: &'static str,
    hours_ago: i64,
    content: &'static str,
    category: NewsCategory,
}

const TEMPLATES: &[Template] = &[
    Template {
        source: "Mock News",
        author: "Tech Reporter",
        title: "Major Tech Company Announces Revolutionary AI Platform",
        description: "A leading technology company has unveiled a groundbreaking artificial intelligence platform that promises to transform how businesses operate.",
        url: "https://example.com/tech-news-1",
        image: "https://images.unsplash.com/photo-1488590528505-98d2b5aba04b?auto=format&fit=crop&w=400&q=80",
        hours_ago: 1,
        content: "This revolutionary platform represents a significant advancement in AI technology...",
        category: NewsCategory::Technology,
    },
    Template {
        source: "Business Daily",
        author: "Business Analyst",
        title: "Stock Market Reaches New Heights Amid Economic Recovery",
        description: "Global markets continue their upward trajectory as economic indicators show strong recovery across multiple sectors.",
        url: "https://example.com/business-news-1",
        image: "https://images.unsplash.com/photo-1611974789855-9c2a0a7236a3?auto=format&fit=crop&w=400&q=80",
        hours_ago: 2,
        content: "The stock market surge is being driven by strong corporate earnings...",
        category: NewsCategory::Business,
    },
    Template {
        source: "Sports Central",
        author: "Sports Writer",
        title: "Championship Finals Set to Break Viewership Records",
        description: "The upcoming championship game is expected to draw the largest television audience in sports history.",
        url: "https://example.com/sports-news-1",
        image: "https://images.unsplash.com/photo-1461896836934-ffe607ba8211?auto=format&fit=crop&w=400&q=80",
        hours_ago: 3,
        content: "Anticipation is building as two powerhouse teams prepare for the ultimate showdown...",
        category: NewsCategory::Sports,
    },
    Template {
        source: "Health News",
        author: "Medical Correspondent",
        title: "New Health Study Reveals Benefits of Regular Exercise",
        description: "Researchers have discovered additional health benefits of maintaining a consistent exercise routine.",
        url: "https://example.com/health-news-1",
        image: "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b?auto=format&fit=crop&w=400&q=80",
        hours_ago: 4,
        content: "The comprehensive study followed participants over five years...",
        category: NewsCategory::Health,
    },
    Template {
        source: "Entertainment Weekly",
        author: "Entertainment Reporter",
        title: "Blockbuster Movie Breaks Opening Weekend Records",
        description: "The highly anticipated film has shattered previous box office records in its opening weekend.",
        url: "https://example.com/entertainment-news-1",
        image: "https://images.unsplash.com/photo-1489599859473-790b99926305?auto=format&fit=crop&w=400&q=80",
        hours_ago: 5,
        content: "The film's success has exceeded all studio expectations...",
        category: NewsCategory::Entertainment,
    },
    Template {
        source: "Science Today",
        author: "Science Writer",
        title: "Scientists Discover New Species in Deep Ocean",
        description: "Marine biologists have identified several new species during a recent deep-sea exploration mission.",
        url: "https://example.com/science-news-1",
        image: "https://images.unsplash.com/photo-1559827260-dc66d52bef19?auto=format&fit=crop&w=400&q=80",
        hours_ago: 6,
        content: "The expedition used advanced submersible technology to explore previously unreachable depths...",
        category: NewsCategory::Science,
    },
    Template {
        source: "General News",
        author: "News Reporter",
        title: "Community Initiative Brings Positive Change to Local Area",
        description: "A grassroots community program has made significant improvements to the quality of life in the neighborhood.",
        url: "https://example.com/general-news-1",
        image: "https://images.unsplash.com/photo-1582213782179-e0d53f98f2ca?auto=format&fit=crop&w=400&q=80",
        hours_ago: 7,
        content: "The initiative has brought together residents from all walks of life...",
        category: NewsCategory::General,
    },
];

/// Static stand-in articles for `categories` (all of them when empty).
/// Every call mints new ids.
pub fn mock_news(categories: &[NewsCategory], now: DateTime<Utc>) -> Vec<NewsItem> {
    TEMPLATES
        .iter()
        .filter(|t| categories.is_empty() || categories.contains(&t.category))
        .map(|t| NewsItem {
            id: uuid::Uuid::new_v4().to_string(),
            title: t.title.to_string(),
            description: t.description.to_string(),
            url: t.url.to_string(),
            url_to_image: Some(t.image.to_string()),
            source: NewsSource {
                id: Some("mock".to_string()),
                name: t.source.to_string(),
            },
            author: Some(t.author.to_string()),
            published_at: (now - Duration::hours(t.hours_ago))
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            category: t.category,
            content: Some(t.content.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn filters_by_category() {
        let items = mock_news(&[NewsCategory::Technology], now());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].url, "https://example.com/tech-news-1");
        assert_eq!(items[0].published_at, "2024-03-01T11:00:00.000Z");
    }

    #[test]
    fn empty_request_returns_every_template() {
        let items = mock_news(&[], now());
        assert_eq!(items.len(), NewsCategory::HEADLINES.len());
    }

    #[test]
    fn ids_are_fresh_per_call() {
        let a = mock_news(&[], now());
        let b = mock_news(&[], now());
        let ids: HashSet<_> = a.iter().chain(b.iter()).map(|n| n.id.clone()).collect();
        assert_eq!(ids.len(), a.len() + b.len());
    }
}
