use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Result;
use crate::http::{ApiRequest, Transport};
use crate::mapping::{PlaceholderPost, PlaceholderUser};
use crate::sampling::Sampler;
use crate::types::{SocialCategory, SocialPost};

pub const MAX_MATCHES: usize = 5;

/// Keyword search over the public placeholder post source.
pub struct PostSearch {
    transport: Arc<dyn Transport>,
    sampler: Arc<Sampler>,
    base_url: String,
    timeout: Duration,
}

impl PostSearch {
    pub fn new(
        transport: Arc<dyn Transport>,
        sampler: Arc<Sampler>,
        base_url: String,
        timeout: Duration,
    ) -> Self {
        Self {
            transport,
            sampler,
            base_url,
            timeout,
        }
    }

    pub fn from_config(transport: Arc<dyn Transport>, sampler: Arc<Sampler>, cfg: &Config) -> Self {
        Self::new(transport, sampler, cfg.posts_base_url.clone(), cfg.posts_timeout())
    }

    /// Up to five posts whose title or body contains `query`, ignoring case,
    /// dressed up with synthetic engagement. Failures yield an empty list.
    pub async fn search(&self, query: &str) -> Vec<SocialPost> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        match self.try_search(&needle).await {
            Ok(posts) => {
                debug!(query, count = posts.len(), "social search done");
                posts
            }
            Err(e) => {
                warn!(query, error = %e, "social search failed");
                Vec::new()
            }
        }
    }

    async fn try_search(&self, needle: &str) -> Result<Vec<SocialPost>> {
        let (posts, users) = tokio::join!(
            self.fetch::<PlaceholderPost>("posts"),
            self.fetch::<PlaceholderUser>("users")
        );
        let (posts, users) = (posts?, users?);
        let users: HashMap<u64, PlaceholderUser> = users.into_iter().map(|u| (u.id, u)).collect();

        Ok(posts
            .into_iter()
            .filter(|p| {
                p.title.to_lowercase().contains(needle) || p.body.to_lowercase().contains(needle)
            })
            .take(MAX_MATCHES)
            .map(|p| {
                let user = users.get(&p.user_id);
                self.dress(p, user)
            })
            .collect())
    }

    fn dress(&self, post: PlaceholderPost, user: Option<&PlaceholderUser>) -> SocialPost {
        let (username, handle) = match user {
            Some(u) => (u.name.clone(), format!("@{}", u.username)),
            None => (format!("User {}", post.user_id), format!("@user{}", post.user_id)),
        };
        SocialPost {
            id: post.id,
            user_id: post.user_id,
            username,
            handle,
            avatar: format!("https://picsum.photos/seed/user-{}/100/100", post.user_id),
            title: Some(post.title),
            body: post.body,
            hashtags: Vec::new(),
            category: SocialCategory::Search,
            image: format!("https://picsum.photos/seed/{}/300/200", post.id),
            timestamp: self.sampler.recent(chrono::Duration::days(7)),
            likes: self.sampler.between(5..=504),
            comments: self.sampler.between(1..=50),
            shares: self.sampler.between(1..=25),
        }
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>> {
        let url = format!("{}/{resource}", self.base_url.trim_end_matches('/'));
        let req = ApiRequest::get(url, self.timeout);
        self.transport.get(&req).await?.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::FixedClock;
    use crate::testing::{json, timeout, StubTransport};
    use chrono::{TimeZone, Utc};
    use serde_json::json as j;

    fn search(stub: Arc<StubTransport>) -> PostSearch {
        let clock = Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()));
        PostSearch::new(
            stub,
            Arc::new(Sampler::seeded(9, clock)),
            "https://posts.test/".into(),
            Duration::from_secs(5),
        )
    }

    fn source() -> Arc<StubTransport> {
        StubTransport::new(|req| {
            if req.url.ends_with("/users") {
                json(j!([{
                    "id": 1,
                    "name": "Leanne Graham",
                    "username": "Bret",
                    "email": "l@x.io"
                }]))
            } else {
                let posts: Vec<_> = (1..=8)
                    .map(|i| {
                        let user_id = if i % 2 == 0 { 1 } else { 7 };
                        let body = if i == 3 {
                            "nothing here"
                        } else {
                            "Quia ET dolor"
                        };
                        j!({"userId": user_id, "id": i, "title": format!("Post {i}"), "body": body})
                    })
                    .collect();
                json(j!(posts))
            }
        })
    }

    #[tokio::test]
    async fn matches_case_insensitively_and_caps() {
        let stub = source();
        let posts = search(stub.clone()).search("et DOLOR").await;
        assert_eq!(posts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 4, 5, 6]);
        assert!(posts.iter().all(|p| p.category == SocialCategory::Search));
        assert_eq!(stub.call_count(), 2);
    }

    #[tokio::test]
    async fn attaches_user_or_placeholder_name() {
        let posts = search(source()).search("post 2").await;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].username, "Leanne Graham");
        assert_eq!(posts[0].handle, "@Bret");
        assert_eq!(posts[0].image, "https://picsum.photos/seed/2/300/200");

        let posts = search(source()).search("post 3").await;
        assert_eq!(posts[0].username, "User 7");
    }

    #[tokio::test]
    async fn engagement_in_range() {
        for p in search(source()).search("dolor").await {
            assert!((5..=504).contains(&p.likes));
            assert!((1..=50).contains(&p.comments));
            assert!((1..=25).contains(&p.shares));
            assert!(p.title.is_some());
        }
    }

    #[tokio::test]
    async fn failure_yields_empty() {
        let stub = StubTransport::new(|req| {
            if req.url.ends_with("/users") {
                timeout(req)
            } else {
                json(j!([]))
            }
        });
        assert!(search(stub).search("dolor").await.is_empty());
    }

    #[tokio::test]
    async fn blank_query_issues_no_requests() {
        let stub = StubTransport::unreachable();
        assert!(search(stub.clone()).search("   ").await.is_empty());
        assert_eq!(stub.call_count(), 0);
    }
}
