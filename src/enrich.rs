use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};
use crate::http::{ApiRequest, Transport};
use crate::keys::{Credentials, Service};
use crate::mapping::OmdbDetail;

/// Best-effort detail lookup for a single movie.
pub struct DetailEnricher {
    transport: Arc<dyn Transport>,
    credentials: Credentials,
    base_url: String,
    timeout: Duration,
}

impl DetailEnricher {
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: Credentials,
        base_url: String,
        timeout: Duration,
    ) -> Self {
        Self {
            transport,
            credentials,
            base_url,
            timeout,
        }
    }

    /// Look the movie up by id, then by title. Never fails: an empty record
    /// means no enrichment was found.
    ///
    /// The id lookup only counts when it carries poster, runtime, genre,
    /// rating and plot. The title lookup is accepted on any success.
    pub async fn enrich(&self, imdb_id: &str, title: &str) -> OmdbDetail {
        let Ok(key) = self.credentials.require(Service::Movies) else {
            return OmdbDetail::default();
        };

        if !imdb_id.trim().is_empty() {
            match self.lookup(key, "i", imdb_id).await {
                Ok(d) if d.is_complete() => return d,
                Ok(_) => debug!(title, imdb_id, "incomplete details by id, trying title lookup"),
                Err(Error::Timeout { .. }) => {
                    debug!(title, imdb_id, "timeout on id lookup, trying title lookup")
                }
                Err(e) => {
                    debug!(title, imdb_id, error = %e, "id lookup failed, trying title lookup")
                }
            }
        }

        if title.trim().is_empty() {
            return OmdbDetail::default();
        }
        match self.lookup(key, "t", title).await {
            Ok(d) if d.succeeded() => d,
            Ok(d) => {
                let reason = d.error.as_deref().unwrap_or("unknown");
                debug!(title, reason, "no details by title");
                OmdbDetail::default()
            }
            Err(e) => {
                debug!(title, error = %e, "title lookup failed, skipping details");
                OmdbDetail::default()
            }
        }
    }

    async fn lookup(&self, key: &str, by: &str, value: &str) -> Result<OmdbDetail> {
        let req = ApiRequest::get(self.base_url.as_str(), self.timeout)
            .param("apikey", key)
            .param(by, value);
        self.transport.get(&req).await?.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{json, timeout, StubTransport};
    use serde_json::json as j;

    fn enricher(stub: Arc<StubTransport>) -> DetailEnricher {
        DetailEnricher::new(
            stub,
            Credentials::new(None, Some("k".into())),
            "https://omdb.test/".into(),
            Duration::from_secs(10),
        )
    }

    fn full_detail() -> serde_json::Value {
        j!({
            "Response": "True", "Title": "Heat", "Poster": "heat.jpg", "Runtime": "170 min",
            "Genre": "Crime", "imdbRating": "8.3", "Plot": "A heist.", "Director": "Michael Mann"
        })
    }

    #[tokio::test]
    async fn complete_id_lookup_is_used_directly() {
        let stub = StubTransport::new(|_| json(full_detail()));
        let detail = enricher(stub.clone()).enrich("tt0113277", "Heat").await;
        assert_eq!(detail.director.as_deref(), Some("Michael Mann"));
        assert_eq!(stub.call_count(), 1);
        assert_eq!(stub.calls()[0].query_value("i"), Some("tt0113277"));
    }

    #[tokio::test]
    async fn missing_plot_triggers_title_fallback() {
        let stub = StubTransport::new(|req| {
            if req.query_value("i").is_some() {
                json(j!({
                    "Response": "True",
                    "Poster": "p",
                    "Runtime": "1 min",
                    "Genre": "g",
                    "imdbRating": "5"
                }))
            } else {
                json(j!({"Response": "True", "Plot": "From title lookup."}))
            }
        });
        let detail = enricher(stub.clone()).enrich("tt1", "Some Movie").await;
        assert_eq!(detail.plot.as_deref(), Some("From title lookup."));
        assert_eq!(stub.calls_with("t", "Some Movie").len(), 1);
    }

    #[tokio::test]
    async fn id_timeout_falls_through_to_title() {
        let stub = StubTransport::new(|req| {
            if req.query_value("i").is_some() {
                timeout(req)
            } else {
                json(full_detail())
            }
        });
        let detail = enricher(stub.clone()).enrich("tt1", "Heat").await;
        assert!(detail.succeeded());
        assert_eq!(stub.call_count(), 2);
    }

    #[tokio::test]
    async fn total_failure_returns_empty_record() {
        let stub = StubTransport::new(|req| {
            if req.query_value("i").is_some() {
                json(j!({"Response": "False", "Error": "Incorrect IMDb ID."}))
            } else {
                timeout(req)
            }
        });
        let detail = enricher(stub).enrich("bad", "Nothing").await;
        assert!(detail.is_empty());

        let not_found =
            StubTransport::new(|_| json(j!({"Response": "False", "Error": "Movie not found!"})));
        assert!(enricher(not_found).enrich("tt2", "Nope").await.is_empty());
    }

    #[tokio::test]
    async fn invalid_key_skips_lookups() {
        let stub = StubTransport::unreachable();
        let e = DetailEnricher::new(
            stub.clone(),
            Credentials::default(),
            "https://omdb.test/".into(),
            Duration::from_secs(1),
        );
        assert!(e.enrich("tt1", "Heat").await.is_empty());
        assert_eq!(stub.call_count(), 0);
    }
}
