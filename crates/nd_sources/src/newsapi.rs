//! NewsAPI-style article source.
//!
//! Talks to an `/everything`-shaped search endpoint and maps the provider
//! JSON into [`NewsItem`] records. Per-item mapping failures are logged
//! and skipped so one malformed article never aborts a whole batch.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use nd_core::{Error, NewsItem, NewsSource, Result};

const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// Some providers reject requests without a browser-like agent.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/133.0.0.0 Safari/537.36";

const PUBLISHED_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const UNTITLED: &str = "Untitled article";

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    status: String,
    articles: Option<Vec<RawArticle>>,
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    url: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
}

pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl NewsApiClient {
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn fetch_query(&self, query: &str) -> Result<Vec<NewsItem>> {
        let url = format!("{}/everything", self.base_url);
        debug!(query, "fetching news");

        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("apiKey", self.api_key.as_str())])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::FetchTimeout(e.to_string())
                } else {
                    Error::Fetch(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!(
                "news endpoint returned HTTP {status}"
            )));
        }

        let body: NewsApiResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                Error::FetchTimeout(e.to_string())
            } else {
                Error::Fetch(e.to_string())
            }
        })?;

        if body.status != "ok" {
            return Err(Error::Fetch(format!(
                "provider error {}: {}",
                body.code.unwrap_or_else(|| "unknown".to_string()),
                body.message.unwrap_or_else(|| "no message".to_string()),
            )));
        }

        let items: Vec<NewsItem> = body
            .articles
            .unwrap_or_default()
            .into_iter()
            .filter_map(map_article)
            .collect();
        debug!(count = items.len(), "mapped news items");
        Ok(items)
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    fn name(&self) -> &str {
        "newsapi"
    }

    async fn fetch(&self, query: &str) -> Result<Vec<NewsItem>> {
        self.fetch_query(query).await
    }
}

/// Map one provider article to a [`NewsItem`].
///
/// Returns `None` (and logs) when the article carries a link that does
/// not parse as an absolute URL; every other defect degrades to a
/// placeholder or empty field.
fn map_article(raw: RawArticle) -> Option<NewsItem> {
    let title = match raw.title {
        Some(t) if !t.trim().is_empty() => t,
        _ => UNTITLED.to_string(),
    };

    // Description wins over content; empty strings fall through.
    let summary = [raw.description, raw.content]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .unwrap_or_default();

    let link = match raw.url {
        Some(u) => match Url::parse(&u) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(url = %u, error = %e, "skipping article with invalid URL");
                return None;
            }
        },
        None => None,
    };

    let published = raw.published_at.as_deref().and_then(parse_published);

    Some(NewsItem {
        title,
        summary,
        link,
        published,
        source: "newsapi".to_string(),
    })
}

/// Parse the provider's `YYYY-MM-DDTHH:MM:SSZ` timestamps; anything else
/// becomes `None` rather than an error.
fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, PUBLISHED_FORMAT)
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}
