use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// A normalized article as produced by a news source adapter.
///
/// Immutable after creation and discarded at the end of a request;
/// nothing in the pipeline persists these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub summary: String,
    pub link: Option<Url>,
    pub published: Option<DateTime<Utc>>,
    pub source: String,
}

/// A text-bearing unit flowing through the digest pipeline.
///
/// The cleaning step rewrites `page_content` only; metadata is carried
/// through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub page_content: String,
    pub metadata: DocMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocMetadata {
    pub title: String,
    pub url: Option<Url>,
    pub published: Option<DateTime<Utc>>,
    pub source: String,
}

impl Document {
    /// Build a new document with the same metadata but different content.
    pub fn with_content(&self, page_content: String) -> Self {
        Self {
            page_content,
            metadata: self.metadata.clone(),
        }
    }
}
