use std::fmt;

use async_trait::async_trait;

use crate::types::{Document, NewsItem};
use crate::Result;

/// A provider of raw news articles for a search query.
#[async_trait]
pub trait NewsSource: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch articles matching `query`, in provider order.
    ///
    /// Network and timeout failures must surface as `Error::Fetch` /
    /// `Error::FetchTimeout` so callers can offer retry messaging.
    async fn fetch(&self, query: &str) -> Result<Vec<NewsItem>>;
}

/// An external text-generation service used for summarization.
///
/// One handle is constructed at process start and shared across all
/// requests; calls are stateless.
#[async_trait]
pub trait Summarizer: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Produce a summary over the given documents.
    ///
    /// The same operation serves single-document digests and
    /// multi-document detail requests.
    async fn summarize(&self, documents: &[Document]) -> Result<String>;
}
