//! Summarization clients and the digest-facing wrapper around them.

use tracing::warn;

use nd_core::{Document, Summarizer};

pub mod models;

pub use models::{create_model, Config};

/// Returned without calling the service when there is nothing to summarize.
pub const NO_DATA_SENTINEL: &str = "No data available for summarization.";

/// Substituted when the service fails or returns no usable output.
pub const NO_SUMMARY_SENTINEL: &str = "No summary available.";

/// Summarize `documents`, degrading to fixed sentinel strings.
///
/// An empty input short-circuits to [`NO_DATA_SENTINEL`] with no
/// service call; any call failure or empty output becomes
/// [`NO_SUMMARY_SENTINEL`]. Serves both the single-document digest and
/// the multi-document detail flows.
pub async fn summarize_or_sentinel(model: &dyn Summarizer, documents: &[Document]) -> String {
    if documents.is_empty() {
        return NO_DATA_SENTINEL.to_string();
    }

    match model.summarize(documents).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            warn!(model = model.name(), "summarizer returned empty output");
            NO_SUMMARY_SENTINEL.to_string()
        }
        Err(e) => {
            warn!(model = model.name(), error = %e, "summarization failed");
            NO_SUMMARY_SENTINEL.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use nd_core::{DocMetadata, Error, Result};

    fn doc(content: &str) -> Document {
        Document {
            page_content: content.to_string(),
            metadata: DocMetadata {
                title: "t".to_string(),
                url: None,
                published: None,
                source: "test".to_string(),
            },
        }
    }

    #[derive(Debug)]
    struct CountingSummarizer {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Summarizer for CountingSummarizer {
        fn name(&self) -> &str {
            "counting"
        }

        async fn summarize(&self, _documents: &[Document]) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("a summary".to_string())
        }
    }

    #[derive(Debug)]
    struct FailingSummarizer;

    #[async_trait]
    impl Summarizer for FailingSummarizer {
        fn name(&self) -> &str {
            "failing"
        }

        async fn summarize(&self, _documents: &[Document]) -> Result<String> {
            Err(Error::Summarization("backend unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn empty_input_short_circuits_without_a_service_call() {
        let model = CountingSummarizer {
            calls: AtomicUsize::new(0),
        };
        let out = summarize_or_sentinel(&model, &[]).await;
        assert_eq!(out, NO_DATA_SENTINEL);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn successful_call_returns_model_output() {
        let model = CountingSummarizer {
            calls: AtomicUsize::new(0),
        };
        let out = summarize_or_sentinel(&model, &[doc("content")]).await;
        assert_eq!(out, "a summary");
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_degrades_to_sentinel() {
        let out = summarize_or_sentinel(&FailingSummarizer, &[doc("content")]).await;
        assert_eq!(out, NO_SUMMARY_SENTINEL);
    }
}
