use async_trait::async_trait;

use nd_core::{Document, Result, Summarizer};

/// Deterministic offline summarizer: first 20 words of the joined
/// content. Used in tests and as a no-dependency fallback.
#[derive(Debug)]
pub struct DummyModel;

#[async_trait]
impl Summarizer for DummyModel {
    fn name(&self) -> &str {
        "dummy"
    }

    async fn summarize(&self, documents: &[Document]) -> Result<String> {
        let joined = documents
            .iter()
            .map(|d| d.page_content.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let words: Vec<&str> = joined.split_whitespace().take(20).collect();
        Ok(words.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nd_core::DocMetadata;

    #[tokio::test]
    async fn truncates_to_twenty_words() {
        let content = (0..40).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let doc = Document {
            page_content: content,
            metadata: DocMetadata {
                title: "t".to_string(),
                url: None,
                published: None,
                source: "test".to_string(),
            },
        };

        let summary = DummyModel.summarize(&[doc]).await.unwrap();
        assert_eq!(summary.split_whitespace().count(), 20);
        assert!(summary.starts_with("w0 w1"));
    }
}
