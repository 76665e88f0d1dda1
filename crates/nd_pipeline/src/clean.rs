//! Text cleaning: strip markup and URLs, keep only sentences with
//! enough tokens to carry information.

use lazy_static::lazy_static;
use regex::Regex;

use nd_core::Document;

use crate::sentences::split_sentences;

lazy_static! {
    static ref TAG_RE: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref URL_RE: Regex = Regex::new(r"(https?://|www\.)\S+").unwrap();
}

/// Sentences with this many tokens or fewer are treated as fragments.
const MIN_SENTENCE_TOKENS: usize = 3;

/// Clean a batch of documents.
///
/// Each input yields a new document with identical metadata and
/// rewritten (possibly empty) content; inputs are never mutated.
pub fn clean_documents(documents: &[Document]) -> Vec<Document> {
    documents
        .iter()
        .map(|doc| doc.with_content(clean_text(&doc.page_content)))
        .collect()
}

/// Strip HTML-like tags and URL tokens, then keep only sentences with
/// more than [`MIN_SENTENCE_TOKENS`] whitespace-separated tokens,
/// rejoined with single spaces.
pub fn clean_text(text: &str) -> String {
    let text = TAG_RE.replace_all(text, "");
    let text = URL_RE.replace_all(&text, "");
    let text = text.trim();

    split_sentences(text)
        .into_iter()
        .filter(|s| s.split_whitespace().count() > MIN_SENTENCE_TOKENS)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use nd_core::DocMetadata;

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

    #[test]
    fn strips_tags_and_urls() {
        let cleaned = clean_text(
            "<p>The mission was a <b>complete</b> success overall.</p> \
             Details at https://example.com/story and www.example.org today.",
        );
        assert!(!cleaned.contains('<'));
        assert!(!cleaned.contains("http"));
        assert!(!cleaned.contains("www"));
        assert!(cleaned.contains("The mission was a complete success overall."));
    }

    #[test]
    fn discards_short_fragments() {
        let cleaned = clean_text("Breaking news. Researchers published a detailed climate report today.");
        assert_eq!(
            cleaned,
            "Researchers published a detailed climate report today."
        );
    }

    #[test]
    fn idempotent_on_already_clean_text() {
        let once = clean_text(
            "The committee approved the measure on Friday. \
             Observers expect the vote to pass next week.",
        );
        assert_eq!(clean_text(&once), once);
    }

    #[test]
    fn empty_after_stripping_yields_empty_content_not_an_error() {
        let docs = clean_documents(&[doc("<div><span></span></div> https://only.example.com")]);
        assert_eq!(docs.len(), 1);
        assert!(docs[0].page_content.is_empty());
        assert_eq!(docs[0].metadata.source, "test");
    }

    #[test]
    fn metadata_survives_cleaning_unchanged() {
        let input = doc("<i>Short.</i> A sufficiently long sentence survives the cleaner here.");
        let cleaned = clean_documents(std::slice::from_ref(&input));
        assert_eq!(cleaned[0].metadata.title, input.metadata.title);
        assert_eq!(cleaned[0].metadata.source, input.metadata.source);
        assert_ne!(cleaned[0].page_content, input.page_content);
    }
}
