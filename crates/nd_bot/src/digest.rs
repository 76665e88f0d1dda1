//! Digest and detail flows: fetch, normalize, clean, summarize.
//!
//! This layer is transport-free so the pipeline behavior can be tested
//! against mock sources and summarizers; the command handlers turn the
//! replies into chat messages.

use std::sync::Arc;

use tracing::{debug, info};
use url::Url;

use nd_core::{Document, Error, NewsSource, Result, Summarizer};
use nd_inference::summarize_or_sentinel;
use nd_pipeline::{clean_documents, news_to_documents};

use crate::session::{Page, SessionStore};

#[derive(Debug)]
pub enum DigestReply {
    Item {
        /// Zero-based position of the article in the session list.
        index: usize,
        total: usize,
        title: String,
        summary: String,
        url: Option<Url>,
    },
    Exhausted,
}

#[derive(Debug)]
pub enum DetailReply {
    Summary { text: String, url: Option<Url> },
    NoMatches,
}

pub struct DigestService {
    source: Arc<dyn NewsSource>,
    summarizer: Arc<dyn Summarizer>,
    sessions: SessionStore,
    query: String,
}

impl DigestService {
    pub fn new(source: Arc<dyn NewsSource>, summarizer: Arc<dyn Summarizer>, query: String) -> Self {
        Self {
            source,
            summarizer,
            sessions: SessionStore::new(),
            query,
        }
    }

    /// Whether the next digest call for this chat will hit the network.
    pub async fn needs_load(&self, chat_id: i64) -> bool {
        !self.sessions.has_session(chat_id).await
    }

    /// Drop the chat's pagination state so the next digest starts over.
    pub async fn reset(&self, chat_id: i64) {
        self.sessions.clear(chat_id).await;
    }

    /// Serve the next digest item for this chat, loading the session on
    /// first use.
    pub async fn digest(&self, chat_id: i64) -> Result<DigestReply> {
        if self.needs_load(chat_id).await {
            let documents = self.load_cleaned(&self.query).await?;
            info!(chat_id, count = documents.len(), "digest session loaded");
            self.sessions.start_session(chat_id, documents).await;
        }

        // A session evicted between load and page only happens across
        // the idle TTL; exhaustion messaging is the right fallback.
        let page = match self.sessions.next_page(chat_id).await {
            Some(page) => page,
            None => return Ok(DigestReply::Exhausted),
        };

        match page {
            Page::Exhausted => Ok(DigestReply::Exhausted),
            Page::Item {
                document,
                index,
                total,
            } => {
                let summary =
                    summarize_or_sentinel(self.summarizer.as_ref(), std::slice::from_ref(&document))
                        .await;
                Ok(DigestReply::Item {
                    index,
                    total,
                    title: document.metadata.title.clone(),
                    summary,
                    url: document.metadata.url.clone(),
                })
            }
        }
    }

    /// Fresh keyword search, independent of the pagination cursor.
    pub async fn detail(&self, keyword: &str) -> Result<DetailReply> {
        let documents = self.load_cleaned(keyword).await?;

        let needle = keyword.to_lowercase();
        let matched: Vec<Document> = documents
            .into_iter()
            .filter(|doc| {
                doc.metadata.title.to_lowercase().contains(&needle)
                    || doc.page_content.to_lowercase().contains(&needle)
            })
            .collect();
        debug!(keyword, matches = matched.len(), "detail filter applied");

        if matched.is_empty() {
            return Ok(DetailReply::NoMatches);
        }

        let text = summarize_or_sentinel(self.summarizer.as_ref(), &matched).await;
        let url = matched[0].metadata.url.clone();
        Ok(DetailReply::Summary { text, url })
    }

    /// fetch -> normalize -> clean, with the empty-result checks the
    /// user-facing handlers rely on.
    async fn load_cleaned(&self, query: &str) -> Result<Vec<Document>> {
        let items = self.source.fetch(query).await?;
        if items.is_empty() {
            return Err(Error::EmptyResult);
        }

        let documents = news_to_documents(&items);
        let cleaned = clean_documents(&documents);
        if cleaned.iter().all(|d| d.page_content.is_empty()) {
            return Err(Error::EmptyAfterCleaning);
        }
        Ok(cleaned)
    }
}
