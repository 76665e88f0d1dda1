//! Per-chat pagination state.
//!
//! Sessions live in a process-wide map keyed by chat id. A session is
//! created the first time a chat asks for a digest, advanced one
//! document per request, and dropped again on /start, on exhaustion
//! restart, or after sitting idle past the eviction TTL.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use nd_core::Document;

/// Idle sessions older than this are evicted on the next store access.
const DEFAULT_IDLE_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone)]
struct Session {
    all_news: Vec<Document>,
    news_index: usize,
    /// Last served document as a single-element cluster, kept for the
    /// cluster-labelled detail flow.
    clusters: BTreeMap<usize, Vec<Document>>,
    last_active: DateTime<Utc>,
}

/// Outcome of one pagination step.
#[derive(Debug)]
pub enum Page {
    Item {
        document: Document,
        /// Zero-based position of the served document.
        index: usize,
        total: usize,
    },
    Exhausted,
}

pub struct SessionStore {
    inner: RwLock<HashMap<i64, Session>>,
    idle_ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            idle_ttl: Duration::hours(DEFAULT_IDLE_TTL_HOURS),
        }
    }

    #[cfg(test)]
    fn with_idle_ttl(idle_ttl: Duration) -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            idle_ttl,
        }
    }

    pub async fn has_session(&self, chat_id: i64) -> bool {
        let now = Utc::now();
        let guard = self.inner.read().await;
        guard
            .get(&chat_id)
            .map(|s| now - s.last_active <= self.idle_ttl)
            .unwrap_or(false)
    }

    /// Install a freshly loaded document list with the cursor at zero.
    pub async fn start_session(&self, chat_id: i64, documents: Vec<Document>) {
        let mut guard = self.inner.write().await;
        Self::evict_idle(&mut guard, self.idle_ttl);
        debug!(chat_id, count = documents.len(), "session created");
        guard.insert(
            chat_id,
            Session {
                all_news: documents,
                news_index: 0,
                clusters: BTreeMap::new(),
                last_active: Utc::now(),
            },
        );
    }

    /// Serve the document at the cursor and advance by one.
    ///
    /// Returns `None` when the chat has no live session (the caller
    /// must load one first) and [`Page::Exhausted`] once the cursor
    /// has walked past the end of the list.
    pub async fn next_page(&self, chat_id: i64) -> Option<Page> {
        let mut guard = self.inner.write().await;
        Self::evict_idle(&mut guard, self.idle_ttl);
        let session = guard.get_mut(&chat_id)?;
        session.last_active = Utc::now();

        if session.news_index >= session.all_news.len() {
            return Some(Page::Exhausted);
        }

        let index = session.news_index;
        let document = session.all_news[index].clone();
        session.news_index += 1;
        session.clusters = BTreeMap::from([(0, vec![document.clone()])]);

        Some(Page::Item {
            document,
            index,
            total: session.all_news.len(),
        })
    }

    /// Last served single-document cluster, if any.
    pub async fn current_cluster(&self, chat_id: i64) -> Option<Vec<Document>> {
        let guard = self.inner.read().await;
        guard
            .get(&chat_id)
            .and_then(|s| s.clusters.get(&0).cloned())
    }

    pub async fn clear(&self, chat_id: i64) {
        let mut guard = self.inner.write().await;
        if guard.remove(&chat_id).is_some() {
            debug!(chat_id, "session cleared");
        }
    }

    fn evict_idle(sessions: &mut HashMap<i64, Session>, idle_ttl: Duration) {
        let now = Utc::now();
        sessions.retain(|chat_id, s| {
            let keep = now - s.last_active <= idle_ttl;
            if !keep {
                debug!(chat_id, "evicting idle session");
            }
            keep
        });
    }
}
