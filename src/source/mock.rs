//! In-memory message source for tests and host-app bring-up.
//!
//! Applies the same filtering an on-device provider would: sender
//! allow-list, timestamp bounds, include/exclude body patterns, newest
//! first, capped count. The most recent query is recorded so tests can
//! assert what the coordinator asked for.

use async_trait::async_trait;
use regex::Regex;
use tokio::sync::Mutex;

use crate::error::SourceError;
use crate::source::types::{MessageQuery, MessageSource, RawMessage};

/// Mock message source backed by a fixed message list.
pub struct MockSource {
    messages: Vec<RawMessage>,
    permission_granted: bool,
    query_error: Option<String>,
    last_query: Mutex<Option<MessageQuery>>,
}

impl MockSource {
    /// Create a mock source with permission granted and no faults.
    pub fn new(messages: Vec<RawMessage>) -> Self {
        Self {
            messages,
            permission_granted: true,
            query_error: None,
            last_query: Mutex::new(None),
        }
    }

    /// Simulate a revoked read permission.
    pub fn deny_permission(mut self) -> Self {
        self.permission_granted = false;
        self
    }

    /// Make every fetch fail with a query error.
    pub fn fail_queries(mut self, reason: &str) -> Self {
        self.query_error = Some(reason.into());
        self
    }

    /// The query passed to the most recent fetch call.
    pub async fn last_query(&self) -> Option<MessageQuery> {
        self.last_query.lock().await.clone()
    }
}

#[async_trait]
impl MessageSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn ensure_permission(&self) -> Result<bool, SourceError> {
        Ok(self.permission_granted)
    }

    async fn fetch(&self, query: &MessageQuery) -> Result<Vec<RawMessage>, SourceError> {
        *self.last_query.lock().await = Some(query.clone());

        if !self.permission_granted {
            return Err(SourceError::PermissionDenied);
        }
        if let Some(reason) = &self.query_error {
            return Err(SourceError::Query(reason.clone()));
        }

        // Unparseable filter patterns are ignored rather than failing the
        // query, matching tolerant on-device providers.
        let include = query
            .include_body
            .as_deref()
            .and_then(|p| Regex::new(p).ok());
        let exclude = query
            .exclude_body
            .as_deref()
            .and_then(|p| Regex::new(p).ok());

        let mut matched: Vec<RawMessage> = self
            .messages
            .iter()
            .filter(|m| query.addresses.is_empty() || query.addresses.contains(&m.address))
            .filter(|m| query.since <= 0 || m.timestamp >= query.since)
            .filter(|m| query.until <= 0 || m.timestamp <= query.until)
            .filter(|m| include.as_ref().is_none_or(|re| re.is_match(&m.body)))
            .filter(|m| exclude.as_ref().is_none_or(|re| !re.is_match(&m.body)))
            .cloned()
            .collect();

        matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        matched.truncate(query.capped_limit());
        Ok(matched)
    }
}
