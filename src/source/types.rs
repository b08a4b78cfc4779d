//! Shared types for message source adapters.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// Hard cap on messages per fetch, regardless of the requested limit.
pub const MAX_FETCH_LIMIT: usize = 1000;

/// Fetch limit used when the caller does not specify one.
pub const DEFAULT_FETCH_LIMIT: usize = 800;

// ── Raw message ─────────────────────────────────────────────────────

/// A raw message as returned by the device message store.
///
/// Adapters convert their native record format into this struct. The
/// record is read-only — nothing downstream mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMessage {
    /// Store-native unique ID.
    pub id: String,
    /// Conversation/thread grouping ID (if the store tracks one).
    pub thread_id: Option<String>,
    /// Sender identifier (e.g. an alphanumeric bank short code).
    pub address: String,
    /// Message body. Empty means the record is not processable.
    pub body: String,
    /// Receive time in epoch milliseconds.
    pub timestamp: i64,
    /// Store-defined type discriminator (inbox vs sent etc.).
    pub type_code: i32,
    /// Whether the user has read the message.
    pub is_read: bool,
}

// ── Query options ───────────────────────────────────────────────────

/// Mailbox to read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mailbox {
    #[default]
    Inbox,
    Sent,
    Draft,
}

/// Fetch options for a [`MessageSource`].
///
/// Every recognized field is explicit; adapters must not grow ad-hoc
/// option keys beyond this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageQuery {
    /// Maximum records to return. Clamped to [`MAX_FETCH_LIMIT`] via
    /// [`MessageQuery::capped_limit`].
    pub limit: usize,
    /// Sender allow-list. Empty means no sender filter.
    pub addresses: Vec<String>,
    /// Inclusive lower timestamp bound in epoch ms. Zero means unbounded.
    pub since: i64,
    /// Inclusive upper timestamp bound in epoch ms. Zero means unbounded.
    pub until: i64,
    /// Regex the body must match, if present.
    pub include_body: Option<String>,
    /// Regex the body must not match, if present.
    pub exclude_body: Option<String>,
    /// Which mailbox to read.
    pub mailbox: Mailbox,
}

impl Default for MessageQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_FETCH_LIMIT,
            addresses: Vec::new(),
            since: 0,
            until: 0,
            include_body: None,
            exclude_body: None,
            mailbox: Mailbox::Inbox,
        }
    }
}

impl MessageQuery {
    /// Requested limit clamped to the hard cap.
    pub fn capped_limit(&self) -> usize {
        self.limit.min(MAX_FETCH_LIMIT)
    }
}

// ── Source adapter trait ────────────────────────────────────────────

/// Trait for message store adapters — pure I/O, no extraction logic.
///
/// Extraction and sync bookkeeping live in `ExpenseRules` and
/// `SyncCoordinator`; an adapter only answers queries against whatever
/// message store the host platform provides.
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// Adapter name for logging (e.g. "android-sms", "mock").
    fn name(&self) -> &str;

    /// Check (or interactively request) read permission.
    ///
    /// Re-checked before every fetch — the user can revoke access
    /// between runs.
    async fn ensure_permission(&self) -> Result<bool, SourceError>;

    /// Fetch messages matching `query`, newest first, at most
    /// [`MessageQuery::capped_limit`] records.
    async fn fetch(&self, query: &MessageQuery) -> Result<Vec<RawMessage>, SourceError>;
}
