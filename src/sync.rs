//! Sync coordinator — fetches new bank messages and extracts expenses.
//!
//! Flow per `sync()` call:
//! 1. Permission gate (re-checked every run — access can be revoked)
//! 2. Window start: stored checkpoint, else the configured lookback
//! 3. `MessageSource::fetch` with the configured sender/body filters
//! 4. Defensive timestamp re-filter
//! 5. `ExpenseRules::extract_all`
//! 6. Checkpoint advance
//!
//! Callers must serialize `sync()` invocations — there is no guard
//! against two overlapping runs racing on the checkpoint store.

use std::sync::Arc;

use chrono::{DateTime, Months, Utc};
use tracing::{debug, info, warn};

use crate::checkpoint::CheckpointStore;
use crate::config::SyncConfig;
use crate::error::{Result, SourceError};
use crate::extract::{ExpenseRules, ParsedExpense};
use crate::source::{Mailbox, MessageQuery, MessageSource};

/// Orchestrates one fetch-and-extract pass over the message store.
pub struct SyncCoordinator {
    source: Arc<dyn MessageSource>,
    checkpoints: Arc<dyn CheckpointStore>,
    rules: ExpenseRules,
    config: SyncConfig,
}

impl SyncCoordinator {
    /// Create a coordinator with the default rule table.
    pub fn new(
        source: Arc<dyn MessageSource>,
        checkpoints: Arc<dyn CheckpointStore>,
        config: SyncConfig,
    ) -> Self {
        Self::with_rules(source, checkpoints, config, ExpenseRules::new())
    }

    /// Create a coordinator with a custom rule table (e.g. one that keeps
    /// credit records).
    pub fn with_rules(
        source: Arc<dyn MessageSource>,
        checkpoints: Arc<dyn CheckpointStore>,
        config: SyncConfig,
        rules: ExpenseRules,
    ) -> Self {
        Self {
            source,
            checkpoints,
            rules,
            config,
        }
    }

    /// Fetch messages since the last checkpoint and extract expenses.
    ///
    /// Source errors abort the run before the checkpoint is touched, so a
    /// failed window is re-scanned on the next call. A successful fetch
    /// advances the checkpoint even when nothing qualified — the window
    /// counts as scanned.
    pub async fn sync(&self) -> Result<Vec<ParsedExpense>> {
        info!(source = self.source.name(), "Starting expense sync");

        if !self.source.ensure_permission().await? {
            return Err(SourceError::PermissionDenied.into());
        }

        let now = Utc::now().timestamp_millis();
        let since = self.window_start(now).await?;

        let query = MessageQuery {
            limit: self.config.fetch_limit,
            addresses: self.config.bank_senders.clone(),
            since,
            until: now,
            include_body: Some(self.config.include_pattern.clone()),
            exclude_body: Some(self.config.exclude_pattern.clone()),
            mailbox: Mailbox::Inbox,
        };

        debug!(since, until = now, "Fetching transaction messages");
        let messages = self.source.fetch(&query).await?;
        let fetched = messages.len();

        // Adapters are asked to honor the window, but not all do.
        let in_window: Vec<_> = messages
            .into_iter()
            .filter(|m| m.timestamp >= since)
            .collect();
        if in_window.len() < fetched {
            warn!(
                dropped = fetched - in_window.len(),
                "Adapter returned messages older than the requested window"
            );
        }

        let expenses = self.rules.extract_all(&in_window);

        self.checkpoints
            .set(&self.config.checkpoint_key, &now.to_string())
            .await?;

        info!(fetched, parsed = expenses.len(), "Sync complete");
        Ok(expenses)
    }

    /// Stored checkpoint when present and usable, else the lookback start.
    async fn window_start(&self, now_ms: i64) -> Result<i64> {
        if let Some(raw) = self.checkpoints.get(&self.config.checkpoint_key).await? {
            match raw.parse::<i64>() {
                Ok(ts) if ts > 0 => return Ok(ts),
                _ => warn!(raw = %raw, "Ignoring unusable checkpoint value"),
            }
        }
        Ok(lookback_start(now_ms, self.config.lookback_months))
    }
}

/// First-run window start: `now` minus the configured number of calendar
/// months.
fn lookback_start(now_ms: i64, months: u32) -> i64 {
    let now = DateTime::from_timestamp_millis(now_ms).unwrap_or_else(Utc::now);
    now.checked_sub_months(Months::new(months))
        .map_or(now_ms, |start| start.timestamp_millis())
}
