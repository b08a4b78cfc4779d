//! Configuration types.

/// Sync configuration.
///
/// Every tunable the coordinator uses, with defaults matching the typical
/// Indian-bank deployment. Hosts override fields as needed.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Sender IDs the fetch is restricted to (bank short codes).
    pub bank_senders: Vec<String>,
    /// Body pattern a fetched message must match (transaction vocabulary).
    pub include_pattern: String,
    /// Body pattern that rejects a message at the source (OTP noise).
    pub exclude_pattern: String,
    /// First-run lookback window in calendar months.
    pub lookback_months: u32,
    /// Maximum messages fetched per sync.
    pub fetch_limit: usize,
    /// Key under which the last-sync timestamp is persisted.
    pub checkpoint_key: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            bank_senders: vec![
                "HDFCBK".into(),
                "ICICIB".into(),
                "SBIINB".into(),
                "AXISBK".into(),
                "KOTAKB".into(),
                "PNBSMS".into(),
            ],
            include_pattern: r"(?i)(debited|spent|purchase|txn|amount|rs\.?|inr|paid)".into(),
            exclude_pattern: r"(?i)(otp|one time password|verification)".into(),
            lookback_months: 3,
            fetch_limit: 800,
            checkpoint_key: "sms_last_sync_timestamp".into(),
        }
    }
}
