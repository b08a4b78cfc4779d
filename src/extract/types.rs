//! Shared types for expense extraction.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Debit/credit classification of a transaction message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Money left the account.
    Debit,
    /// Money entered the account.
    Credit,
    /// The body parsed an amount but no direction vocabulary matched.
    Unknown,
}

impl TransactionType {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
            Self::Unknown => "unknown",
        }
    }
}

/// A structured expense extracted from a single message.
///
/// Created once per qualifying [`RawMessage`](crate::source::RawMessage)
/// and immutable afterwards. Persistence and merging are caller concerns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedExpense {
    /// ID of the message this record was extracted from.
    pub source_message_id: String,
    /// Receive time of the message, epoch milliseconds.
    pub timestamp: i64,
    /// Sender identifier of the message.
    pub sender: String,
    /// Parsed transaction amount, thousands separators stripped.
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// Normalized 3-letter currency code ("INR" when no marker found).
    pub currency: String,
    /// Debit/credit classification.
    pub transaction_type: TransactionType,
    /// Merchant or payee derived from context, at most 40 characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    /// Masked/partial account reference, never a full account number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_hint: Option<String>,
    /// Verbatim copy of the message body.
    pub original_body: String,
    /// Deterministic hash of (message ID, amount, currency) — the dedup
    /// key across repeated scans.
    pub fingerprint: String,
}
