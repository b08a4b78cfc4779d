//! Heuristic pattern rules for expense extraction.
//!
//! All regexes are compiled once at construction and reused for every
//! message. Amount patterns are tried in fixed priority order; the first
//! pattern that matches anywhere in the body wins. Absence of a match is
//! the only negative signal — extraction never errors.

use regex::Regex;
use rust_decimal::Decimal;
use tracing::debug;

use crate::extract::types::{ParsedExpense, TransactionType};
use crate::source::RawMessage;

/// Currency assumed when the body carries no marker.
const DEFAULT_CURRENCY: &str = "INR";

/// Maximum merchant length after whitespace cleanup.
const MERCHANT_MAX_CHARS: usize = 40;

/// Compiled pattern table for bank-transaction messages.
///
/// Build once (cheap but not free) and reuse across scans.
pub struct ExpenseRules {
    /// Amount patterns in priority order, each with one numeric capture.
    amount_patterns: Vec<Regex>,
    currency: Regex,
    debit_hint: Regex,
    credit_hint: Regex,
    merchant_hint: Regex,
    account_hint: Regex,
    otp: Regex,
    otp_override: Regex,
    /// Drop credit-classified records (spend tracking only).
    suppress_credits: bool,
}

impl ExpenseRules {
    /// Default rule table: credits are suppressed (spend tracking only).
    pub fn new() -> Self {
        Self::with_policy(true)
    }

    /// Rule table that keeps credit-classified records — for hosts that
    /// track income as well as spend.
    pub fn keeping_credits() -> Self {
        Self::with_policy(false)
    }

    fn with_policy(suppress_credits: bool) -> Self {
        Self {
            amount_patterns: vec![
                Regex::new(r"(?i)(?:INR|Rs\.?|₹)\s*([\d,]+\.?\d*)").unwrap(),
                Regex::new(r"(?:USD|\$)\s*([\d,]+\.?\d*)").unwrap(),
                Regex::new(r"(?i)amount\s*[:\-]?\s*(?:INR|Rs\.?|₹)?\s*([\d,]+\.?\d*)").unwrap(),
            ],
            currency: Regex::new(r"(?i)(INR|Rs\.?|₹|USD|\$)").unwrap(),
            debit_hint: Regex::new(
                r"(?i)\b(debited|spent|purchase|pos|atm|withdrawn|txn\.? charges?)\b",
            )
            .unwrap(),
            credit_hint: Regex::new(r"(?i)\b(credited|received|refund|cashback|deposit)\b")
                .unwrap(),
            merchant_hint: Regex::new(r"\b(?:at|to)\s+([A-Za-z0-9&\-\._ ]{2,25})\b").unwrap(),
            account_hint: Regex::new(
                r"(?i)\b(?:a/c|ac|acct|account)\s*(?:xx|x|ending|no\.?|number|#)?\s*[:\-]?\s*([Xx*0-9]{3,})",
            )
            .unwrap(),
            otp: Regex::new(r"(?i)otp").unwrap(),
            otp_override: Regex::new(r"(?i)(debited|credited|amount)").unwrap(),
            suppress_credits,
        }
    }

    /// Extract a structured expense from one message.
    ///
    /// Returns `None` for anything that does not look like a qualifying
    /// transaction: empty body, OTP noise, no parseable amount, or a
    /// credit when credits are suppressed.
    pub fn extract(&self, msg: &RawMessage) -> Option<ParsedExpense> {
        let body = msg.body.as_str();
        if body.is_empty() {
            return None;
        }

        // OTP messages share transaction vocabulary; reject them unless
        // the body also carries debit/credit/amount wording.
        if self.otp.is_match(body) && !self.otp_override.is_match(body) {
            debug!(id = %msg.id, "Skipping OTP-like message");
            return None;
        }

        let amount = self.amount(body)?;
        let currency = self.currency(body);
        let transaction_type = self.classify(body);

        if self.suppress_credits && transaction_type == TransactionType::Credit {
            debug!(id = %msg.id, "Dropping credit-classified message");
            return None;
        }

        let fingerprint = fingerprint(&msg.id, amount, &currency);
        debug!(
            id = %msg.id,
            %amount,
            currency = %currency,
            transaction_type = transaction_type.label(),
            "Extracted expense"
        );

        Some(ParsedExpense {
            source_message_id: msg.id.clone(),
            timestamp: msg.timestamp,
            sender: msg.address.clone(),
            amount,
            currency,
            transaction_type,
            merchant: self.merchant(body),
            account_hint: self.account_hint(body),
            original_body: msg.body.clone(),
            fingerprint,
        })
    }

    /// Extract from a batch, preserving input order and silently skipping
    /// non-matches. No dedup — callers dedup on `fingerprint`.
    pub fn extract_all(&self, messages: &[RawMessage]) -> Vec<ParsedExpense> {
        messages.iter().filter_map(|m| self.extract(m)).collect()
    }

    fn amount(&self, body: &str) -> Option<Decimal> {
        // First pattern that matches wins; a capture that fails to parse
        // does not fall through to lower-priority patterns.
        let caps = self.amount_patterns.iter().find_map(|re| re.captures(body))?;
        parse_amount(caps.get(1)?.as_str())
    }

    fn currency(&self, body: &str) -> String {
        match self.currency.captures(body) {
            Some(caps) => normalize_currency(&caps[1]),
            None => DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Debit vocabulary wins when both directions match.
    fn classify(&self, body: &str) -> TransactionType {
        if self.debit_hint.is_match(body) {
            TransactionType::Debit
        } else if self.credit_hint.is_match(body) {
            TransactionType::Credit
        } else {
            TransactionType::Unknown
        }
    }

    fn merchant(&self, body: &str) -> Option<String> {
        let caps = self.merchant_hint.captures(body)?;
        let cleaned: String = caps[1]
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .chars()
            .take(MERCHANT_MAX_CHARS)
            .collect();
        Some(cleaned)
    }

    fn account_hint(&self, body: &str) -> Option<String> {
        let caps = self.account_hint.captures(body)?;
        let masked: String = caps[1]
            .chars()
            .filter(|c| matches!(c, 'X' | 'x' | '*' | '0'..='9'))
            .collect();
        Some(masked)
    }
}

impl Default for ExpenseRules {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip thousands separators and parse the remainder as a decimal.
fn parse_amount(raw: &str) -> Option<Decimal> {
    raw.replace(',', "").trim_end_matches('.').parse().ok()
}

/// Map a matched currency token onto its normalized code.
fn normalize_currency(token: &str) -> String {
    let upper = token.to_uppercase();
    if upper == "$" {
        "USD".to_string()
    } else if upper == "₹" || upper.starts_with("RS") {
        "INR".to_string()
    } else {
        upper
    }
}

/// 32-bit rolling hash over `"{id}:{amount}:{currency}"`, hex encoded.
///
/// Deterministic across runs and platforms; not cryptographic. Collisions
/// only need to stay rare within a single inbox.
fn fingerprint(id: &str, amount: Decimal, currency: &str) -> String {
    let seed = format!("{id}:{amount}:{currency}");
    let mut hash: u32 = 0;
    for byte in seed.bytes() {
        hash = hash.wrapping_mul(31).wrapping_add(u32::from(byte));
    }
    format!("{hash:08x}")
}
