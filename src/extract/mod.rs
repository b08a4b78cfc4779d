//! Expense extraction — heuristic parsing of bank-transaction messages.
//!
//! Flow:
//! 1. `ExpenseRules::new()` — compile the pattern table once
//! 2. `ExpenseRules::extract()` — one message in, at most one record out
//! 3. `ExpenseRules::extract_all()` — order-preserving batch, no dedup
//!
//! Dedup across repeated scans is a caller concern, keyed on
//! `ParsedExpense::fingerprint`.

pub mod rules;
pub mod types;

pub use rules::ExpenseRules;
pub use types::{ParsedExpense, TransactionType};
