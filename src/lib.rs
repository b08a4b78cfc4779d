//! SMS expense extraction — heuristic parsing of bank-transaction
//! messages from a device inbox, plus the sync bookkeeping that lets
//! repeated scans converge on a stable result set.

pub mod checkpoint;
pub mod config;
pub mod error;
pub mod extract;
pub mod source;
pub mod sync;
