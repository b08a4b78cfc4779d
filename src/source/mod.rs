//! Message source abstraction — adapters over a device message store.

pub mod mock;
pub mod types;

pub use mock::MockSource;
pub use types::*;
