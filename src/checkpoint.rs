//! Checkpoint persistence — key/value storage for the last-sync marker.
//!
//! The store is injected into the coordinator rather than held as
//! process-wide state, so tests and hosts pick their own backend (app
//! preferences, a settings table, a file).

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::CheckpointError;

/// Backend-agnostic key/value store for sync checkpoints.
#[async_trait]
pub trait CheckpointStore: Send + Sync {
    /// Read a stored value, `None` when the key has never been written.
    async fn get(&self, key: &str) -> Result<Option<String>, CheckpointError>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), CheckpointError>;
}

/// In-memory checkpoint store for tests and single-process hosts.
#[derive(Default)]
pub struct MemoryCheckpoint {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryCheckpoint {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CheckpointStore for MemoryCheckpoint {
    async fn get(&self, key: &str) -> Result<Option<String>, CheckpointError> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CheckpointError> {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
