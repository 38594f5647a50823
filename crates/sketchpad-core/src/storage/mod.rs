//! Storage abstraction for persisting the shape store and its history.

mod file;
mod memory;

pub use file::{DEFAULT_STATE_FILE, FileStorage};
pub use memory::MemoryStorage;

use crate::history::Snapshot;
use crate::shapes::Shape;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("State not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Everything written to the state file: the undo history (most recent
/// first) and the current shape order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub history: Vec<Snapshot>,
    #[serde(default)]
    pub current_shapes: Vec<Shape>,
}

impl PersistedState {
    /// Serialize the state to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize state from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Port through which a document reads and writes its persisted state.
///
/// Every save overwrites the previous state in full.
pub trait StateStorage: Send + Sync {
    /// Save the state, replacing whatever was stored before.
    fn save(&self, state: &PersistedState) -> StorageResult<()>;

    /// Load the stored state. Returns `NotFound` if nothing has been saved.
    fn load(&self) -> StorageResult<PersistedState>;

    /// Delete the stored state.
    fn delete(&self) -> StorageResult<()>;

    /// Check if any state is stored.
    fn exists(&self) -> StorageResult<bool>;
}
