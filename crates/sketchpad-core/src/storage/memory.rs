//! In-memory storage implementation.

use super::{PersistedState, StateStorage, StorageError, StorageResult};
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: RwLock<Option<PersistedState>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage that already holds `state`.
    pub fn with_state(state: PersistedState) -> Self {
        Self {
            state: RwLock::new(Some(state)),
        }
    }
}

impl StateStorage for MemoryStorage {
    fn save(&self, state: &PersistedState) -> StorageResult<()> {
        let mut slot = self
            .state
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        *slot = Some(state.clone());
        Ok(())
    }

    fn load(&self) -> StorageResult<PersistedState> {
        let slot = self
            .state
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        slot.clone()
            .ok_or_else(|| StorageError::NotFound("memory".to_string()))
    }

    fn delete(&self) -> StorageResult<()> {
        let mut slot = self
            .state
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        *slot = None;
        Ok(())
    }

    fn exists(&self) -> StorageResult<bool> {
        let slot = self
            .state
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(slot.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Rectangle, Shape};
    use kurbo::Point;

    fn state() -> PersistedState {
        let shape: Shape = Rectangle::new(Point::new(10.0, 10.0), 100.0, 50.0).into();
        PersistedState {
            history: Vec::new(),
            current_shapes: vec![shape],
        }
    }

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let saved = state();

        storage.save(&saved).unwrap();
        assert_eq!(storage.load().unwrap(), saved);
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        assert!(matches!(storage.load(), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_exists_and_delete() {
        let storage = MemoryStorage::with_state(state());
        assert!(storage.exists().unwrap());

        storage.delete().unwrap();
        assert!(!storage.exists().unwrap());
    }
}
