//! File-based storage implementation.

use super::{PersistedState, StateStorage, StorageError, StorageResult};
use std::fs;
use std::path::{Path, PathBuf};

/// File name used for the state file when none is configured.
pub const DEFAULT_STATE_FILE: &str = "history.json";

/// Stores the state as a single pretty-printed JSON file.
///
/// Each save rewrites the whole file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Use the given file as the state file. The parent directory must exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use `file_name` inside `base_path`, creating the directory if needed.
    pub fn in_dir(base_path: &Path, file_name: &str) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self::new(base_path.join(file_name)))
    }

    /// Directory used when no storage directory is configured.
    ///
    /// On Unix: `~/.local/share/sketchpad/`
    /// On Windows: `%LOCALAPPDATA%\sketchpad\`
    pub fn default_dir() -> StorageResult<PathBuf> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;
        Ok(base.join("sketchpad"))
    }

    /// File storage in the default location.
    pub fn default_location() -> StorageResult<Self> {
        Self::in_dir(&Self::default_dir()?, DEFAULT_STATE_FILE)
    }

    /// Path of the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStorage for FileStorage {
    fn save(&self, state: &PersistedState) -> StorageResult<()> {
        let json = state
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| {
            StorageError::Io(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }

    fn load(&self) -> StorageResult<PersistedState> {
        if !self.path.exists() {
            return Err(StorageError::NotFound(self.path.display().to_string()));
        }

        let json = fs::read_to_string(&self.path).map_err(|e| {
            StorageError::Io(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        PersistedState::from_json(&json).map_err(|e| {
            StorageError::Serialization(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    fn delete(&self) -> StorageResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                StorageError::Io(format!("Failed to delete {}: {}", self.path.display(), e))
            })?;
        }
        Ok(())
    }

    fn exists(&self) -> StorageResult<bool> {
        Ok(self.path.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::Snapshot;
    use crate::shapes::{Line, Rectangle, SerializableColor, Shape, ShapeStyle};
    use kurbo::Point;
    use tempfile::tempdir;

    fn sample_state() -> PersistedState {
        let rect: Shape = Rectangle::new(Point::new(10.0, 10.0), 100.0, 50.0)
            .with_style(ShapeStyle::new(Some(SerializableColor::black()), None))
            .into();
        let line: Shape = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0)).into();
        PersistedState {
            history: vec![Snapshot::capture(&[rect.clone()]), Snapshot::default()],
            current_shapes: vec![rect, line],
        }
    }

    #[test]
    fn test_file_storage_save_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::in_dir(dir.path(), DEFAULT_STATE_FILE).unwrap();

        let state = sample_state();
        storage.save(&state).unwrap();
        let loaded = storage.load().unwrap();

        assert_eq!(loaded, state);
    }

    #[test]
    fn test_file_layout() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::in_dir(dir.path(), DEFAULT_STATE_FILE).unwrap();
        storage.save(&sample_state()).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(storage.path()).unwrap()).unwrap();
        assert_eq!(json["history"].as_array().map(Vec::len), Some(2));
        assert_eq!(json["currentShapes"].as_array().map(Vec::len), Some(2));
        assert!(json["currentShapes"][0].get("Rectangle").is_some());
        assert!(json["currentShapes"][0]["Rectangle"]["style"]["fill_color"].is_null());
        assert!(json["currentShapes"][1].get("Line").is_some());
    }

    #[test]
    fn test_file_storage_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("missing.json"));
        assert!(matches!(storage.load(), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_malformed_file_is_serialization_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_STATE_FILE);
        fs::write(&path, "{ \"history\": [[{\"Rect").unwrap();

        let storage = FileStorage::new(path);
        assert!(matches!(storage.load(), Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_file_storage_delete() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::in_dir(&dir.path().join("nested"), DEFAULT_STATE_FILE).unwrap();

        storage.save(&PersistedState::default()).unwrap();
        assert!(storage.exists().unwrap());

        storage.delete().unwrap();
        assert!(!storage.exists().unwrap());
        storage.delete().unwrap();
    }

    #[test]
    fn test_write_failure_is_io_error() {
        let dir = tempdir().unwrap();
        // The target is a directory, so the write cannot succeed.
        let storage = FileStorage::new(dir.path());
        assert!(matches!(
            storage.save(&PersistedState::default()),
            Err(StorageError::Io(_))
        ));
    }
}
