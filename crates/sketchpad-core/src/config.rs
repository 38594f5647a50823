//! Canvas configuration.

use crate::camera::{DEFAULT_VIRTUAL_HEIGHT, DEFAULT_VIRTUAL_WIDTH};
use crate::storage::{DEFAULT_STATE_FILE, FileStorage, StorageResult};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings fixed for the lifetime of a canvas.
///
/// Missing fields fall back to their defaults when deserialized, so a
/// partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Width of the virtual canvas in model units.
    pub virtual_width: f64,
    /// Height of the virtual canvas in model units.
    pub virtual_height: f64,
    /// Initial physical viewport size.
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Name of the state file.
    pub state_file: String,
    /// Directory holding the state file (None = platform data directory).
    pub storage_dir: Option<PathBuf>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            virtual_width: DEFAULT_VIRTUAL_WIDTH,
            virtual_height: DEFAULT_VIRTUAL_HEIGHT,
            viewport_width: 800.0,
            viewport_height: 600.0,
            state_file: DEFAULT_STATE_FILE.to_string(),
            storage_dir: None,
        }
    }
}

impl CanvasConfig {
    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn virtual_size(&self) -> Size {
        Size::new(self.virtual_width, self.virtual_height)
    }

    pub fn virtual_rect(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.virtual_size())
    }

    pub fn viewport_size(&self) -> Size {
        Size::new(self.viewport_width, self.viewport_height)
    }

    /// Open file storage for the configured state file.
    pub fn open_storage(&self) -> StorageResult<FileStorage> {
        let dir = match &self.storage_dir {
            Some(dir) => dir.clone(),
            None => FileStorage::default_dir()?,
        };
        FileStorage::in_dir(&dir, &self.state_file)
    }
}
