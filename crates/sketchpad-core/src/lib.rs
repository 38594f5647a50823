//! Sketchpad Core Library
//!
//! Platform-agnostic shape model, view transform, undo history and
//! persistence for the Sketchpad vector drawing canvas.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod history;
pub mod selection;
pub mod shapes;
pub mod storage;
pub mod tools;

pub use camera::Camera;
pub use canvas::{Canvas, CanvasDocument};
pub use config::CanvasConfig;
pub use history::{History, MAX_HISTORY_DEPTH, Snapshot};
pub use selection::{Handle, HandleKind};
pub use shapes::{SerializableColor, Shape, ShapeId, ShapeStyle, ShapeTrait};
pub use storage::{
    FileStorage, MemoryStorage, PersistedState, StateStorage, StorageError, StorageResult,
};
pub use tools::{ToolKind, ToolManager};
