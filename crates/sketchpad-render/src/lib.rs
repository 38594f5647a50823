//! Sketchpad Render Library
//!
//! Paint-surface abstraction and the render passes for the Sketchpad canvas.
//! Any backend that implements [`PaintSurface`] can draw a frame or an export.

mod renderer;
pub mod surface;

pub use renderer::{
    RenderContext, RenderResult, Renderer, RendererError, ShapeRenderer, SurfaceRenderer,
};
pub use surface::{DrawCommand, PaintSurface, RecordingSurface};
