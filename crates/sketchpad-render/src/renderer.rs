//! Renderer trait abstraction and the paint-surface renderer.

use crate::surface::PaintSurface;
use kurbo::{Point, Rect, Size, Stroke};
use peniko::Color;
use sketchpad_core::canvas::Canvas;
use sketchpad_core::selection::selection_outline;
use sketchpad_core::shapes::Shape;
use thiserror::Error;

/// Width of the dashed selection outline.
const SELECTION_STROKE_WIDTH: f64 = 1.0;
/// Dash and gap length of the selection outline.
const SELECTION_DASH: f64 = 5.0;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid export extent: {0}x{1}")]
    InvalidExtent(f64, f64),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// In-progress shape painted on top, not part of the document.
    pub preview: Option<&'a Shape>,
    /// Fill of the virtual canvas.
    pub background_color: Color,
    /// Fill of the viewport area around the virtual canvas.
    pub outside_color: Color,
    /// Selection outline and handle border color.
    pub selection_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(canvas: &'a Canvas) -> Self {
        Self {
            canvas,
            preview: None,
            background_color: Color::from_rgba8(255, 255, 255, 255),
            outside_color: Color::from_rgba8(200, 200, 200, 255),
            selection_color: Color::from_rgba8(255, 0, 0, 255),
        }
    }

    /// Set the shape being drawn.
    pub fn with_preview(mut self, preview: Option<&'a Shape>) -> Self {
        self.preview = preview;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_outside_color(mut self, color: Color) -> Self {
        self.outside_color = color;
        self
    }

    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Paint one frame of the canvas as seen through its camera.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

/// Helper trait for shape rendering.
pub trait ShapeRenderer {
    /// Paint a shape in the current coordinate system.
    fn render_shape(&mut self, shape: &Shape);

    /// Paint the dashed outline and resize handles of a selected shape.
    fn render_selection(&mut self, shape: &Shape, color: Color);

    /// Paint the whole virtual canvas at identity transform, without
    /// selection decorations, for an external image exporter.
    fn render_export(
        &mut self,
        shapes: &[Shape],
        virtual_size: Size,
        background: Color,
    ) -> RenderResult<()>;
}

/// Renderer drawing through any [`PaintSurface`].
#[derive(Debug, Default)]
pub struct SurfaceRenderer<S> {
    surface: S,
}

impl<S: PaintSurface> SurfaceRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

impl<S: PaintSurface> Renderer for SurfaceRenderer<S> {
    fn build_scene(&mut self, ctx: &RenderContext) {
        let camera = &ctx.canvas.camera;
        let document = &ctx.canvas.document;

        let viewport = Rect::from_origin_size(Point::ZERO, camera.viewport_size);
        self.surface.fill_rect(viewport, ctx.outside_color);

        self.surface.save();
        self.surface.transform(camera.offset, camera.zoom);
        let canvas_rect = document.virtual_rect();
        self.surface.clip_rect(canvas_rect);
        self.surface.fill_rect(canvas_rect, self.background_color(ctx));

        for shape in document.shapes_ordered() {
            self.render_shape(shape);
            if shape.is_selected() {
                self.render_selection(shape, ctx.selection_color);
            }
        }

        if let Some(preview) = ctx.preview {
            self.render_shape(preview);
        }
        self.surface.restore();
    }
}

impl<S: PaintSurface> ShapeRenderer for SurfaceRenderer<S> {
    fn render_shape(&mut self, shape: &Shape) {
        let style = shape.style();
        let stroke = Stroke::new(style.stroke_width);
        match shape {
            Shape::Rectangle(rect) => {
                let area = rect.as_rect();
                if let Some(fill) = style.fill() {
                    self.surface.fill_rect(area, fill);
                }
                if let Some(color) = style.stroke() {
                    self.surface.stroke_rect(area, color, &stroke);
                }
            }
            Shape::Ellipse(_) => {
                let bounds = shape.bounds();
                if let Some(fill) = style.fill() {
                    self.surface.fill_oval(bounds, fill);
                }
                if let Some(color) = style.stroke() {
                    self.surface.stroke_oval(bounds, color, &stroke);
                }
            }
            Shape::Polygon(polygon) => {
                let vertices = polygon.vertices();
                if let Some(fill) = style.fill() {
                    self.surface.fill_polygon(&vertices, fill);
                }
                if let Some(color) = style.stroke() {
                    self.surface.stroke_polygon(&vertices, color, &stroke);
                }
            }
            // Lines have no interior; the fill color is ignored.
            Shape::Line(line) => {
                if let Some(color) = style.stroke() {
                    self.surface.stroke_line(line.as_kurbo(), color, &stroke);
                }
            }
        }
    }

    fn render_selection(&mut self, shape: &Shape, color: Color) {
        let outline = Stroke::new(SELECTION_STROKE_WIDTH)
            .with_dashes(0.0, [SELECTION_DASH, SELECTION_DASH]);
        self.surface
            .stroke_rect(selection_outline(shape.bounds()), color, &outline);

        let border = Stroke::new(SELECTION_STROKE_WIDTH);
        let white = Color::from_rgba8(255, 255, 255, 255);
        for handle in shape.handles() {
            let rect = handle.rect();
            self.surface.fill_rect(rect, white);
            self.surface.stroke_rect(rect, color, &border);
        }
    }

    fn render_export(
        &mut self,
        shapes: &[Shape],
        virtual_size: Size,
        background: Color,
    ) -> RenderResult<()> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(virtual_size.width) || !valid(virtual_size.height) {
            return Err(RendererError::InvalidExtent(virtual_size.width, virtual_size.height));
        }

        let area = Rect::from_origin_size(Point::ZERO, virtual_size);
        self.surface.save();
        self.surface.clip_rect(area);
        self.surface.fill_rect(area, background);
        for shape in shapes {
            self.render_shape(shape);
        }
        self.surface.restore();
        Ok(())
    }
}
