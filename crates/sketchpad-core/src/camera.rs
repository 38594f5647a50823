//! Camera module for pan/zoom transforms over a fixed virtual canvas.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum allowed zoom level.
pub const MIN_ZOOM: f64 = 0.1;
/// Maximum allowed zoom level.
pub const MAX_ZOOM: f64 = 5.0;
/// Zoom change for one wheel notch or keyboard zoom step.
pub const ZOOM_STEP: f64 = 0.1;
/// Pan distance for one keyboard step, in screen pixels.
pub const PAN_STEP: f64 = 30.0;

/// Default width of the virtual canvas.
pub const DEFAULT_VIRTUAL_WIDTH: f64 = 2000.0;
/// Default height of the virtual canvas.
pub const DEFAULT_VIRTUAL_HEIGHT: f64 = 1500.0;

/// Camera manages the view transform for the canvas.
///
/// The virtual canvas is a fixed world rectangle at the origin. The camera
/// maps it onto a physical viewport with a uniform zoom and a translation,
/// and keeps that mapping within bounds after every change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in screen pixels.
    pub offset: Vec2,
    /// Current zoom level.
    pub zoom: f64,
    /// Extent of the virtual canvas in world units.
    pub virtual_size: Size,
    /// Physical viewport size in screen pixels.
    pub viewport_size: Size,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Size::new(DEFAULT_VIRTUAL_WIDTH, DEFAULT_VIRTUAL_HEIGHT),
            Size::new(800.0, 600.0),
        )
    }
}

impl Camera {
    /// Create a camera at 100% zoom, clamped to the viewport.
    pub fn new(virtual_size: Size, viewport_size: Size) -> Self {
        let mut camera = Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            virtual_size,
            viewport_size,
        };
        camera.clamp_to_bounds();
        camera
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts world coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Get the inverse transform for input handling.
    ///
    /// This transform converts screen coordinates to world coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        Point::new(
            (screen_point.x - self.offset.x) / self.zoom,
            (screen_point.y - self.offset.y) / self.zoom,
        )
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        Point::new(
            world_point.x * self.zoom + self.offset.x,
            world_point.y * self.zoom + self.offset.y,
        )
    }

    /// Convert a screen-space drag delta into world units.
    pub fn screen_delta_to_world(&self, delta: Vec2) -> Vec2 {
        delta / self.zoom
    }

    /// The virtual canvas in world coordinates.
    pub fn virtual_rect(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.virtual_size)
    }

    /// The virtual canvas as it appears on screen.
    pub fn screen_virtual_rect(&self) -> Rect {
        self.transform().transform_rect_bbox(self.virtual_rect())
    }

    /// Whether a world point lies on the virtual canvas (edges included).
    pub fn is_on_canvas(&self, world_point: Point) -> bool {
        world_point.x >= 0.0
            && world_point.x <= self.virtual_size.width
            && world_point.y >= 0.0
            && world_point.y <= self.virtual_size.height
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
        self.clamp_to_bounds();
    }

    /// Change the zoom by `delta`, keeping the world point under
    /// `screen_point` fixed on screen. Non-finite input is ignored.
    pub fn zoom_by(&mut self, delta: f64, screen_point: Point) {
        if !delta.is_finite() || !screen_point.is_finite() {
            return;
        }
        let new_zoom = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);

        // Convert screen point to world before zoom
        let world_point = self.screen_to_world(screen_point);

        self.zoom = new_zoom;

        // Adjust offset so world_point stays at screen_point
        self.offset = Vec2::new(
            screen_point.x - world_point.x * self.zoom,
            screen_point.y - world_point.y * self.zoom,
        );
        self.clamp_to_bounds();
    }

    /// Set the zoom directly (clamped), without an anchor.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            return;
        }
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.clamp_to_bounds();
    }

    /// Update the viewport after the physical surface is resized.
    pub fn set_viewport_size(&mut self, viewport_size: Size) {
        self.viewport_size = viewport_size;
        self.clamp_to_bounds();
    }

    /// Reset to 100% zoom with the virtual canvas centred in the viewport.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        let scaled = self.virtual_size * self.zoom;
        self.offset = Vec2::new(
            (self.viewport_size.width - scaled.width) / 2.0,
            (self.viewport_size.height - scaled.height) / 2.0,
        );
        self.clamp_to_bounds();
    }

    /// Keep the scaled virtual canvas inside the viewport.
    ///
    /// On an axis where it is smaller than the viewport it is centred;
    /// otherwise the offset is clamped so that the canvas always covers the
    /// viewport on that axis.
    pub fn clamp_to_bounds(&mut self) {
        let scaled = self.virtual_size * self.zoom;
        self.offset.x = clamp_axis(self.offset.x, self.viewport_size.width, scaled.width);
        self.offset.y = clamp_axis(self.offset.y, self.viewport_size.height, scaled.height);
    }

    /// Current zoom as a whole percentage, for status text.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }
}

fn clamp_axis(offset: f64, viewport: f64, scaled: f64) -> f64 {
    if scaled < viewport {
        (viewport - scaled) / 2.0
    } else {
        offset.clamp(viewport - scaled, 0.0)
    }
}
