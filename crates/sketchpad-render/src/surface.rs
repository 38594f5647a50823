//! 2D paint surface contract and a recording implementation.

use kurbo::{Affine, Line, Point, Rect, Stroke, Vec2};
use peniko::Color;
use sketchpad_core::shapes::SerializableColor;

/// Immediate-mode 2D drawing target.
///
/// Geometry is given in the surface's current coordinate system, which
/// [`transform`](PaintSurface::transform) changes and
/// [`save`](PaintSurface::save)/[`restore`](PaintSurface::restore) bracket.
/// Clips are part of the saved state.
pub trait PaintSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color, stroke: &Stroke);

    /// Fill the oval inscribed in `bounds`.
    fn fill_oval(&mut self, bounds: Rect, color: Color);
    fn stroke_oval(&mut self, bounds: Rect, color: Color, stroke: &Stroke);

    /// Fill the closed polygon through `points`.
    fn fill_polygon(&mut self, points: &[Point], color: Color);
    fn stroke_polygon(&mut self, points: &[Point], color: Color, stroke: &Stroke);

    fn stroke_line(&mut self, line: Line, color: Color, stroke: &Stroke);

    /// Intersect the clip with `rect`.
    fn clip_rect(&mut self, rect: Rect);

    /// Push the current transform and clip.
    fn save(&mut self);

    /// Pop back to the last saved transform and clip.
    fn restore(&mut self);

    /// Append a translation followed by a uniform scale.
    fn transform(&mut self, translate: Vec2, scale: f64);
}

/// A single call made on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: SerializableColor,
    },
    StrokeRect {
        rect: Rect,
        color: SerializableColor,
        width: f64,
        dashed: bool,
    },
    FillOval {
        bounds: Rect,
        color: SerializableColor,
    },
    StrokeOval {
        bounds: Rect,
        color: SerializableColor,
        width: f64,
    },
    FillPolygon {
        points: Vec<Point>,
        color: SerializableColor,
    },
    StrokePolygon {
        points: Vec<Point>,
        color: SerializableColor,
        width: f64,
    },
    StrokeLine {
        line: Line,
        color: SerializableColor,
        width: f64,
    },
    ClipRect(Rect),
    Save,
    Restore,
    Transform {
        translate: Vec2,
        scale: f64,
    },
}

/// Surface that records every call, for tests and headless inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    current: Affine,
    saved: Vec<Affine>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.current = Affine::IDENTITY;
        self.saved.clear();
    }

    /// Transform in effect for the next call.
    pub fn current_transform(&self) -> Affine {
        self.current
    }

    /// Number of unmatched [`save`](PaintSurface::save) calls.
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl PaintSurface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawCommand::FillRect {
            rect,
            color: color.into(),
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, stroke: &Stroke) {
        self.push(DrawCommand::StrokeRect {
            rect,
            color: color.into(),
            width: stroke.width,
            dashed: !stroke.dash_pattern.is_empty(),
        });
    }

    fn fill_oval(&mut self, bounds: Rect, color: Color) {
        self.push(DrawCommand::FillOval {
            bounds,
            color: color.into(),
        });
    }

    fn stroke_oval(&mut self, bounds: Rect, color: Color, stroke: &Stroke) {
        self.push(DrawCommand::StrokeOval {
            bounds,
            color: color.into(),
            width: stroke.width,
        });
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        self.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color: color.into(),
        });
    }

    fn stroke_polygon(&mut self, points: &[Point], color: Color, stroke: &Stroke) {
        self.push(DrawCommand::StrokePolygon {
            points: points.to_vec(),
            color: color.into(),
            width: stroke.width,
        });
    }

    fn stroke_line(&mut self, line: Line, color: Color, stroke: &Stroke) {
        self.push(DrawCommand::StrokeLine {
            line,
            color: color.into(),
            width: stroke.width,
        });
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.push(DrawCommand::ClipRect(rect));
    }

    fn save(&mut self) {
        self.saved.push(self.current);
        self.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        // An unmatched restore keeps the current state.
        if let Some(previous) = self.saved.pop() {
            self.current = previous;
        }
        self.push(DrawCommand::Restore);
    }

    fn transform(&mut self, translate: Vec2, scale: f64) {
        self.current = self.current * Affine::translate(translate) * Affine::scale(scale);
        self.push(DrawCommand::Transform { translate, scale });
    }
}
