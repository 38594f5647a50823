//! Drawing tools: which shape a drag creates and with which colors.

use crate::shapes::{
    Ellipse, Frame, Line, Polygon, Rectangle, SerializableColor, Shape, ShapeStyle,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Smallest width/height (or line length) a drawn shape may have.
pub const MIN_DRAW_SIZE: f64 = 5.0;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Rectangle,
    Ellipse,
    Polygon,
    Line,
}

/// Manages the current tool and the style applied to new shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Whether new shapes get an outline.
    pub outline_enabled: bool,
    /// Whether new shapes get a fill.
    pub fill_enabled: bool,
    /// Outline color for new shapes.
    pub stroke_color: SerializableColor,
    /// Fill color for new shapes.
    pub fill_color: SerializableColor,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self {
            current_tool: ToolKind::default(),
            outline_enabled: true,
            fill_enabled: true,
            stroke_color: SerializableColor::black(),
            fill_color: SerializableColor::blue(),
        }
    }
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
    }

    /// Style for finished shapes.
    pub fn current_style(&self) -> ShapeStyle {
        ShapeStyle::new(
            self.outline_enabled.then_some(self.stroke_color),
            self.fill_enabled.then_some(self.fill_color),
        )
    }

    /// Style for the in-progress preview (neutral grey tones).
    pub fn preview_style(&self) -> ShapeStyle {
        ShapeStyle::new(
            self.outline_enabled.then_some(SerializableColor::gray()),
            self.fill_enabled.then_some(SerializableColor::light_gray()),
        )
    }

    /// Shape shown while dragging from `start` to `current` (model coordinates).
    pub fn preview_shape(&self, start: Point, current: Point) -> Option<Shape> {
        self.build(start, current, self.preview_style())
    }

    /// Shape to add when a drag from `start` ends at `end` (model coordinates).
    ///
    /// Returns `None` for the select tool and for drags too small to be
    /// intentional.
    pub fn finish_shape(&self, start: Point, end: Point) -> Option<Shape> {
        if self.current_tool == ToolKind::Line {
            if (end - start).hypot() < MIN_DRAW_SIZE {
                return None;
            }
        } else {
            let frame = Frame::from_corners(start, end);
            if frame.width < MIN_DRAW_SIZE || frame.height < MIN_DRAW_SIZE {
                return None;
            }
        }
        self.build(start, end, self.current_style())
    }

    fn build(&self, start: Point, end: Point, style: ShapeStyle) -> Option<Shape> {
        let frame = Frame::from_corners(start, end);
        let shape = match self.current_tool {
            ToolKind::Select => return None,
            ToolKind::Rectangle => {
                Rectangle::new(frame.position, frame.width, frame.height).with_style(style).into()
            }
            ToolKind::Ellipse => {
                Ellipse::new(frame.position, frame.width, frame.height).with_style(style).into()
            }
            ToolKind::Polygon => {
                Polygon::new(frame.position, frame.width, frame.height).with_style(style).into()
            }
            ToolKind::Line => Line::new(start, end).with_style(style).into(),
        };
        Some(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    #[test]
    fn test_select_tool_draws_nothing() {
        let tools = ToolManager::new();
        assert!(tools.preview_shape(Point::ZERO, Point::new(50.0, 50.0)).is_none());
        assert!(tools.finish_shape(Point::ZERO, Point::new(50.0, 50.0)).is_none());
    }

    #[test]
    fn test_finish_rectangle_normalizes_corners() {
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Rectangle);
        let shape = tools
            .finish_shape(Point::new(110.0, 60.0), Point::new(10.0, 10.0))
            .unwrap();
        assert!(matches!(shape, Shape::Rectangle(_)));
        assert_eq!(shape.bounds(), Rect::new(10.0, 10.0, 110.0, 60.0));
        assert_eq!(shape.style().fill_color, Some(SerializableColor::blue()));
    }

    #[test]
    fn test_tiny_drags_are_discarded() {
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Ellipse);
        assert!(tools.finish_shape(Point::ZERO, Point::new(4.0, 50.0)).is_none());
        assert!(tools.finish_shape(Point::ZERO, Point::new(5.0, 5.0)).is_some());

        tools.set_tool(ToolKind::Line);
        assert!(tools.finish_shape(Point::ZERO, Point::new(3.0, 3.0)).is_none());
        assert!(tools.finish_shape(Point::ZERO, Point::new(100.0, 0.0)).is_some());
    }

    #[test]
    fn test_preview_is_not_size_checked() {
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Polygon);
        let preview = tools.preview_shape(Point::ZERO, Point::new(1.0, 1.0)).unwrap();
        assert_eq!(preview.style().stroke_color, Some(SerializableColor::gray()));
    }

    #[test]
    fn test_disabled_outline_and_fill() {
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Line);
        tools.outline_enabled = false;
        tools.fill_enabled = false;
        let line = tools.finish_shape(Point::ZERO, Point::new(100.0, 0.0)).unwrap();
        assert!(!line.style().is_visible());
    }
}
