//! Rectangle shape.

use super::{Frame, ShapeId, ShapeStyle, ShapeTrait};
use crate::selection::{Handle, HandleKind};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Position and size.
    #[serde(flatten)]
    pub frame: Frame,
    /// Style properties.
    pub style: ShapeStyle,
    /// Selection flag (view state, but written to the state file).
    #[serde(default)]
    pub selected: bool,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            frame: Frame::new(position, width, height),
            style: ShapeStyle::default(),
            selected: false,
        }
    }

    /// Create a rectangle from two corner points.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        let frame = Frame::from_corners(p1, p2);
        Self::new(frame.position, frame.width, frame.height)
    }

    /// Replace the style.
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        self.frame.as_rect()
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn contains(&self, point: Point) -> bool {
        self.frame.contains(point)
    }

    fn handles(&self) -> Vec<Handle> {
        self.frame.handles()
    }

    fn resize(&mut self, handle: HandleKind, point: Point) -> bool {
        self.frame.resize(handle, point)
    }

    fn translate(&mut self, delta: Vec2) {
        self.frame.translate(delta);
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_creation() {
        let rect = Rectangle::new(Point::new(10.0, 20.0), 100.0, 50.0);
        assert!((rect.frame.position.x - 10.0).abs() < f64::EPSILON);
        assert!((rect.frame.position.y - 20.0).abs() < f64::EPSILON);
        assert!((rect.frame.width - 100.0).abs() < f64::EPSILON);
        assert!((rect.frame.height - 50.0).abs() < f64::EPSILON);
        assert!(!rect.selected);
    }

    #[test]
    fn test_rectangle_from_corners() {
        let rect = Rectangle::from_corners(Point::new(100.0, 100.0), Point::new(50.0, 50.0));
        assert_eq!(rect.bounds(), Rect::new(50.0, 50.0, 100.0, 100.0));
    }

    #[test]
    fn test_contains() {
        let rect = Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0);
        assert!(rect.contains(Point::new(50.0, 50.0)));
        assert!(rect.contains(Point::new(100.0, 100.0)));
        assert!(!rect.contains(Point::new(150.0, 50.0)));
    }

    #[test]
    fn test_handle_requires_selection() {
        let mut rect = Rectangle::new(Point::new(10.0, 10.0), 100.0, 50.0);
        assert_eq!(rect.handle_at(Point::new(110.0, 60.0)), None);

        rect.set_selected(true);
        assert_eq!(rect.handle_at(Point::new(110.0, 60.0)), Some(HandleKind::BottomRight));
        assert_eq!(rect.handle_at(Point::new(63.0, 13.0)), Some(HandleKind::Top));
        assert_eq!(rect.handle_at(Point::new(60.0, 35.0)), None);
    }

    #[test]
    fn test_rejected_resize_leaves_geometry_unchanged() {
        let mut rect = Rectangle::new(Point::new(10.0, 10.0), 100.0, 50.0);
        let before = rect.clone();
        assert!(!rect.resize(HandleKind::BottomRight, Point::new(13.0, 90.0)));
        assert_eq!(rect, before);
    }
}
