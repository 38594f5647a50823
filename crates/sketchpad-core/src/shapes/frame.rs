//! Axis-aligned frame shared by the box shapes.

use crate::selection::{Handle, HandleKind, box_handles};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest width or height a resize may produce.
pub const MIN_SHAPE_SIZE: f64 = 10.0;

/// Position and size of a box shape (rectangle, ellipse, polygon).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Top-left corner.
    pub position: Point,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            position,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Frame spanning two opposite corners in any order.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        Self::new(
            Point::new(p1.x.min(p2.x), p1.y.min(p2.y)),
            (p2.x - p1.x).abs(),
            (p2.y - p1.y).abs(),
        )
    }

    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    /// Inclusive containment on all four edges.
    pub fn contains(&self, point: Point) -> bool {
        let rect = self.as_rect();
        point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
    }

    pub fn handles(&self) -> Vec<Handle> {
        box_handles(self.as_rect())
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Drag one of the eight box handles to `point`, keeping the opposite
    /// side anchored.
    ///
    /// Nothing changes when the result would be smaller than
    /// [`MIN_SHAPE_SIZE`] on an axis the handle moves, or when `handle` is not
    /// a box handle. Edge handles only check their own axis.
    pub fn resize(&mut self, handle: HandleKind, point: Point) -> bool {
        let Rect { x0, y0, x1, y1 } = self.as_rect();
        let (new_x0, new_y0, new_x1, new_y1) = match handle {
            HandleKind::TopLeft => (point.x, point.y, x1, y1),
            HandleKind::TopRight => (x0, point.y, point.x, y1),
            HandleKind::BottomLeft => (point.x, y0, x1, point.y),
            HandleKind::BottomRight => (x0, y0, point.x, point.y),
            HandleKind::Top => (x0, point.y, x1, y1),
            HandleKind::Bottom => (x0, y0, x1, point.y),
            HandleKind::Left => (point.x, y0, x1, y1),
            HandleKind::Right => (x0, y0, point.x, y1),
            HandleKind::Start | HandleKind::End => return false,
        };

        let width = new_x1 - new_x0;
        let height = new_y1 - new_y0;
        let too_narrow = width < MIN_SHAPE_SIZE;
        let too_short = height < MIN_SHAPE_SIZE;
        let rejected = match handle {
            HandleKind::Top | HandleKind::Bottom => too_short,
            HandleKind::Left | HandleKind::Right => too_narrow,
            _ => too_narrow || too_short,
        };
        if rejected {
            return false;
        }

        self.position = Point::new(new_x0, new_y0);
        self.width = width;
        self.height = height;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame::new(Point::new(10.0, 10.0), 100.0, 50.0)
    }

    #[test]
    fn test_from_corners_normalizes() {
        let f = Frame::from_corners(Point::new(100.0, 80.0), Point::new(40.0, 20.0));
        assert_eq!(f.position, Point::new(40.0, 20.0));
        assert!((f.width - 60.0).abs() < f64::EPSILON);
        assert!((f.height - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let f = frame();
        assert!(f.contains(Point::new(10.0, 10.0)));
        assert!(f.contains(Point::new(110.0, 60.0)));
        assert!(f.contains(Point::new(50.0, 30.0)));
        assert!(!f.contains(Point::new(110.1, 30.0)));
        assert!(!f.contains(Point::new(50.0, 9.9)));
    }

    #[test]
    fn test_resize_bottom_right() {
        let mut f = frame();
        assert!(f.resize(HandleKind::BottomRight, Point::new(150.0, 90.0)));
        assert_eq!(f.as_rect(), Rect::new(10.0, 10.0, 150.0, 90.0));
    }

    #[test]
    fn test_resize_top_left_anchors_bottom_right() {
        let mut f = frame();
        assert!(f.resize(HandleKind::TopLeft, Point::new(0.0, 5.0)));
        assert_eq!(f.as_rect(), Rect::new(0.0, 5.0, 110.0, 60.0));
    }

    #[test]
    fn test_resize_edges_touch_one_axis() {
        let mut f = frame();
        assert!(f.resize(HandleKind::Top, Point::new(999.0, 0.0)));
        assert_eq!(f.as_rect(), Rect::new(10.0, 0.0, 110.0, 60.0));

        assert!(f.resize(HandleKind::Left, Point::new(30.0, 999.0)));
        assert_eq!(f.as_rect(), Rect::new(30.0, 0.0, 110.0, 60.0));

        assert!(f.resize(HandleKind::Right, Point::new(200.0, -5.0)));
        assert!(f.resize(HandleKind::Bottom, Point::new(-5.0, 80.0)));
        assert_eq!(f.as_rect(), Rect::new(30.0, 0.0, 200.0, 80.0));
    }

    #[test]
    fn test_resize_below_minimum_is_rejected() {
        let mut f = frame();
        let before = f;
        assert!(!f.resize(HandleKind::BottomRight, Point::new(13.0, 90.0)));
        assert_eq!(f, before);

        // Height passes, width fails: nothing is applied.
        assert!(!f.resize(HandleKind::TopLeft, Point::new(105.0, 0.0)));
        assert_eq!(f, before);
    }

    #[test]
    fn test_resize_exactly_minimum_is_accepted() {
        let mut f = frame();
        assert!(f.resize(HandleKind::Right, Point::new(20.0, 0.0)));
        assert!((f.width - MIN_SHAPE_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_edge_resize_ignores_the_other_axis() {
        // Narrow shapes can still be stretched vertically.
        let mut narrow = Frame::new(Point::new(100.0, 100.0), 6.0, 50.0);
        assert!(narrow.resize(HandleKind::Bottom, Point::new(0.0, 200.0)));
        assert_eq!(narrow.as_rect(), Rect::new(100.0, 100.0, 106.0, 200.0));
        assert!(!narrow.resize(HandleKind::Top, Point::new(0.0, 195.0)));

        // And short ones horizontally.
        let mut short = Frame::new(Point::new(100.0, 100.0), 50.0, 6.0);
        assert!(short.resize(HandleKind::Left, Point::new(20.0, 0.0)));
        assert_eq!(short.as_rect(), Rect::new(20.0, 100.0, 150.0, 106.0));
        assert!(!short.resize(HandleKind::Right, Point::new(25.0, 0.0)));

        // Corners still check both axes.
        assert!(!short.resize(HandleKind::BottomRight, Point::new(300.0, 105.0)));
    }

    #[test]
    fn test_endpoint_handles_do_not_resize_boxes() {
        let mut f = frame();
        assert!(!f.resize(HandleKind::End, Point::new(500.0, 500.0)));
        assert_eq!(f, frame());
    }
}
