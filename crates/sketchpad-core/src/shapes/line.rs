//! Line shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use crate::selection::{Handle, HandleKind, endpoint_handles};
use kurbo::{Line as KurboLine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum distance from the segment that still counts as a hit.
pub const LINE_HIT_TOLERANCE: f64 = 5.0;

/// A straight segment between two explicit endpoints.
///
/// The bounding box is derived from the endpoints on demand, so moving and
/// resizing only ever touch `start` and `end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: ShapeId,
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Style properties. Only the stroke is painted.
    pub style: ShapeStyle,
    #[serde(default)]
    pub selected: bool,
}

impl Line {
    /// Create a new line.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            style: ShapeStyle::default(),
            selected: false,
        }
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    /// Get the length of the line.
    pub fn length(&self) -> f64 {
        (self.end - self.start).hypot()
    }

    /// Get the midpoint of the line.
    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Get as a kurbo Line.
    pub fn as_kurbo(&self) -> KurboLine {
        KurboLine::new(self.start, self.end)
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    fn contains(&self, point: Point) -> bool {
        let line_vec = self.end - self.start;
        let point_vec = point - self.start;

        let line_len_sq = line_vec.hypot2();
        if line_len_sq < f64::EPSILON {
            // Line is a point
            return point_vec.hypot() <= LINE_HIT_TOLERANCE;
        }

        // Only points whose projection falls on the segment itself count.
        let t = point_vec.dot(line_vec) / line_len_sq;
        if !(0.0..=1.0).contains(&t) {
            return false;
        }

        let distance = point_vec.cross(line_vec).abs() / line_len_sq.sqrt();
        distance <= LINE_HIT_TOLERANCE
    }

    fn handles(&self) -> Vec<Handle> {
        endpoint_handles(self.start, self.end)
    }

    fn resize(&mut self, handle: HandleKind, point: Point) -> bool {
        match handle {
            HandleKind::Start => self.start = point,
            HandleKind::End => self.end = point,
            _ => return false,
        }
        true
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
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

    fn horizontal() -> Line {
        Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0))
    }

    #[test]
    fn test_line_creation() {
        let line = horizontal();
        assert!((line.length() - 100.0).abs() < f64::EPSILON);
        assert_eq!(line.midpoint(), Point::new(50.0, 0.0));
    }

    #[test]
    fn test_contains_near_segment() {
        let line = horizontal();
        assert!(line.contains(Point::new(50.0, 4.0)));
        assert!(line.contains(Point::new(50.0, -5.0)));
        assert!(!line.contains(Point::new(50.0, 10.0)));
    }

    #[test]
    fn test_contains_outside_segment_span() {
        let line = horizontal();
        assert!(!line.contains(Point::new(150.0, 0.0)));
        assert!(!line.contains(Point::new(-1.0, 0.0)));
        assert!(line.contains(Point::new(0.0, 0.0)));
        assert!(line.contains(Point::new(100.0, 3.0)));
    }

    #[test]
    fn test_contains_diagonal() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        assert!(line.contains(Point::new(52.0, 48.0)));
        assert!(!line.contains(Point::new(60.0, 40.0)));
    }

    #[test]
    fn test_degenerate_line_hits_near_point() {
        let line = Line::new(Point::new(10.0, 10.0), Point::new(10.0, 10.0));
        assert!(line.contains(Point::new(13.0, 14.0)));
        assert!(!line.contains(Point::new(16.0, 10.0)));
    }

    #[test]
    fn test_bounds() {
        let line = Line::new(Point::new(50.0, 80.0), Point::new(10.0, 20.0));
        assert_eq!(line.bounds(), Rect::new(10.0, 20.0, 50.0, 80.0));
    }

    #[test]
    fn test_translate_moves_both_endpoints() {
        let mut line = horizontal();
        line.translate(Vec2::new(10.0, 20.0));
        assert_eq!(line.start, Point::new(10.0, 20.0));
        assert_eq!(line.end, Point::new(110.0, 20.0));
        assert_eq!(line.bounds(), Rect::new(10.0, 20.0, 110.0, 20.0));
    }

    #[test]
    fn test_resize_endpoint_is_unconditional() {
        let mut line = horizontal();
        assert!(line.resize(HandleKind::End, Point::new(1.0, 1.0)));
        assert_eq!(line.end, Point::new(1.0, 1.0));
        assert_eq!(line.start, Point::ZERO);

        assert!(line.resize(HandleKind::Start, Point::new(-30.0, 0.0)));
        assert_eq!(line.start, Point::new(-30.0, 0.0));

        assert!(!line.resize(HandleKind::BottomRight, Point::new(500.0, 500.0)));
        assert_eq!(line.end, Point::new(1.0, 1.0));
    }

    #[test]
    fn test_only_endpoint_handles() {
        let mut line = horizontal();
        line.set_selected(true);
        assert_eq!(line.handles().len(), 2);
        assert_eq!(line.handle_at(Point::new(2.0, -3.0)), Some(HandleKind::Start));
        assert_eq!(line.handle_at(Point::new(99.0, 4.0)), Some(HandleKind::End));
        assert_eq!(line.handle_at(Point::new(50.0, 0.0)), None);
    }
}
