//! Selection outline and resize handle geometry.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Side length of a square resize handle, in model units.
pub const HANDLE_SIZE: f64 = 8.0;
/// Gap between a shape's bounds and its dashed selection outline.
pub const SELECTION_OUTLINE_OFFSET: f64 = 2.0;

/// Type of resize handle.
///
/// Box shapes expose the four corners and four edge midpoints; lines expose
/// their two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
    Start,
    End,
}

impl HandleKind {
    /// The eight box handles in hit-test order: corners, then edges.
    pub const BOX: [HandleKind; 8] = [
        HandleKind::TopLeft,
        HandleKind::TopRight,
        HandleKind::BottomLeft,
        HandleKind::BottomRight,
        HandleKind::Top,
        HandleKind::Bottom,
        HandleKind::Left,
        HandleKind::Right,
    ];
}

/// A resize handle with its position and type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Centre of the handle in model coordinates.
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// The square painted for this handle.
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.position, (HANDLE_SIZE, HANDLE_SIZE))
    }

    /// Inclusive test against the handle square.
    pub fn hit_test(&self, point: Point) -> bool {
        let half = HANDLE_SIZE / 2.0;
        (point.x - self.position.x).abs() <= half && (point.y - self.position.y).abs() <= half
    }
}

/// Position of a box handle on `bounds`.
fn box_handle_position(bounds: Rect, kind: HandleKind) -> Point {
    let center = bounds.center();
    match kind {
        HandleKind::TopLeft => Point::new(bounds.x0, bounds.y0),
        HandleKind::TopRight => Point::new(bounds.x1, bounds.y0),
        HandleKind::BottomLeft => Point::new(bounds.x0, bounds.y1),
        HandleKind::BottomRight => Point::new(bounds.x1, bounds.y1),
        HandleKind::Top => Point::new(center.x, bounds.y0),
        HandleKind::Bottom => Point::new(center.x, bounds.y1),
        HandleKind::Left => Point::new(bounds.x0, center.y),
        HandleKind::Right | HandleKind::Start | HandleKind::End => Point::new(bounds.x1, center.y),
    }
}

/// Corner and edge handles for a bounding rectangle, in hit-test order.
pub fn box_handles(bounds: Rect) -> Vec<Handle> {
    HandleKind::BOX
        .iter()
        .map(|&kind| Handle::new(box_handle_position(bounds, kind), kind))
        .collect()
}

/// Endpoint handles for a line, start first.
pub fn endpoint_handles(start: Point, end: Point) -> Vec<Handle> {
    vec![
        Handle::new(start, HandleKind::Start),
        Handle::new(end, HandleKind::End),
    ]
}

/// First handle (in slice order) containing `point`.
pub fn hit_test_handles(handles: &[Handle], point: Point) -> Option<HandleKind> {
    handles.iter().find(|h| h.hit_test(point)).map(|h| h.kind)
}

/// Dashed outline drawn around a selected shape.
pub fn selection_outline(bounds: Rect) -> Rect {
    bounds.inflate(SELECTION_OUTLINE_OFFSET, SELECTION_OUTLINE_OFFSET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_handle_positions() {
        let handles = box_handles(Rect::new(0.0, 0.0, 100.0, 50.0));
        let positions: Vec<Point> = handles.iter().map(|h| h.position).collect();
        assert_eq!(
            positions,
            vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(0.0, 50.0),
                Point::new(100.0, 50.0),
                Point::new(50.0, 0.0),
                Point::new(50.0, 50.0),
                Point::new(0.0, 25.0),
                Point::new(100.0, 25.0),
            ]
        );
    }

    #[test]
    fn test_handle_hit_is_inclusive_square() {
        let handle = Handle::new(Point::new(10.0, 10.0), HandleKind::TopLeft);
        assert!(handle.hit_test(Point::new(14.0, 6.0)));
        assert!(!handle.hit_test(Point::new(14.1, 10.0)));
        assert_eq!(handle.rect(), Rect::new(6.0, 6.0, 14.0, 14.0));
    }

    #[test]
    fn test_corners_win_over_edges() {
        // On a tiny box every handle overlaps; corners are tested first.
        let handles = box_handles(Rect::new(0.0, 0.0, 6.0, 6.0));
        assert_eq!(hit_test_handles(&handles, Point::new(3.0, 3.0)), Some(HandleKind::TopLeft));
        assert_eq!(hit_test_handles(&handles, Point::new(7.0, 3.0)), Some(HandleKind::TopRight));
    }

    #[test]
    fn test_edge_midpoint_hit() {
        let handles = box_handles(Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(hit_test_handles(&handles, Point::new(50.0, 52.0)), Some(HandleKind::Bottom));
        assert_eq!(hit_test_handles(&handles, Point::new(-3.0, 25.0)), Some(HandleKind::Left));
        assert_eq!(hit_test_handles(&handles, Point::new(30.0, 25.0)), None);
    }

    #[test]
    fn test_selection_outline() {
        assert_eq!(
            selection_outline(Rect::new(10.0, 10.0, 110.0, 60.0)),
            Rect::new(8.0, 8.0, 112.0, 62.0)
        );
    }
}
