//! Ellipse shape.

use super::{Frame, ShapeId, ShapeStyle, ShapeTrait};
use crate::selection::{Handle, HandleKind};
use kurbo::{Ellipse as KurboEllipse, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ellipse inscribed in its frame.
///
/// Hit testing uses the frame, not the curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub(crate) id: ShapeId,
    #[serde(flatten)]
    pub frame: Frame,
    pub style: ShapeStyle,
    #[serde(default)]
    pub selected: bool,
}

impl Ellipse {
    /// Create an ellipse inside the given box.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            frame: Frame::new(position, width, height),
            style: ShapeStyle::default(),
            selected: false,
        }
    }

    /// Create an ellipse from a bounding rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.origin(), rect.width(), rect.height())
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    /// Get as a kurbo Ellipse.
    pub fn as_kurbo(&self) -> KurboEllipse {
        KurboEllipse::from_rect(self.frame.as_rect())
    }
}

impl ShapeTrait for Ellipse {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.frame.as_rect()
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
    fn test_from_rect() {
        let ellipse = Ellipse::from_rect(Rect::new(20.0, 30.0, 80.0, 70.0));
        assert_eq!(ellipse.bounds(), Rect::new(20.0, 30.0, 80.0, 70.0));
        let kurbo = ellipse.as_kurbo();
        assert!((kurbo.center().x - 50.0).abs() < 1e-9);
        assert!((kurbo.center().y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_box_corner_counts_as_hit() {
        let ellipse = Ellipse::new(Point::new(0.0, 0.0), 100.0, 50.0);
        assert!(ellipse.contains(Point::new(1.0, 1.0)));
        assert!(!ellipse.contains(Point::new(101.0, 1.0)));
    }

    #[test]
    fn test_translate() {
        let mut ellipse = Ellipse::new(Point::new(0.0, 0.0), 100.0, 50.0);
        ellipse.translate(Vec2::new(5.0, -5.0));
        assert_eq!(ellipse.bounds(), Rect::new(5.0, -5.0, 105.0, 45.0));
    }
}
