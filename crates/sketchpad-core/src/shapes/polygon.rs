//! Triangle shape.

use super::{Frame, ShapeId, ShapeStyle, ShapeTrait};
use crate::selection::{Handle, HandleKind};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An isosceles triangle with its apex at the top-centre of its frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub(crate) id: ShapeId,
    #[serde(flatten)]
    pub frame: Frame,
    pub style: ShapeStyle,
    #[serde(default)]
    pub selected: bool,
}

impl Polygon {
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            frame: Frame::new(position, width, height),
            style: ShapeStyle::default(),
            selected: false,
        }
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    /// Apex, bottom-left, bottom-right.
    pub fn vertices(&self) -> [Point; 3] {
        let Rect { x0, y0, x1, y1 } = self.frame.as_rect();
        [
            Point::new((x0 + x1) / 2.0, y0),
            Point::new(x0, y1),
            Point::new(x1, y1),
        ]
    }
}

impl ShapeTrait for Polygon {
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
