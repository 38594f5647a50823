//! Shape definitions for the drawing surface.

mod ellipse;
mod frame;
mod line;
mod polygon;
mod rectangle;

pub use ellipse::Ellipse;
pub use frame::{Frame, MIN_SHAPE_SIZE};
pub use line::{LINE_HIT_TOLERANCE, Line};
pub use polygon::Polygon;
pub use rectangle::Rectangle;

use crate::selection::{Handle, HandleKind, hit_test_handles};
use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub const fn blue() -> Self {
        Self::new(0, 0, 255, 255)
    }

    pub const fn red() -> Self {
        Self::new(255, 0, 0, 255)
    }

    pub const fn gray() -> Self {
        Self::new(128, 128, 128, 255)
    }

    pub const fn light_gray() -> Self {
        Self::new(211, 211, 211, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// A fully transparent color paints nothing.
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Default stroke width for outlined shapes.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

fn default_stroke_width() -> f64 {
    DEFAULT_STROKE_WIDTH
}

/// Style properties for shapes.
///
/// `None` is the "none" marker for either color. A fully transparent color
/// is treated the same way when painting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color (None = no outline).
    pub stroke_color: Option<SerializableColor>,
    /// Fill color (None = no fill).
    pub fill_color: Option<SerializableColor>,
    /// Stroke width in model units.
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
}

impl ShapeStyle {
    /// Create a style with the given stroke and fill.
    pub fn new(
        stroke_color: Option<SerializableColor>,
        fill_color: Option<SerializableColor>,
    ) -> Self {
        Self {
            stroke_color,
            fill_color,
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }

    /// Stroke color to paint, if any.
    pub fn stroke(&self) -> Option<Color> {
        self.stroke_color
            .filter(|c| !c.is_transparent())
            .map(Into::into)
    }

    /// Fill color to paint, if any.
    pub fn fill(&self) -> Option<Color> {
        self.fill_color
            .filter(|c| !c.is_transparent())
            .map(Into::into)
    }

    /// Set the stroke color from a peniko Color.
    pub fn set_stroke(&mut self, color: Option<Color>) {
        self.stroke_color = color.map(Into::into);
    }

    /// Set the fill color from a peniko Color.
    pub fn set_fill(&mut self, color: Option<Color>) {
        self.fill_color = color.map(Into::into);
    }

    /// Whether painting this style produces any pixels.
    pub fn is_visible(&self) -> bool {
        self.stroke().is_some() || self.fill().is_some()
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self::new(Some(SerializableColor::black()), None)
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Whether `bounds` overlaps the canvas rectangle `area`.
///
/// Edges that merely touch do not count, so a shape lying entirely on or
/// beyond the border is rejected.
pub fn bounds_intersect(bounds: Rect, area: Rect) -> bool {
    bounds.x1 > area.x0 && bounds.x0 < area.x1 && bounds.y1 > area.y0 && bounds.y0 < area.y1
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the bounding box in model coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point (in model coordinates) hits this shape.
    fn contains(&self, point: Point) -> bool;

    /// Resize handles in evaluation order.
    fn handles(&self) -> Vec<Handle>;

    /// Drag `handle` to `point`. Returns false if the resize was rejected.
    fn resize(&mut self, handle: HandleKind, point: Point) -> bool;

    /// Move the shape by a delta in model coordinates.
    fn translate(&mut self, delta: Vec2);

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;

    /// Whether the shape is currently selected.
    fn is_selected(&self) -> bool;

    /// Set the selection flag.
    fn set_selected(&mut self, selected: bool);

    /// Resize handle under `point`, only while selected.
    fn handle_at(&self, point: Point) -> Option<HandleKind> {
        if !self.is_selected() {
            return None;
        }
        hit_test_handles(&self.handles(), point)
    }
}

/// Enum wrapper for all shape types (for serialization).
///
/// `Clone` is a deep copy: snapshots taken for undo never alias a live shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Polygon(Polygon),
    Line(Line),
}

impl Shape {
    fn as_trait(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Rectangle(s) => s,
            Shape::Ellipse(s) => s,
            Shape::Polygon(s) => s,
            Shape::Line(s) => s,
        }
    }

    fn as_trait_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            Shape::Rectangle(s) => s,
            Shape::Ellipse(s) => s,
            Shape::Polygon(s) => s,
            Shape::Line(s) => s,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.as_trait().id()
    }

    pub fn bounds(&self) -> Rect {
        self.as_trait().bounds()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.as_trait().contains(point)
    }

    pub fn handles(&self) -> Vec<Handle> {
        self.as_trait().handles()
    }

    pub fn handle_at(&self, point: Point) -> Option<HandleKind> {
        self.as_trait().handle_at(point)
    }

    pub fn resize(&mut self, handle: HandleKind, point: Point) -> bool {
        self.as_trait_mut().resize(handle, point)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.as_trait_mut().translate(delta);
    }

    pub fn style(&self) -> &ShapeStyle {
        self.as_trait().style()
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        self.as_trait_mut().style_mut()
    }

    pub fn is_selected(&self) -> bool {
        self.as_trait().is_selected()
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.as_trait_mut().set_selected(selected);
    }

    /// Test if this shape's bounding box overlaps `area`.
    pub fn intersects_rect(&self, area: Rect) -> bool {
        bounds_intersect(self.bounds(), area)
    }

    /// Variant name, as written in the state file.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Rectangle(_) => "Rectangle",
            Shape::Ellipse(_) => "Ellipse",
            Shape::Polygon(_) => "Polygon",
            Shape::Line(_) => "Line",
        }
    }
}

impl From<Rectangle> for Shape {
    fn from(shape: Rectangle) -> Self {
        Shape::Rectangle(shape)
    }
}

impl From<Ellipse> for Shape {
    fn from(shape: Ellipse) -> Self {
        Shape::Ellipse(shape)
    }
}

impl From<Polygon> for Shape {
    fn from(shape: Polygon) -> Self {
        Shape::Polygon(shape)
    }
}

impl From<Line> for Shape {
    fn from(shape: Line) -> Self {
        Shape::Line(shape)
    }
}
