//! Axis-aligned bounding boxes for heterogeneous shapes.

use crate::shapes::Shape;
use kurbo::{Point, Rect, Vec2};

/// An axis-aligned box in canvas coordinates. Rotation is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

fn finite(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

impl BoundingBox {
    /// Build a box, replacing non-finite components with 0.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: finite(x),
            y: finite(y),
            width: finite(width),
            height: finite(height),
        }
    }

    /// Bounding box of a shape.
    ///
    /// Rectangles and circles are centred on their anchor; triangles
    /// extend from their origin to the largest vertex offset.
    pub fn of(shape: &Shape) -> Self {
        match shape {
            Shape::Rectangle(r) => Self::new(
                r.x - r.width / 2.0,
                r.y - r.height / 2.0,
                r.width,
                r.height,
            ),
            Shape::Circle(c) => Self::new(
                c.x - c.radius_x,
                c.y - c.radius_y,
                2.0 * c.radius_x,
                2.0 * c.radius_y,
            ),
            Shape::Triangle(t) => {
                let max_x = t.points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
                let max_y = t.points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
                Self::new(t.x, t.y, max_x, max_y)
            }
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    /// The same box shifted by `delta`.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.left(), self.top(), self.right(), self.bottom())
    }
}

impl From<Rect> for BoundingBox {
    fn from(rect: Rect) -> Self {
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }
}
