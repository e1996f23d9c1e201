//! Circle (ellipse) shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use crate::geometry::ellipse_path;
use kurbo::{Affine, BezPath, Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ellipse centred on `(x, y)`.
///
/// Rotation is baked into the local path, so the placement is a pure
/// translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circle {
    pub(crate) id: ShapeId,
    pub x: f64,
    pub y: f64,
    pub radius_x: f64,
    pub radius_y: f64,
    /// Rotation angle in degrees.
    #[serde(default)]
    pub rotation: f64,
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Circle {
    /// Create a new ellipse.
    pub fn new(center: Point, radius_x: f64, radius_y: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: center.x,
            y: center.y,
            radius_x,
            radius_y,
            rotation: 0.0,
            style: ShapeStyle::default(),
        }
    }

    /// Create a circle with equal radii.
    pub fn circle(center: Point, radius: f64) -> Self {
        Self::new(center, radius, radius)
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    fn local_path(&self) -> BezPath {
        ellipse_path(self.radius_x, self.radius_y, self.rotation)
    }

    fn placement(&self) -> Affine {
        Affine::translate(Vec2::new(self.x, self.y))
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}
