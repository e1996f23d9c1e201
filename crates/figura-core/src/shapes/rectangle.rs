//! Rectangle shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use crate::geometry::{clamp_corner_radius, rectangle_path};
use kurbo::{Affine, BezPath, Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Independent radii for the four rectangle corners.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CornerRadii {
    #[serde(rename = "cornerRadiusTopLeft", default)]
    pub top_left: f64,
    #[serde(rename = "cornerRadiusTopRight", default)]
    pub top_right: f64,
    #[serde(rename = "cornerRadiusBottomRight", default)]
    pub bottom_right: f64,
    #[serde(rename = "cornerRadiusBottomLeft", default)]
    pub bottom_left: f64,
}

impl CornerRadii {
    /// Same radius on every corner.
    pub fn uniform(radius: f64) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    /// Each radius clamped to `[0, min(width / 2, height / 2)]`.
    pub fn clamped(&self, width: f64, height: f64) -> Self {
        Self {
            top_left: clamp_corner_radius(self.top_left, width, height),
            top_right: clamp_corner_radius(self.top_right, width, height),
            bottom_right: clamp_corner_radius(self.bottom_right, width, height),
            bottom_left: clamp_corner_radius(self.bottom_left, width, height),
        }
    }
}

/// A rectangle with independently rounded corners.
///
/// `(x, y)` is the centre; rotation (degrees) is applied around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(flatten)]
    pub corner_radii: CornerRadii,
    #[serde(default)]
    pub rotation: f64,
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Create a new rectangle centred on `center`.
    pub fn new(center: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: center.x,
            y: center.y,
            width,
            height,
            corner_radii: CornerRadii::default(),
            rotation: 0.0,
            style: ShapeStyle::default(),
        }
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_corner_radii(mut self, radii: CornerRadii) -> Self {
        self.corner_radii = radii;
        self
    }
}

impl ShapeTrait for Rectangle {
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
        rectangle_path(self.width, self.height, self.corner_radii)
    }

    fn placement(&self) -> Affine {
        Affine::translate(Vec2::new(self.x, self.y))
            * Affine::rotate(self.rotation.to_radians())
            * Affine::translate(Vec2::new(-self.width / 2.0, -self.height / 2.0))
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}
