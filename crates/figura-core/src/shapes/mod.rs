//! Shape definitions for the editor.

mod circle;
mod rectangle;
mod triangle;

pub use circle::Circle;
pub use rectangle::{CornerRadii, Rectangle};
pub use triangle::Triangle;

use kurbo::{Affine, BezPath, Point, Shape as KurboShape};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Serializable color representation (RGBA8), stored as CSS hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid hex color {0:?}, expected #rgb, #rrggbb or #rrggbbaa")]
pub struct ColorParseError(pub String);

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError(hex.to_string());
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return Err(err());
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| err());
        let nibble = |i: usize| {
            u8::from_str_radix(&digits[i..i + 1], 16)
                .map(|v| v * 17)
                .map_err(|_| err())
        };
        match digits.len() {
            3 => Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(err()),
        }
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Scale alpha by `opacity` (clamped to 0..1).
    pub fn with_opacity(self, opacity: f64) -> Self {
        let opacity = if opacity.is_finite() { opacity.clamp(0.0, 1.0) } else { 1.0 };
        Self {
            a: (self.a as f64 * opacity).round() as u8,
            ..self
        }
    }
}

impl fmt::Display for SerializableColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for SerializableColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for SerializableColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<SerializableColor> for String {
    fn from(color: SerializableColor) -> Self {
        color.to_hex()
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

/// Paint properties shared by every shape kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    /// Fill color (None = no fill).
    #[serde(default)]
    pub fill: Option<SerializableColor>,
    /// Stroke color (None = no outline).
    #[serde(default)]
    pub stroke: Option<SerializableColor>,
    /// Stroke width in canvas units.
    #[serde(default)]
    pub stroke_width: f64,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

fn default_opacity() -> f64 {
    1.0
}

impl ShapeStyle {
    /// Style with a solid fill and no outline.
    pub fn filled(fill: SerializableColor) -> Self {
        Self {
            fill: Some(fill),
            ..Self::default()
        }
    }

    /// Get the fill color with opacity applied.
    pub fn fill_with_opacity(&self) -> Option<Color> {
        self.fill.map(|c| c.with_opacity(self.opacity).into())
    }

    /// Get the stroke color with opacity applied, if a visible stroke is set.
    pub fn stroke_with_opacity(&self) -> Option<Color> {
        if !(self.stroke_width.is_finite() && self.stroke_width > 0.0) {
            return None;
        }
        self.stroke.map(|c| c.with_opacity(self.opacity).into())
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: 0.0,
            opacity: 1.0,
        }
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the anchor position (`x`, `y`) in canvas coordinates.
    fn position(&self) -> Point;

    /// Move the anchor position.
    fn set_position(&mut self, position: Point);

    /// Outline in the shape's local frame.
    fn local_path(&self) -> BezPath;

    /// Transform from the local frame to canvas coordinates.
    fn placement(&self) -> Affine;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;
}

/// Enum wrapper for all shape types (for serialization).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
    Triangle(Triangle),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Rectangle(s) => s.id(),
            Shape::Circle(s) => s.id(),
            Shape::Triangle(s) => s.id(),
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Shape::Rectangle(s) => s.position(),
            Shape::Circle(s) => s.position(),
            Shape::Triangle(s) => s.position(),
        }
    }

    pub fn set_position(&mut self, position: Point) {
        match self {
            Shape::Rectangle(s) => s.set_position(position),
            Shape::Circle(s) => s.set_position(position),
            Shape::Triangle(s) => s.set_position(position),
        }
    }

    pub fn local_path(&self) -> BezPath {
        match self {
            Shape::Rectangle(s) => s.local_path(),
            Shape::Circle(s) => s.local_path(),
            Shape::Triangle(s) => s.local_path(),
        }
    }

    pub fn placement(&self) -> Affine {
        match self {
            Shape::Rectangle(s) => s.placement(),
            Shape::Circle(s) => s.placement(),
            Shape::Triangle(s) => s.placement(),
        }
    }

    /// Outline in canvas coordinates.
    pub fn to_path(&self) -> BezPath {
        self.placement() * self.local_path()
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Rectangle(s) => s.style(),
            Shape::Circle(s) => s.style(),
            Shape::Triangle(s) => s.style(),
        }
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        match self {
            Shape::Rectangle(s) => s.style_mut(),
            Shape::Circle(s) => s.style_mut(),
            Shape::Triangle(s) => s.style_mut(),
        }
    }

    /// Check if a canvas point lies inside the shape's filled outline.
    pub fn hit_test(&self, point: Point) -> bool {
        let local = self.placement().inverse() * point;
        self.local_path().contains(local)
    }

    /// Get the rotation angle in degrees (0 for shapes that don't support rotation).
    pub fn rotation(&self) -> f64 {
        match self {
            Shape::Rectangle(r) => r.rotation,
            Shape::Circle(c) => c.rotation,
            Shape::Triangle(_) => 0.0,
        }
    }

    /// Set the rotation angle in degrees. Ignored by triangles.
    pub fn set_rotation(&mut self, rotation: f64) {
        match self {
            Shape::Rectangle(r) => r.rotation = rotation,
            Shape::Circle(c) => c.rotation = rotation,
            Shape::Triangle(_) => {}
        }
    }

    /// Check if this shape supports rotation.
    pub fn supports_rotation(&self) -> bool {
        !matches!(self, Shape::Triangle(_))
    }

    /// Lowercase kind name, as used by the `type` discriminant.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Rectangle(_) => "rectangle",
            Shape::Circle(_) => "circle",
            Shape::Triangle(_) => "triangle",
        }
    }

    pub fn as_triangle(&self) -> Option<&Triangle> {
        match self {
            Shape::Triangle(t) => Some(t),
            _ => None,
        }
    }

    /// Regenerate the shape's ID with a new unique identifier.
    pub fn regenerate_id(&mut self) {
        let new_id = Uuid::new_v4();
        match self {
            Shape::Rectangle(s) => s.id = new_id,
            Shape::Circle(s) => s.id = new_id,
            Shape::Triangle(s) => s.id = new_id,
        }
    }
}

impl From<Rectangle> for Shape {
    fn from(shape: Rectangle) -> Self {
        Shape::Rectangle(shape)
    }
}

impl From<Circle> for Shape {
    fn from(shape: Circle) -> Self {
        Shape::Circle(shape)
    }
}

impl From<Triangle> for Shape {
    fn from(shape: Triangle) -> Self {
        Shape::Triangle(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        let color = SerializableColor::from_hex("#4f46e5").unwrap();
        assert_eq!(color, SerializableColor::rgb(0x4f, 0x46, 0xe5));
        assert_eq!(color.to_hex(), "#4f46e5");

        let translucent = SerializableColor::from_hex("#ff000080").unwrap();
        assert_eq!(translucent.a, 0x80);
        assert_eq!(translucent.to_hex(), "#ff000080");
    }

    #[test]
    fn test_hex_shorthand_and_errors() {
        assert_eq!(SerializableColor::from_hex("#fff").unwrap(), SerializableColor::white());
        assert!(SerializableColor::from_hex("#ggg").is_err());
        assert!(SerializableColor::from_hex("#12345").is_err());
        assert!(SerializableColor::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_color_peniko_conversion() {
        let color = SerializableColor::new(10, 20, 30, 40);
        let peniko: Color = color.into();
        assert_eq!(SerializableColor::from(peniko), color);
    }

    #[test]
    fn test_fill_with_opacity() {
        let mut style = ShapeStyle::filled(SerializableColor::rgb(255, 0, 0));
        style.opacity = 0.5;
        let fill = SerializableColor::from(style.fill_with_opacity().unwrap());
        assert_eq!(fill.a, 128);
        assert_eq!(fill.r, 255);
    }

    #[test]
    fn test_stroke_requires_width() {
        let mut style = ShapeStyle::default();
        style.stroke = Some(SerializableColor::black());
        assert!(style.stroke_with_opacity().is_none());
        style.stroke_width = 2.0;
        assert!(style.stroke_with_opacity().is_some());
    }

    #[test]
    fn test_hit_test_uses_placement() {
        let rect: Shape = Rectangle::new(Point::new(100.0, 100.0), 100.0, 60.0).into();
        assert!(rect.hit_test(Point::new(100.0, 100.0)));
        assert!(rect.hit_test(Point::new(60.0, 80.0)));
        assert!(!rect.hit_test(Point::new(40.0, 100.0)));

        let circle: Shape = Circle::new(Point::new(0.0, 0.0), 40.0, 40.0).into();
        assert!(circle.hit_test(Point::new(20.0, 20.0)));
        assert!(!circle.hit_test(Point::new(35.0, 35.0)));
    }

    #[test]
    fn test_triangle_ignores_rotation() {
        let mut shape: Shape = Triangle::from_vertices([
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        ])
        .into();
        shape.set_rotation(45.0);
        assert!(shape.rotation().abs() < f64::EPSILON);
        assert!(!shape.supports_rotation());
    }

    #[test]
    fn test_regenerate_id() {
        let mut shape: Shape = Circle::new(Point::ZERO, 5.0, 5.0).into();
        let before = shape.id();
        shape.regenerate_id();
        assert_ne!(before, shape.id());
    }
}
