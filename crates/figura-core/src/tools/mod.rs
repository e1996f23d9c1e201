//! Shape creation tools.

use crate::shapes::{Circle, Rectangle, SerializableColor, Shape, ShapeStyle, Triangle};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Default size of a new rectangle.
pub const RECTANGLE_SIZE: (f64, f64) = (100.0, 60.0);
/// Default radius of a new circle.
pub const CIRCLE_RADIUS: f64 = 40.0;
/// Half the width (and height) of a new triangle's bounding box.
pub const TRIANGLE_HALF_EXTENT: f64 = 200.0;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Rectangle,
    Circle,
    Triangle,
}

impl ToolKind {
    /// Fill color given to shapes created by this tool.
    pub fn default_fill(self) -> SerializableColor {
        match self {
            ToolKind::Rectangle => SerializableColor::rgb(0x4f, 0x46, 0xe5),
            ToolKind::Circle => SerializableColor::rgb(0xe1, 0x1d, 0x48),
            ToolKind::Triangle => SerializableColor::rgb(0x14, 0xb8, 0xa6),
        }
    }
}

/// Create a shape with the tool's defaults at a canvas point.
///
/// Rectangles and circles are centred on `point`. Triangles get an apex
/// above `point` and a base below it, normalized to their bounding box.
pub fn create_shape(tool: ToolKind, point: Point) -> Shape {
    let style = ShapeStyle::filled(tool.default_fill());
    match tool {
        ToolKind::Rectangle => {
            let (width, height) = RECTANGLE_SIZE;
            Rectangle::new(point, width, height).with_style(style).into()
        }
        ToolKind::Circle => Circle::circle(point, CIRCLE_RADIUS).with_style(style).into(),
        ToolKind::Triangle => {
            let h = TRIANGLE_HALF_EXTENT;
            Triangle::from_vertices([
                Point::new(point.x, point.y - h),
                Point::new(point.x - h, point.y + h),
                Point::new(point.x + h, point.y + h),
            ])
            .with_style(style)
            .into()
        }
    }
}
