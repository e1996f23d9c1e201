//! Triangle shape with per-vertex rounded corners.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use crate::geometry::triangle_path;
use kurbo::{Affine, BezPath, Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A triangle stored as an origin plus three vertex offsets.
///
/// The origin is kept at the top-left of the vertices' bounding box, so
/// offsets are non-negative. Rotation is not supported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Triangle {
    pub(crate) id: ShapeId,
    pub x: f64,
    pub y: f64,
    /// Vertex offsets relative to `(x, y)`.
    pub points: [Point; 3],
    /// Corner radius per vertex (0 = sharp).
    #[serde(default)]
    pub corner_radii: [f64; 3],
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Triangle {
    /// Create a triangle from absolute canvas vertices.
    pub fn from_vertices(vertices: [Point; 3]) -> Self {
        let mut triangle = Self {
            id: Uuid::new_v4(),
            x: 0.0,
            y: 0.0,
            points: vertices,
            corner_radii: [0.0; 3],
            style: ShapeStyle::default(),
        };
        triangle.normalize();
        triangle
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_corner_radii(mut self, radii: [f64; 3]) -> Self {
        self.corner_radii = radii;
        self
    }

    /// Absolute canvas positions of the three vertices.
    pub fn vertices(&self) -> [Point; 3] {
        let origin = Vec2::new(self.x, self.y);
        self.points.map(|p| p + origin)
    }

    /// Mean of the three absolute vertices.
    pub fn centroid(&self) -> Point {
        let [a, b, c] = self.vertices();
        Point::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0)
    }

    /// Move one vertex to an absolute canvas position and re-normalize.
    ///
    /// Returns false for an index outside `0..3`.
    pub fn set_vertex(&mut self, index: usize, position: Point) -> bool {
        let mut vertices = self.vertices();
        let Some(slot) = vertices.get_mut(index) else {
            return false;
        };
        *slot = position;
        self.points = vertices;
        self.x = 0.0;
        self.y = 0.0;
        self.normalize();
        true
    }

    /// Move the origin to the top-left of the vertices' bounding box,
    /// shifting offsets inversely so absolute vertices are unchanged.
    pub fn normalize(&mut self) {
        let min_x = self.points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = self.points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        if !min_x.is_finite() || !min_y.is_finite() {
            return;
        }
        let shift = Vec2::new(min_x, min_y);
        self.points = self.points.map(|p| p - shift);
        self.x += min_x;
        self.y += min_y;
    }
}

impl ShapeTrait for Triangle {
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
        triangle_path(&self.points, &self.corner_radii)
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
