//! Geometry kernel.
//!
//! Pure path builders shared by the interactive and the export renderer.
//! Every path is built in the shape's local frame; [`crate::shapes::Shape::placement`]
//! maps that frame onto the canvas.

use crate::shapes::CornerRadii;
use kurbo::{BezPath, Ellipse, Point, Shape as KurboShape, Vec2};
use std::f64::consts::PI;

/// Flattening tolerance for analytic shapes converted to Bézier paths.
pub const PATH_TOLERANCE: f64 = 0.1;

/// Corners whose interior angle is this close to 0 or π are treated as collinear.
const COLLINEAR_EPSILON: f64 = 1e-9;

/// Clamp a corner radius to `[0, min(width / 2, height / 2)]`.
///
/// Non-finite or negative radii collapse to a sharp corner.
pub fn clamp_corner_radius(radius: f64, width: f64, height: f64) -> f64 {
    if !radius.is_finite() || radius <= 0.0 {
        return 0.0;
    }
    let limit = (width / 2.0).min(height / 2.0);
    if !limit.is_finite() || limit <= 0.0 {
        return 0.0;
    }
    radius.min(limit)
}

/// Build the outline of a rectangle with independently rounded corners.
///
/// The contour starts at the end of the top-left arc and runs clockwise:
/// four straight edges, each followed by a quadratic corner arc whose control
/// point is the sharp corner itself. The top-left corner sits at the origin.
pub fn rectangle_path(width: f64, height: f64, radii: CornerRadii) -> BezPath {
    let r = radii.clamped(width, height);
    let (w, h) = (width, height);

    let mut path = BezPath::new();
    path.move_to((r.top_left, 0.0));
    path.line_to((w - r.top_right, 0.0));
    path.quad_to((w, 0.0), (w, r.top_right));
    path.line_to((w, h - r.bottom_right));
    path.quad_to((w, h), (w - r.bottom_right, h));
    path.line_to((r.bottom_left, h));
    path.quad_to((0.0, h), (0.0, h - r.bottom_left));
    path.line_to((0.0, r.top_left));
    path.quad_to((0.0, 0.0), (r.top_left, 0.0));
    path.close_path();
    path
}

/// Build a full ellipse centred at the origin, rotated by `rotation_degrees`.
pub fn ellipse_path(radius_x: f64, radius_y: f64, rotation_degrees: f64) -> BezPath {
    let rotation = if rotation_degrees.is_finite() {
        rotation_degrees.to_radians()
    } else {
        0.0
    };
    Ellipse::new(
        Point::ORIGIN,
        Vec2::new(finite_extent(radius_x), finite_extent(radius_y)),
        rotation,
    )
    .to_path(PATH_TOLERANCE)
}

fn finite_extent(value: f64) -> f64 {
    if value.is_finite() { value.abs() } else { 0.0 }
}

/// Tangent points of a rounding arc at one polygon vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerArc {
    /// The unrounded vertex (control point of the arc).
    pub vertex: Point,
    /// Where the arc meets the edge towards the previous vertex.
    pub tangent_in: Point,
    /// Where the arc meets the edge towards the next vertex.
    pub tangent_out: Point,
}

impl CornerArc {
    /// A sharp corner: both tangent points coincide with the vertex.
    pub fn sharp(vertex: Point) -> Self {
        Self {
            vertex,
            tangent_in: vertex,
            tangent_out: vertex,
        }
    }

    /// True when no arc is drawn at this corner.
    pub fn is_sharp(&self) -> bool {
        self.tangent_in == self.vertex && self.tangent_out == self.vertex
    }
}

/// Compute where an arc of `radius` touches the two edges adjacent to `vertex`.
///
/// The tangent length along each edge is `radius / tan(angle / 2)` where
/// `angle` is the interior angle between the edges. A zero radius, a
/// zero-length edge, a collinear corner or any non-finite input yields a
/// sharp corner instead of propagating NaN or infinity.
pub fn triangle_corner_arc(prev: Point, vertex: Point, next: Point, radius: f64) -> CornerArc {
    let sharp = CornerArc::sharp(vertex);
    if !radius.is_finite() || radius <= 0.0 {
        return sharp;
    }
    let (Some(towards_prev), Some(towards_next)) = (unit(prev - vertex), unit(next - vertex))
    else {
        return sharp;
    };

    let angle = towards_prev.dot(towards_next).clamp(-1.0, 1.0).acos();
    if angle < COLLINEAR_EPSILON || PI - angle < COLLINEAR_EPSILON {
        return sharp;
    }

    let tangent = radius / (angle / 2.0).tan();
    if !tangent.is_finite() {
        return sharp;
    }

    CornerArc {
        vertex,
        tangent_in: vertex + towards_prev * tangent,
        tangent_out: vertex + towards_next * tangent,
    }
}

fn unit(v: Vec2) -> Option<Vec2> {
    let len = v.hypot();
    (len.is_finite() && len > f64::EPSILON).then(|| v / len)
}

/// Corner arcs for all three vertices; each depends on its cyclic neighbours.
pub fn triangle_corners(points: &[Point; 3], radii: &[f64; 3]) -> [CornerArc; 3] {
    std::array::from_fn(|i| {
        let prev = points[(i + 2) % 3];
        let next = points[(i + 1) % 3];
        triangle_corner_arc(prev, points[i], next, radii[i])
    })
}

/// Build the outline of a triangle with per-vertex rounded corners.
///
/// The contour runs `p0 → p1 → p2 → p0`, alternating straight edges and
/// quadratic corner arcs. Sharp corners are visited as plain vertices.
pub fn triangle_path(points: &[Point; 3], radii: &[f64; 3]) -> BezPath {
    let corners = triangle_corners(points, radii);

    let mut path = BezPath::new();
    path.move_to(corners[0].tangent_out);
    for corner in &corners[1..] {
        path.line_to(corner.tangent_in);
        if !corner.is_sharp() {
            path.quad_to(corner.vertex, corner.tangent_out);
        }
    }
    let first = corners[0];
    if !first.is_sharp() {
        path.line_to(first.tangent_in);
        path.quad_to(first.vertex, first.tangent_out);
    }
    path.close_path();
    path
}
