//! Snap functionality for aligning shapes to the grid and to each other.

use crate::bounds::BoundingBox;
use crate::shapes::{Shape, ShapeId};
use kurbo::{Point, Size, Vec2};

/// Grid spacing for snapping (matches the visual grid).
pub const DEFAULT_GRID_SPACING: f64 = 50.0;

/// Distance under which a box edge snaps to a neighbour's edge.
pub const GUIDE_THRESHOLD: f64 = 5.0;

/// Distance under which a dragged triangle vertex snaps to another triangle.
pub const VERTEX_SNAP_THRESHOLD: f64 = 7.0;

/// Snap toggles and thresholds used during gestures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapSettings {
    /// Grid snapping on drag/resize end (follows grid visibility).
    pub grid_enabled: bool,
    pub grid_spacing: f64,
    /// Neighbour guides during drag moves.
    pub guides_enabled: bool,
    pub guide_threshold: f64,
    pub vertex_threshold: f64,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            grid_enabled: true,
            grid_spacing: DEFAULT_GRID_SPACING,
            guides_enabled: true,
            guide_threshold: GUIDE_THRESHOLD,
            vertex_threshold: VERTEX_SNAP_THRESHOLD,
        }
    }
}

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The snapped point.
    pub point: Point,
    /// Whether the X coordinate was snapped.
    pub snapped_x: bool,
    /// Whether the Y coordinate was snapped.
    pub snapped_y: bool,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            snapped_x: false,
            snapped_y: false,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Round `value` to the nearest multiple of `spacing`.
///
/// Identity when `spacing` is not a positive finite number.
pub fn snap_to_grid(value: f64, spacing: f64) -> f64 {
    if !(spacing.is_finite() && spacing > 0.0) {
        return value;
    }
    (value / spacing).round() * spacing
}

/// Snap a point to the nearest grid intersection.
pub fn snap_point_to_grid(point: Point, spacing: f64) -> SnapResult {
    if !(spacing.is_finite() && spacing > 0.0) {
        return SnapResult::none(point);
    }
    SnapResult {
        point: Point::new(snap_to_grid(point.x, spacing), snap_to_grid(point.y, spacing)),
        snapped_x: true,
        snapped_y: true,
    }
}

/// Orientation of a guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideOrientation {
    Vertical,
    Horizontal,
}

/// A transient alignment line shown while dragging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLine {
    pub orientation: GuideOrientation,
    /// The matched coordinate (x for vertical guides, y for horizontal).
    pub value: f64,
    /// Endpoints spanning the canvas.
    pub points: [Point; 2],
}

impl GuideLine {
    pub fn vertical(x: f64, extent: Size) -> Self {
        Self {
            orientation: GuideOrientation::Vertical,
            value: x,
            points: [Point::new(x, 0.0), Point::new(x, extent.height)],
        }
    }

    pub fn horizontal(y: f64, extent: Size) -> Self {
        Self {
            orientation: GuideOrientation::Horizontal,
            value: y,
            points: [Point::new(0.0, y), Point::new(extent.width, y)],
        }
    }
}

/// Reference values of a bounding box used for alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    CenterX,
    Top,
    Bottom,
    CenterY,
}

impl Edge {
    pub fn value(self, bbox: &BoundingBox) -> f64 {
        match self {
            Edge::Left => bbox.left(),
            Edge::Right => bbox.right(),
            Edge::CenterX => bbox.center_x(),
            Edge::Top => bbox.top(),
            Edge::Bottom => bbox.bottom(),
            Edge::CenterY => bbox.center_y(),
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Edge::Left | Edge::Right | Edge::CenterX)
    }
}

/// Pairings of (moving edge, static edge), evaluated in this order.
pub const EDGE_PAIRS: [(Edge, Edge); 16] = [
    (Edge::Top, Edge::Top),
    (Edge::Top, Edge::Bottom),
    (Edge::Bottom, Edge::Top),
    (Edge::Bottom, Edge::Bottom),
    (Edge::CenterY, Edge::Top),
    (Edge::CenterY, Edge::Bottom),
    (Edge::Top, Edge::CenterY),
    (Edge::Bottom, Edge::CenterY),
    (Edge::Left, Edge::Left),
    (Edge::Left, Edge::Right),
    (Edge::Right, Edge::Left),
    (Edge::Right, Edge::Right),
    (Edge::CenterX, Edge::Left),
    (Edge::CenterX, Edge::Right),
    (Edge::Left, Edge::CenterX),
    (Edge::Right, Edge::CenterX),
];

/// Outcome of snapping a dragged box against its neighbours.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSnap {
    /// The moving box after every applied shift.
    pub bbox: BoundingBox,
    pub guides: Vec<GuideLine>,
    pub snapped_x: bool,
    pub snapped_y: bool,
}

impl BoxSnap {
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Snap a moving box to the edges and centres of other boxes.
///
/// Each other box is visited in order and every pairing of [`EDGE_PAIRS`]
/// tested against the box as shifted by earlier hits. A hit is a distance
/// strictly below `threshold`; it moves the box so the two values coincide
/// and records a guide through the static value.
pub fn snap_box_to_neighbors<I>(
    moving: BoundingBox,
    others: I,
    threshold: f64,
    extent: Size,
) -> BoxSnap
where
    I: IntoIterator<Item = BoundingBox>,
{
    let mut result = BoxSnap {
        bbox: moving,
        guides: Vec::new(),
        snapped_x: false,
        snapped_y: false,
    };

    for other in others {
        for (moving_edge, static_edge) in EDGE_PAIRS {
            let moving_value = moving_edge.value(&result.bbox);
            let static_value = static_edge.value(&other);
            if (moving_value - static_value).abs() >= threshold {
                continue;
            }
            let delta = static_value - moving_value;
            if moving_edge.is_vertical() {
                result.bbox = result.bbox.translated(Vec2::new(delta, 0.0));
                result.guides.push(GuideLine::vertical(static_value, extent));
                result.snapped_x = true;
            } else {
                result.bbox = result.bbox.translated(Vec2::new(0.0, delta));
                result.guides.push(GuideLine::horizontal(static_value, extent));
                result.snapped_y = true;
            }
            log::debug!(
                "Guide snap {:?} -> {:?} at {:.1}",
                moving_edge,
                static_edge,
                static_value
            );
        }
    }

    result
}

/// Outcome of snapping a single vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexSnap {
    pub result: SnapResult,
    pub guides: Vec<GuideLine>,
}

/// Snap a point to candidate points, each axis independently.
///
/// For each axis the first candidate within `threshold` wins; a guide is
/// emitted for every matched axis.
pub fn snap_vertex(point: Point, candidates: &[Point], threshold: f64, extent: Size) -> VertexSnap {
    let mut result = SnapResult::none(point);
    let mut guides = Vec::new();

    if let Some(c) = candidates.iter().find(|c| (point.x - c.x).abs() < threshold) {
        result.point.x = c.x;
        result.snapped_x = true;
        guides.push(GuideLine::vertical(c.x, extent));
    }
    if let Some(c) = candidates.iter().find(|c| (point.y - c.y).abs() < threshold) {
        result.point.y = c.y;
        result.snapped_y = true;
        guides.push(GuideLine::horizontal(c.y, extent));
    }

    VertexSnap { result, guides }
}

/// Vertex snap targets: every other triangle's three vertices, then its centroid.
pub fn triangle_snap_candidates(shapes: &[Shape], exclude: ShapeId) -> Vec<Point> {
    shapes
        .iter()
        .filter(|s| s.id() != exclude)
        .filter_map(Shape::as_triangle)
        .flat_map(|t| {
            let [a, b, c] = t.vertices();
            [a, b, c, t.centroid()]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Triangle};
    use proptest::prelude::*;

    const EXTENT: Size = Size::new(800.0, 600.0);

    #[test]
    fn test_snap_to_grid() {
        assert!((snap_to_grid(23.0, 20.0) - 20.0).abs() < f64::EPSILON);
        assert!((snap_to_grid(31.0, 20.0) - 40.0).abs() < f64::EPSILON);
        assert!((snap_to_grid(130.0, 50.0) - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snap_to_grid_invalid_spacing() {
        assert!((snap_to_grid(23.0, 0.0) - 23.0).abs() < f64::EPSILON);
        assert!((snap_to_grid(23.0, -5.0) - 23.0).abs() < f64::EPSILON);
        assert!((snap_to_grid(23.0, f64::NAN) - 23.0).abs() < f64::EPSILON);
        assert!(!snap_point_to_grid(Point::new(1.0, 2.0), 0.0).is_snapped());
    }

    #[test]
    fn test_snap_point_to_grid() {
        let result = snap_point_to_grid(Point::new(23.0, 47.0), 20.0);
        assert_eq!(result.point, Point::new(20.0, 40.0));
        assert!(result.snapped_x && result.snapped_y);
    }

    #[test]
    fn test_right_edge_snaps_to_left_edge() {
        let other = BoundingBox::new(100.0, 100.0, 100.0, 60.0);
        let moving = BoundingBox::new(203.0, 300.0, 100.0, 60.0);
        let snap = snap_box_to_neighbors(moving, [other], GUIDE_THRESHOLD, EXTENT);

        assert!((snap.bbox.left() - 200.0).abs() < f64::EPSILON);
        assert!((snap.bbox.top() - 300.0).abs() < f64::EPSILON);
        assert_eq!(snap.guides.len(), 1);
        assert_eq!(snap.guides[0].orientation, GuideOrientation::Vertical);
        assert!((snap.guides[0].value - 200.0).abs() < f64::EPSILON);
        assert_eq!(snap.guides[0].points[1], Point::new(200.0, 600.0));
        assert!(snap.snapped_x && !snap.snapped_y);
    }

    #[test]
    fn test_left_edges_align() {
        let other = BoundingBox::new(100.0, 0.0, 50.0, 50.0);
        let moving = BoundingBox::new(103.0, 300.0, 80.0, 40.0);
        let snap = snap_box_to_neighbors(moving, [other], GUIDE_THRESHOLD, EXTENT);
        assert!((snap.bbox.left() - 100.0).abs() < f64::EPSILON);
        assert_eq!(snap.guides.len(), 1);
    }

    #[test]
    fn test_threshold_is_strict() {
        let other = BoundingBox::new(100.0, 100.0, 100.0, 60.0);
        let moving = BoundingBox::new(205.0, 300.0, 100.0, 60.0);
        let snap = snap_box_to_neighbors(moving, [other], GUIDE_THRESHOLD, EXTENT);
        assert_eq!(snap.bbox, moving);
        assert!(snap.guides.is_empty());
        assert!(!snap.is_snapped());
    }

    #[test]
    fn test_cascading_uses_shifted_box() {
        // Same-size boxes: top/top hits first and the shifted box then
        // matches bottom/bottom as well.
        let other = BoundingBox::new(0.0, 100.0, 50.0, 50.0);
        let moving = BoundingBox::new(400.0, 102.0, 50.0, 50.0);
        let snap = snap_box_to_neighbors(moving, [other], GUIDE_THRESHOLD, EXTENT);
        assert!((snap.bbox.top() - 100.0).abs() < f64::EPSILON);
        let horizontal: Vec<f64> = snap
            .guides
            .iter()
            .filter(|g| g.orientation == GuideOrientation::Horizontal)
            .map(|g| g.value)
            .collect();
        assert_eq!(horizontal, vec![100.0, 150.0]);
    }

    #[test]
    fn test_snap_vertex_first_match_per_axis() {
        let candidates = [Point::new(100.0, 500.0), Point::new(104.0, 200.0)];
        let snap = snap_vertex(Point::new(102.0, 205.0), &candidates, VERTEX_SNAP_THRESHOLD, EXTENT);
        assert_eq!(snap.result.point, Point::new(100.0, 200.0));
        assert_eq!(snap.guides.len(), 2);
        assert_eq!(snap.guides[0].orientation, GuideOrientation::Vertical);
    }

    #[test]
    fn test_snap_vertex_no_match() {
        let snap = snap_vertex(Point::new(0.0, 0.0), &[Point::new(50.0, 50.0)], 7.0, EXTENT);
        assert!(!snap.result.is_snapped());
        assert!(snap.guides.is_empty());
    }

    #[test]
    fn test_triangle_snap_candidates() {
        let a: Shape = Triangle::from_vertices([
            Point::new(0.0, 0.0),
            Point::new(30.0, 0.0),
            Point::new(0.0, 30.0),
        ])
        .into();
        let b: Shape = Triangle::from_vertices([
            Point::new(100.0, 100.0),
            Point::new(130.0, 100.0),
            Point::new(100.0, 130.0),
        ])
        .into();
        let c: Shape = Circle::circle(Point::ZERO, 10.0).into();
        let shapes = vec![a.clone(), b, c];

        let candidates = triangle_snap_candidates(&shapes, a.id());
        assert_eq!(candidates.len(), 4);
        assert_eq!(candidates[0], Point::new(100.0, 100.0));
        assert!((candidates[3].x - 110.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn grid_snap_is_idempotent(value in -1.0e6f64..1.0e6, spacing in 0.5f64..500.0) {
            let once = snap_to_grid(value, spacing);
            prop_assert!((snap_to_grid(once, spacing) - once).abs() < 1e-6);
        }

        #[test]
        fn far_boxes_never_snap(gap in 5.0f64..1000.0, y in 0.0f64..500.0) {
            let other = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
            let moving = BoundingBox::new(10.0 + gap, 1000.0 + y, 10.0, 10.0);
            let snap = snap_box_to_neighbors(moving, [other], GUIDE_THRESHOLD, EXTENT);
            prop_assert_eq!(snap.bbox, moving);
            prop_assert!(snap.guides.is_empty());
        }
    }
}
