//! Drag and transform gestures.
//!
//! A [`DragSession`] holds every piece of drag-local state. Move ticks only
//! touch the session; the store is written once, on commit.

use crate::bounds::BoundingBox;
use crate::shapes::{Shape, ShapeId};
use crate::snap::{
    GuideLine, SnapSettings, snap_box_to_neighbors, snap_point_to_grid, snap_to_grid, snap_vertex,
    triangle_snap_candidates,
};
use crate::store::{ShapeStore, ShapeUpdate};
use kurbo::{Point, Size};

/// Radius of the draggable vertex handles drawn on a selected triangle.
pub const VERTEX_HANDLE_RADIUS: f64 = 6.0;

/// What part of the shape is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// The whole shape; the tracked point is its anchor `(x, y)`.
    Body,
    /// One triangle vertex; the tracked point is the vertex in canvas space.
    Vertex(usize),
}

/// A vertex handle of a selected triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexHandle {
    /// Position in canvas coordinates.
    pub position: Point,
    pub index: usize,
}

impl VertexHandle {
    /// Check if a canvas point hits this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let radius = VERTEX_HANDLE_RADIUS + tolerance;
        (point - self.position).hypot2() <= radius * radius
    }
}

/// Vertex handles for a shape (empty for non-triangles).
pub fn vertex_handles(shape: &Shape) -> Vec<VertexHandle> {
    match shape.as_triangle() {
        Some(t) => t
            .vertices()
            .into_iter()
            .enumerate()
            .map(|(index, position)| VertexHandle { position, index })
            .collect(),
        None => Vec::new(),
    }
}

/// State of an in-progress drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub shape_id: ShapeId,
    pub target: DragTarget,
    /// Tracked point when the drag started.
    pub start: Point,
    /// Tracked point after the latest move tick, snapping applied.
    pub current: Point,
    /// Guides produced by the latest move tick.
    pub guides: Vec<GuideLine>,
    pub snapped_x: bool,
    pub snapped_y: bool,
}

impl DragSession {
    fn new(shape_id: ShapeId, target: DragTarget, start: Point) -> Self {
        Self {
            shape_id,
            target,
            start,
            current: start,
            guides: Vec::new(),
            snapped_x: false,
            snapped_y: false,
        }
    }

    /// Start dragging a whole shape.
    pub fn begin(store: &ShapeStore, shape_id: ShapeId) -> Option<Self> {
        let shape = store.get(shape_id)?;
        log::debug!("Drag start {} {}", shape.kind_name(), shape_id);
        Some(Self::new(shape_id, DragTarget::Body, shape.position()))
    }

    /// Start dragging one vertex of a triangle.
    pub fn begin_vertex(store: &ShapeStore, shape_id: ShapeId, index: usize) -> Option<Self> {
        let vertex = *store.get(shape_id)?.as_triangle()?.vertices().get(index)?;
        log::debug!("Vertex drag start {} #{}", shape_id, index);
        Some(Self::new(shape_id, DragTarget::Vertex(index), vertex))
    }

    /// Process one move tick. `proposed` is where the pointer puts the
    /// tracked point before snapping; `extent` bounds the guide lines.
    pub fn update(&mut self, store: &ShapeStore, proposed: Point, snap: &SnapSettings, extent: Size) {
        self.guides.clear();
        self.snapped_x = false;
        self.snapped_y = false;
        self.current = proposed;

        let Some(shape) = store.get(self.shape_id) else {
            return;
        };

        match (self.target, shape) {
            (DragTarget::Body, Shape::Triangle(_)) => {}
            (DragTarget::Body, _) => {
                if !snap.guides_enabled {
                    return;
                }
                let mut moved = shape.clone();
                moved.set_position(proposed);
                let moving = BoundingBox::of(&moved);
                let others = store
                    .shapes()
                    .iter()
                    .filter(|s| s.id() != self.shape_id)
                    .map(BoundingBox::of);
                let result = snap_box_to_neighbors(moving, others, snap.guide_threshold, extent);
                self.current = Point::new(
                    proposed.x + (result.bbox.x - moving.x),
                    proposed.y + (result.bbox.y - moving.y),
                );
                self.snapped_x = result.snapped_x;
                self.snapped_y = result.snapped_y;
                self.guides = result.guides;
            }
            (DragTarget::Vertex(_), _) => {
                let mut point = proposed;
                if snap.grid_enabled {
                    point = snap_point_to_grid(point, snap.grid_spacing).point;
                }
                if snap.guides_enabled {
                    let candidates = triangle_snap_candidates(store.shapes(), self.shape_id);
                    let result = snap_vertex(point, &candidates, snap.vertex_threshold, extent);
                    point = result.result.point;
                    self.snapped_x = result.result.snapped_x;
                    self.snapped_y = result.result.snapped_y;
                    self.guides = result.guides;
                }
                self.current = point;
            }
        }
    }

    /// Apply the session's current state to a copy of the shape.
    fn apply(&self, shape: &mut Shape, point: Point) {
        match (self.target, shape) {
            (DragTarget::Body, shape) => shape.set_position(point),
            (DragTarget::Vertex(index), Shape::Triangle(t)) => {
                t.set_vertex(index, point);
            }
            (DragTarget::Vertex(_), _) => {}
        }
    }

    /// The dragged shape as it should be displayed right now.
    pub fn preview(&self, store: &ShapeStore) -> Option<Shape> {
        let mut shape = store.get(self.shape_id)?.clone();
        self.apply(&mut shape, self.current);
        Some(shape)
    }

    /// Where the tracked point lands on commit.
    ///
    /// A body drag whose last tick hit any guide keeps its position on both
    /// axes; otherwise it snaps to the grid. Vertex drags were already
    /// grid-snapped on each tick.
    pub fn final_point(&self, snap: &SnapSettings) -> Point {
        let guided = self.snapped_x || self.snapped_y;
        match self.target {
            DragTarget::Body if snap.grid_enabled && !guided => {
                snap_point_to_grid(self.current, snap.grid_spacing).point
            }
            _ => self.current,
        }
    }

    /// Finish the drag and write the result to the store.
    /// Returns false if the shape disappeared mid-drag.
    pub fn commit(self, store: &mut ShapeStore, snap: &SnapSettings) -> bool {
        let mut point = self.final_point(snap);
        let Some(shape) = store.get_mut(self.shape_id) else {
            log::warn!("Drag committed for missing shape {}", self.shape_id);
            return false;
        };
        // Rectangles land on whole units.
        if self.target == DragTarget::Body && matches!(shape, Shape::Rectangle(_)) {
            point = point.round();
        }
        self.apply(shape, point);
        log::debug!(
            "Drag end {} at ({:.1}, {:.1})",
            self.shape_id,
            point.x,
            point.y
        );
        true
    }
}

/// Final state reported by the resize/rotate transformer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformEnd {
    /// New anchor position.
    pub position: Point,
    pub scale_x: f64,
    pub scale_y: f64,
    /// New rotation in degrees.
    pub rotation: f64,
}

fn resized(value: f64, scale: f64, snap: &SnapSettings, min_size: f64) -> f64 {
    let mut value = value * scale;
    if snap.grid_enabled {
        value = snap_to_grid(value, snap.grid_spacing);
    }
    if value.is_finite() { value.max(min_size) } else { min_size }
}

/// Commit a transformer gesture.
///
/// Dimensions are scaled, grid-snapped when the grid is enabled, and floored
/// at `min_size`. Triangles are not resized through the transformer.
pub fn commit_transform(
    store: &mut ShapeStore,
    shape_id: ShapeId,
    end: &TransformEnd,
    snap: &SnapSettings,
    min_size: f64,
) -> bool {
    let update = match store.get(shape_id) {
        Some(Shape::Rectangle(r)) => ShapeUpdate::size(
            resized(r.width, end.scale_x, snap, min_size),
            resized(r.height, end.scale_y, snap, min_size),
        ),
        Some(Shape::Circle(c)) => ShapeUpdate::radii(
            resized(c.radius_x, end.scale_x, snap, min_size),
            resized(c.radius_y, end.scale_y, snap, min_size),
        ),
        Some(Shape::Triangle(_)) => return false,
        None => {
            log::warn!("Transform committed for missing shape {}", shape_id);
            return false;
        }
    };
    let update = update
        .with_position(end.position)
        .with_rotation(end.rotation);
    store.update(shape_id, &update)
}

/// Whether the transformer may adopt `new_box`; smaller boxes keep the old one.
pub fn accepts_resize(new_box: &BoundingBox, min_size: f64) -> bool {
    !(new_box.width < min_size || new_box.height < min_size)
}
