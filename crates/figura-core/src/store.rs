//! Ordered shape collection with single selection.
//!
//! Store order is layer order: index 0 is the topmost layer.

use crate::shapes::{CornerRadii, SerializableColor, Shape, ShapeId};
use kurbo::Point;

/// A partial shape update. Fields left as `None` are untouched; fields that
/// don't apply to the target's kind are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub radius_x: Option<f64>,
    pub radius_y: Option<f64>,
    pub rotation: Option<f64>,
    pub corner_radii: Option<CornerRadii>,
    pub points: Option<[Point; 3]>,
    pub triangle_radii: Option<[f64; 3]>,
    pub fill: Option<Option<SerializableColor>>,
    pub stroke: Option<Option<SerializableColor>>,
    pub stroke_width: Option<f64>,
    pub opacity: Option<f64>,
}

impl ShapeUpdate {
    /// Move the anchor position.
    pub fn position(position: Point) -> Self {
        Self {
            x: Some(position.x),
            y: Some(position.y),
            ..Self::default()
        }
    }

    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn radii(radius_x: f64, radius_y: f64) -> Self {
        Self {
            radius_x: Some(radius_x),
            radius_y: Some(radius_y),
            ..Self::default()
        }
    }

    pub fn fill(fill: Option<SerializableColor>) -> Self {
        Self {
            fill: Some(fill),
            ..Self::default()
        }
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.x = Some(position.x);
        self.y = Some(position.y);
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = Some(rotation);
        self
    }

    /// Shallow-merge the set fields into `shape`.
    pub fn apply(&self, shape: &mut Shape) {
        if let Some(x) = self.x {
            let y = shape.position().y;
            shape.set_position(Point::new(x, y));
        }
        if let Some(y) = self.y {
            let x = shape.position().x;
            shape.set_position(Point::new(x, y));
        }
        if let Some(rotation) = self.rotation {
            shape.set_rotation(rotation);
        }

        match shape {
            Shape::Rectangle(r) => {
                if let Some(width) = self.width {
                    r.width = width;
                }
                if let Some(height) = self.height {
                    r.height = height;
                }
                if let Some(radii) = self.corner_radii {
                    r.corner_radii = radii;
                }
            }
            Shape::Circle(c) => {
                if let Some(radius_x) = self.radius_x {
                    c.radius_x = radius_x;
                }
                if let Some(radius_y) = self.radius_y {
                    c.radius_y = radius_y;
                }
            }
            Shape::Triangle(t) => {
                if let Some(points) = self.points {
                    t.points = points;
                }
                if let Some(radii) = self.triangle_radii {
                    t.corner_radii = radii;
                }
            }
        }

        let style = shape.style_mut();
        if let Some(fill) = self.fill {
            style.fill = fill;
        }
        if let Some(stroke) = self.stroke {
            style.stroke = stroke;
        }
        if let Some(stroke_width) = self.stroke_width {
            style.stroke_width = stroke_width;
        }
        if let Some(opacity) = self.opacity {
            style.opacity = opacity;
        }
    }
}

/// The ordered shape list plus the current selection.
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    shapes: Vec<Shape>,
    selected: Option<ShapeId>,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape. An id already present in the store is regenerated.
    pub fn add(&mut self, mut shape: Shape) -> ShapeId {
        while self.index_of(shape.id()).is_some() {
            log::warn!("Shape id {} already in store, regenerating", shape.id());
            shape.regenerate_id();
        }
        let id = shape.id();
        log::debug!("Added {} {}", shape.kind_name(), id);
        self.shapes.push(shape);
        id
    }

    /// Shapes in layer order (topmost first).
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id() == id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Merge `update` into the shape with `id`.
    /// Returns false (and changes nothing) for an unknown id.
    pub fn update(&mut self, id: ShapeId, update: &ShapeUpdate) -> bool {
        match self.get_mut(id) {
            Some(shape) => {
                update.apply(shape);
                true
            }
            None => {
                log::warn!("Update for unknown shape {}", id);
                false
            }
        }
    }

    /// Remove a shape. Selection is left untouched; see
    /// [`crate::canvas::Canvas::remove_shape`] for the coordinated variant.
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.index_of(id)?;
        log::debug!("Removed shape {}", id);
        Some(self.shapes.remove(index))
    }

    /// Move the shape at `from` so it ends up at `to`.
    /// Returns false when the indices are equal or out of range.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.shapes.len();
        if from == to || from >= len || to >= len {
            return false;
        }
        let shape = self.shapes.remove(from);
        self.shapes.insert(to, shape);
        log::debug!("Reordered layer {} -> {}", from, to);
        true
    }

    /// Raise the layer at `index` by one (towards index 0).
    pub fn move_up(&mut self, index: usize) -> bool {
        match index.checked_sub(1) {
            Some(to) => self.reorder(index, to),
            None => false,
        }
    }

    /// Lower the layer at `index` by one.
    pub fn move_down(&mut self, index: usize) -> bool {
        self.reorder(index, index + 1)
    }

    /// Set or clear the selection. Selecting an unknown id clears it.
    pub fn select(&mut self, id: Option<ShapeId>) {
        self.selected = id.filter(|id| self.index_of(*id).is_some());
    }

    pub fn selected(&self) -> Option<ShapeId> {
        self.selected
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selected == Some(id)
    }

    /// Topmost shape whose outline contains `point`.
    pub fn shape_at_point(&self, point: Point) -> Option<ShapeId> {
        self.shapes.iter().find(|s| s.hit_test(point)).map(Shape::id)
    }

    /// Remove every shape and clear the selection.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.selected = None;
    }

    /// Replace the contents with `shapes`, keeping their order.
    pub fn replace_all(&mut self, shapes: Vec<Shape>) {
        self.clear();
        for shape in shapes {
            self.add(shape);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Rectangle, Triangle};
    use proptest::prelude::*;

    fn rect(x: f64) -> Shape {
        Rectangle::new(Point::new(x, 0.0), 10.0, 10.0).into()
    }

    fn store_of(n: usize) -> (ShapeStore, Vec<ShapeId>) {
        let mut store = ShapeStore::new();
        let ids = (0..n).map(|i| store.add(rect(i as f64 * 20.0))).collect();
        (store, ids)
    }

    fn order(store: &ShapeStore) -> Vec<ShapeId> {
        store.shapes().iter().map(Shape::id).collect()
    }

    #[test]
    fn test_add_appends() {
        let (store, ids) = store_of(3);
        assert_eq!(store.len(), 3);
        assert_eq!(order(&store), ids);
        assert_eq!(store.index_of(ids[2]), Some(2));
    }

    #[test]
    fn test_add_regenerates_duplicate_id() {
        let mut store = ShapeStore::new();
        let shape = rect(0.0);
        let first = store.add(shape.clone());
        let second = store.add(shape);
        assert_ne!(first, second);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_update_merges_fields() {
        let mut store = ShapeStore::new();
        let id = store.add(Circle::circle(Point::new(0.0, 0.0), 40.0).into());
        let update = ShapeUpdate {
            radius_x: Some(12.0),
            opacity: Some(0.5),
            width: Some(99.0),
            ..ShapeUpdate::default()
        };
        assert!(store.update(id, &update));
        match store.get(id) {
            Some(Shape::Circle(c)) => {
                assert!((c.radius_x - 12.0).abs() < f64::EPSILON);
                assert!((c.radius_y - 40.0).abs() < f64::EPSILON);
                assert!((c.style.opacity - 0.5).abs() < f64::EPSILON);
            }
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let (mut store, ids) = store_of(2);
        let before = store.shapes().to_vec();
        assert!(!store.update(ShapeId::new_v4(), &ShapeUpdate::position(Point::ZERO)));
        assert_eq!(store.shapes(), &before[..]);
        assert_eq!(order(&store), ids);
    }

    #[test]
    fn test_update_triangle_points() {
        let mut store = ShapeStore::new();
        let id = store.add(
            Triangle::from_vertices([Point::ZERO, Point::new(10.0, 0.0), Point::new(0.0, 10.0)])
                .into(),
        );
        let update = ShapeUpdate {
            triangle_radii: Some([1.0, 2.0, 3.0]),
            ..ShapeUpdate::default()
        };
        assert!(store.update(id, &update));
        let tri = store.get(id).and_then(Shape::as_triangle).unwrap();
        assert_eq!(tri.corner_radii, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_remove_keeps_selection() {
        let (mut store, ids) = store_of(2);
        store.select(Some(ids[0]));
        assert!(store.remove(ids[0]).is_some());
        assert_eq!(store.selected(), Some(ids[0]));
        assert!(store.selected_shape().is_none());
        assert!(store.remove(ids[0]).is_none());
    }

    #[test]
    fn test_reorder() {
        let (mut store, ids) = store_of(4);
        assert!(store.reorder(3, 0));
        assert_eq!(order(&store), vec![ids[3], ids[0], ids[1], ids[2]]);
    }

    #[test]
    fn test_move_up_and_down() {
        let (mut store, ids) = store_of(3);
        assert!(!store.move_up(0));
        assert!(store.move_up(2));
        assert_eq!(order(&store), vec![ids[0], ids[2], ids[1]]);
        assert!(!store.move_down(2));
        assert!(store.move_down(0));
        assert_eq!(order(&store), vec![ids[2], ids[0], ids[1]]);
    }

    #[test]
    fn test_select_unknown_clears() {
        let (mut store, ids) = store_of(1);
        store.select(Some(ids[0]));
        assert!(store.is_selected(ids[0]));
        store.select(Some(ShapeId::new_v4()));
        assert_eq!(store.selected(), None);
    }

    #[test]
    fn test_shape_at_point_prefers_top() {
        let mut store = ShapeStore::new();
        let top = store.add(Rectangle::new(Point::new(50.0, 50.0), 40.0, 40.0).into());
        let _bottom = store.add(Rectangle::new(Point::new(60.0, 60.0), 40.0, 40.0).into());
        assert_eq!(store.shape_at_point(Point::new(55.0, 55.0)), Some(top));
        assert_eq!(store.shape_at_point(Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn test_clear() {
        let (mut store, ids) = store_of(2);
        store.select(Some(ids[1]));
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.selected(), None);
    }

    proptest! {
        #[test]
        fn reorder_noop_leaves_order(len in 0usize..6, from in 0usize..10, to in 0usize..10) {
            let (mut store, ids) = store_of(len);
            prop_assume!(from == to || from >= len || to >= len);
            prop_assert!(!store.reorder(from, to));
            prop_assert_eq!(order(&store), ids);
        }

        #[test]
        fn reorder_is_a_permutation(len in 2usize..6, from in 0usize..6, to in 0usize..6) {
            prop_assume!(from < len && to < len && from != to);
            let (mut store, ids) = store_of(len);
            prop_assert!(store.reorder(from, to));
            prop_assert_eq!(store.shapes()[to].id(), ids[from]);
            let mut sorted = order(&store);
            sorted.sort();
            let mut expected = ids.clone();
            expected.sort();
            prop_assert_eq!(sorted, expected);
        }
    }
}
