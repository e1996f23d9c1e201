//! Figura Core Library
//!
//! Shape model, geometry kernel, snapping engine and editor state for the
//! Figura shape editor. Rendering lives in `figura-render`.

pub mod bounds;
pub mod camera;
pub mod canvas;
pub mod geometry;
pub mod gesture;
pub mod input;
pub mod project;
pub mod settings;
pub mod shapes;
pub mod snap;
pub mod store;
pub mod tools;

pub use bounds::BoundingBox;
pub use camera::Camera;
pub use canvas::{Background, Canvas, ClickOutcome};
pub use gesture::{DragSession, DragTarget, TransformEnd, accepts_resize, commit_transform};
pub use input::{ClickTarget, InputState, Key, PointerEvent};
pub use project::{ProjectError, export_project, import_project, load_project, save_project};
pub use settings::EditorSettings;
pub use shapes::{Circle, CornerRadii, Rectangle, SerializableColor, Shape, ShapeId, ShapeStyle, Triangle};
pub use snap::{
    BoxSnap, GuideLine, GuideOrientation, SnapResult, SnapSettings, VertexSnap, snap_box_to_neighbors,
    snap_to_grid, snap_vertex, triangle_snap_candidates,
};
pub use store::{ShapeStore, ShapeUpdate};
pub use tools::{ToolKind, create_shape};
