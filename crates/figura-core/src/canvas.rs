//! Canvas document and editor state.

use crate::camera::{Camera, FIT_PADDING};
use crate::gesture::{DragSession, TransformEnd, commit_transform};
use crate::input::{ClickTarget, Key, is_click};
use crate::settings::EditorSettings;
use crate::shapes::{SerializableColor, Shape, ShapeId};
use crate::snap::{GuideLine, snap_point_to_grid};
use crate::store::ShapeStore;
use crate::tools::{ToolKind, create_shape};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Default size of a new canvas.
pub const DEFAULT_CANVAS_SIZE: (u32, u32) = (1920, 1080);

/// Canvas background fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    White,
    Black,
    Transparent,
}

impl Background {
    /// Opaque fill color, or None for a transparent canvas.
    pub fn color(self) -> Option<SerializableColor> {
        match self {
            Background::White => Some(SerializableColor::white()),
            Background::Black => Some(SerializableColor::black()),
            Background::Transparent => None,
        }
    }
}

/// Result of a click on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The press and release were too far apart, or nothing applied.
    Ignored,
    Deselected,
    Selected(ShapeId),
    Created(ShapeId),
}

/// Root document plus the editor state around it.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub background: Background,
    /// False until a file has been created; export refuses to run before then.
    pub created: bool,
    pub settings: EditorSettings,
    pub store: ShapeStore,
    /// Tool used when clicking on empty canvas.
    pub active_tool: Option<ToolKind>,
    /// View transform of the display surface.
    pub camera: Camera,
    drag: Option<DragSession>,
    guides: Vec<GuideLine>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// An uncreated canvas with the default size and a white background.
    pub fn new() -> Self {
        let (width, height) = DEFAULT_CANVAS_SIZE;
        Self {
            width,
            height,
            background: Background::default(),
            created: false,
            settings: EditorSettings::default(),
            store: ShapeStore::new(),
            active_tool: None,
            camera: Camera::new(),
            drag: None,
            guides: Vec::new(),
        }
    }

    /// Create with explicit editor settings.
    pub fn with_settings(settings: EditorSettings) -> Self {
        Self {
            settings,
            ..Self::new()
        }
    }

    /// Start a new file: replaces size and background and clears shapes,
    /// selection and guides. Zero dimensions are raised to 1.
    pub fn new_file(&mut self, width: u32, height: u32, background: Background) {
        if width == 0 || height == 0 {
            log::warn!("Canvas size {}x{} raised to at least 1x1", width, height);
        }
        self.width = width.max(1);
        self.height = height.max(1);
        self.background = background;
        self.created = true;
        self.store.clear();
        self.drag = None;
        self.guides.clear();
        log::info!(
            "Created {}x{} canvas with {:?} background",
            self.width,
            self.height,
            background
        );
    }

    /// Return to the uncreated default state, keeping settings.
    pub fn reset(&mut self) {
        let settings = self.settings.clone();
        *self = Self::with_settings(settings);
    }

    /// Canvas dimensions in canvas units.
    pub fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    /// Guide lines of the current drag.
    pub fn guides(&self) -> &[GuideLine] {
        &self.guides
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        self.store.add(shape)
    }

    /// Remove a shape, clearing the selection if it pointed at it.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let removed = self.store.remove(id)?;
        if self.store.selected() == Some(id) {
            self.store.select(None);
        }
        if self.drag.as_ref().is_some_and(|d| d.shape_id == id) {
            self.cancel_drag();
        }
        Some(removed)
    }

    /// Swap in a loaded set of shapes, keeping their order. Any drag is
    /// abandoned and the selection cleared.
    pub fn replace_shapes(&mut self, shapes: Vec<Shape>) {
        self.cancel_drag();
        self.store.replace_all(shapes);
        log::info!("Loaded {} shapes", self.store.len());
    }

    /// Delete the selected shape.
    pub fn delete_selected(&mut self) -> Option<Shape> {
        let id = self.store.selected()?;
        self.remove_shape(id)
    }

    pub fn set_tool(&mut self, tool: Option<ToolKind>) {
        self.active_tool = tool;
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.settings.show_grid = show;
    }

    /// Toggle guide snapping; disabling it drops any visible guides.
    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.settings.snap_enabled = enabled;
        if !enabled {
            self.guides.clear();
        }
    }

    /// Fit the camera so the whole canvas is visible in `container`.
    pub fn fit_to_container(&mut self, container: Size) {
        let size = self.size();
        self.camera.fit_canvas(size, container, FIT_PADDING);
    }

    /// Resolve what lies under a screen point.
    pub fn target_at(&self, screen_point: Point) -> ClickTarget {
        let point = self.camera.screen_to_canvas(screen_point);
        match self.store.shape_at_point(point) {
            Some(id) => ClickTarget::Shape(id),
            None => ClickTarget::Empty,
        }
    }

    /// Handle a press/release pair in screen coordinates.
    ///
    /// An empty-area click deselects when something is selected, otherwise
    /// creates a shape with the active tool at the release point. A shape
    /// click selects it.
    pub fn click(&mut self, screen_down: Point, screen_up: Point, target: ClickTarget) -> ClickOutcome {
        if !is_click(screen_down, screen_up) {
            return ClickOutcome::Ignored;
        }

        match target {
            ClickTarget::Transformer => ClickOutcome::Ignored,
            ClickTarget::Shape(id) => {
                self.store.select(Some(id));
                match self.store.selected() {
                    Some(id) => ClickOutcome::Selected(id),
                    None => ClickOutcome::Ignored,
                }
            }
            ClickTarget::Empty if self.store.selected().is_some() => {
                self.store.select(None);
                ClickOutcome::Deselected
            }
            ClickTarget::Empty => {
                let Some(tool) = self.active_tool else {
                    return ClickOutcome::Ignored;
                };
                let mut point = self.camera.screen_to_canvas(screen_up);
                if self.settings.show_grid {
                    point = snap_point_to_grid(point, self.settings.grid_spacing).point;
                }
                let id = self.store.add(create_shape(tool, point));
                log::info!("Created {:?} at ({:.1}, {:.1})", tool, point.x, point.y);
                ClickOutcome::Created(id)
            }
        }
    }

    /// Handle a key press. Returns true if the canvas changed.
    pub fn key(&mut self, key: &Key) -> bool {
        match key {
            k if k.is_delete() => self.delete_selected().is_some(),
            Key::Escape if self.drag.is_some() => {
                self.cancel_drag();
                true
            }
            _ => false,
        }
    }

    /// Start dragging a whole shape.
    pub fn begin_drag(&mut self, id: ShapeId) -> bool {
        self.drag = DragSession::begin(&self.store, id);
        self.guides.clear();
        self.drag.is_some()
    }

    /// Start dragging a triangle vertex.
    pub fn begin_vertex_drag(&mut self, id: ShapeId, index: usize) -> bool {
        self.drag = DragSession::begin_vertex(&self.store, id, index);
        self.guides.clear();
        self.drag.is_some()
    }

    /// Process a move tick with the proposed canvas position of the dragged
    /// anchor or vertex. Returns the snapped position.
    pub fn drag_move(&mut self, proposed: Point) -> Option<Point> {
        let snap = self.settings.snap_settings();
        let extent = self.size();
        let session = self.drag.as_mut()?;
        session.update(&self.store, proposed, &snap, extent);
        self.guides.clone_from(&session.guides);
        Some(session.current)
    }

    /// Commit the active drag. Guides are cleared.
    pub fn end_drag(&mut self) -> bool {
        self.guides.clear();
        let Some(session) = self.drag.take() else {
            return false;
        };
        let snap = self.settings.snap_settings();
        session.commit(&mut self.store, &snap)
    }

    /// Abandon the active drag without touching the store.
    pub fn cancel_drag(&mut self) {
        self.drag = None;
        self.guides.clear();
    }

    /// Commit a resize/rotate gesture.
    pub fn end_transform(&mut self, id: ShapeId, end: &TransformEnd) -> bool {
        let snap = self.settings.snap_settings();
        commit_transform(&mut self.store, id, end, &snap, self.settings.min_resize)
    }

    /// Shapes as they should be displayed, with an in-progress drag applied.
    pub fn display_shapes(&self) -> Vec<Shape> {
        let preview = self.drag.as_ref().and_then(|d| d.preview(&self.store));
        self.store
            .shapes()
            .iter()
            .map(|shape| match &preview {
                Some(p) if p.id() == shape.id() => p.clone(),
                _ => shape.clone(),
            })
            .collect()
    }
}
