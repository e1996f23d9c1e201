//! Renderer trait abstraction.

use figura_core::canvas::Canvas;
use figura_core::shapes::Shape;
use figura_core::snap::GuideLine;
use kurbo::{Affine, Size};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid surface size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Dash pattern of alignment guides, in screen pixels.
pub const GUIDE_DASH: [f64; 2] = [4.0, 6.0];

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Shapes in store order, with any in-progress drag applied.
    pub shapes: Vec<Shape>,
    /// Surface size in pixels.
    pub viewport_size: Size,
    /// Canvas to surface transform.
    pub transform: Affine,
    /// Whether to draw grid lines.
    pub show_grid: bool,
    /// Whether to draw alignment guides.
    pub show_guides: bool,
    /// Whether to outline the selected shape.
    pub show_selection: bool,
    /// Grid line color.
    pub grid_color: Color,
    /// Alignment guide color.
    pub guide_color: Color,
    /// Selection outline color.
    pub selection_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a context for the interactive view, using the canvas camera.
    pub fn new(canvas: &'a Canvas, viewport_size: Size) -> Self {
        Self {
            canvas,
            shapes: canvas.display_shapes(),
            viewport_size,
            transform: canvas.camera.transform(),
            show_grid: canvas.settings.show_grid,
            show_guides: true,
            show_selection: true,
            grid_color: Color::from_rgba8(229, 231, 235, 255),
            guide_color: Color::from_rgba8(236, 72, 153, 255), // Pink
            selection_color: Color::from_rgba8(59, 130, 246, 255), // Blue
        }
    }

    /// Context matching the exported image: canvas-sized, untransformed,
    /// with grid, guides and selection hidden.
    pub fn for_export(canvas: &'a Canvas) -> Self {
        Self::new(canvas, canvas.size())
            .with_transform(Affine::IDENTITY)
            .with_grid(false)
            .with_guides(false)
            .with_selection(false)
    }

    /// Set the canvas to surface transform.
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    /// Show or hide the grid.
    pub fn with_grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    /// Show or hide alignment guides.
    pub fn with_guides(mut self, show: bool) -> Self {
        self.show_guides = show;
        self
    }

    /// Show or hide the selection outline.
    pub fn with_selection(mut self, show: bool) -> Self {
        self.show_selection = show;
        self
    }

    /// Set the grid line color.
    pub fn with_grid_color(mut self, color: Color) -> Self {
        self.grid_color = color;
        self
    }

    /// Set the guide color.
    pub fn with_guide_color(mut self, color: Color) -> Self {
        self.guide_color = color;
        self
    }

    /// Set the selection outline color.
    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    /// Guides to draw this frame.
    pub fn guides(&self) -> &[GuideLine] {
        if self.show_guides { self.canvas.guides() } else { &[] }
    }

    /// Background color, or None for a transparent canvas.
    pub fn background_color(&self) -> Option<Color> {
        self.canvas.background.color().map(Color::from)
    }
}

/// Trait for rendering backends.
///
/// Implementations can draw into a CPU pixmap, a Vello scene, or another
/// engine.
pub trait Renderer {
    /// Build the scene/command buffer for a frame.
    ///
    /// Called once per frame; prepares all drawing commands.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;
}
