//! Vello-based renderer implementation.

use crate::renderer::{RenderContext, RenderResult, Renderer};
use crate::scene::paint_scene;
use crate::surface::Surface;
use kurbo::{Affine, BezPath, Stroke};
use peniko::{Color, Fill};
use vello::Scene;

/// Vello-based renderer for GPU-accelerated 2D graphics.
///
/// Builds a [`Scene`]; submitting it to a GPU surface is left to the host.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    pub fn new() -> Self {
        Self { scene: Scene::new() }
    }

    /// Get the built scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the built scene, leaving an empty one.
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }
}

impl Surface for VelloRenderer {
    fn fill_path(&mut self, path: &BezPath, transform: Affine, color: Color) {
        self.scene.fill(Fill::NonZero, transform, color, None, path);
    }

    fn stroke_path(&mut self, path: &BezPath, transform: Affine, color: Color, width: f64, dash: Option<&[f64]>) {
        let mut stroke = Stroke::new(width);
        if let Some(pattern) = dash {
            stroke = stroke.with_dashes(0.0, pattern.iter().copied());
        }
        // Stroke in surface space so width and dashes ignore the transform's scale.
        let placed = transform * path.clone();
        self.scene.stroke(&stroke, Affine::IDENTITY, color, None, &placed);
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        self.scene.reset();
        paint_scene(self, ctx);
        Ok(())
    }
}
