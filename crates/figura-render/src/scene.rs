//! Interactive scene: document plus grid, guide and selection overlays.

use crate::renderer::{GUIDE_DASH, RenderContext, RenderResult, Renderer};
use crate::surface::{PixmapSurface, Surface, draw_document};
use figura_core::bounds::BoundingBox;
use kurbo::{BezPath, Line, Rect, Shape as _};

/// Width of grid and guide lines in surface pixels.
const OVERLAY_LINE_WIDTH: f64 = 1.0;
/// Width of the selection outline in surface pixels.
const SELECTION_LINE_WIDTH: f64 = 2.0;
/// Grid spacings below this draw no grid.
const MIN_GRID_SPACING: f64 = 1.0;

/// Draw a full frame onto any surface.
pub fn paint_scene<S: Surface + ?Sized>(surface: &mut S, ctx: &RenderContext) {
    let canvas_rect = Rect::from_origin_size((0.0, 0.0), ctx.canvas.size());
    draw_document(surface, &ctx.shapes, ctx.background_color(), canvas_rect, ctx.transform);

    if ctx.show_grid {
        paint_grid(surface, ctx, canvas_rect);
    }

    for guide in ctx.guides() {
        let line = Line::new(guide.points[0], guide.points[1]);
        surface.stroke_path(
            &line.to_path(0.1),
            ctx.transform,
            ctx.guide_color,
            OVERLAY_LINE_WIDTH,
            Some(GUIDE_DASH.as_slice()),
        );
    }

    if ctx.show_selection {
        let selected = ctx.canvas.store.selected();
        if let Some(shape) = ctx.shapes.iter().find(|s| Some(s.id()) == selected) {
            let outline = BoundingBox::of(shape).to_rect().to_path(0.1);
            surface.stroke_path(&outline, ctx.transform, ctx.selection_color, SELECTION_LINE_WIDTH, None);
        }
    }
}

fn paint_grid<S: Surface + ?Sized>(surface: &mut S, ctx: &RenderContext, canvas_rect: Rect) {
    let spacing = ctx.canvas.settings.grid_spacing;
    if !(spacing.is_finite() && spacing >= MIN_GRID_SPACING) {
        log::debug!("Grid spacing {} too small to draw", spacing);
        return;
    }
    let mut path = BezPath::new();
    let mut x = 0.0;
    while x <= canvas_rect.x1 {
        path.move_to((x, canvas_rect.y0));
        path.line_to((x, canvas_rect.y1));
        x += spacing;
    }
    let mut y = 0.0;
    while y <= canvas_rect.y1 {
        path.move_to((canvas_rect.x0, y));
        path.line_to((canvas_rect.x1, y));
        y += spacing;
    }
    surface.stroke_path(&path, ctx.transform, ctx.grid_color, OVERLAY_LINE_WIDTH, None);
}

/// CPU scene renderer for headless previews and tests.
pub struct PixmapRenderer {
    surface: Option<PixmapSurface>,
}

impl Default for PixmapRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PixmapRenderer {
    pub fn new() -> Self {
        Self { surface: None }
    }

    /// The last built frame.
    pub fn surface(&self) -> Option<&PixmapSurface> {
        self.surface.as_ref()
    }
}

impl Renderer for PixmapRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        let width = ctx.viewport_size.width.ceil().max(0.0) as u32;
        let height = ctx.viewport_size.height.ceil().max(0.0) as u32;
        let reuse = self
            .surface
            .as_ref()
            .is_some_and(|s| s.width() == width && s.height() == height);
        if reuse {
            if let Some(surface) = self.surface.as_mut() {
                surface.clear();
            }
        } else {
            self.surface = Some(PixmapSurface::new(width, height)?);
        }
        if let Some(surface) = self.surface.as_mut() {
            paint_scene(surface, ctx);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figura_core::canvas::{Background, Canvas};
    use figura_core::shapes::{Rectangle, SerializableColor, ShapeStyle};
    use kurbo::Point;

    fn red_square_canvas() -> (Canvas, figura_core::shapes::ShapeId) {
        let mut canvas = Canvas::new();
        canvas.new_file(100, 100, Background::White);
        let id = canvas.add_shape(
            Rectangle::new(Point::new(50.0, 50.0), 40.0, 40.0)
                .with_style(ShapeStyle::filled(SerializableColor::rgb(255, 0, 0)))
                .into(),
        );
        (canvas, id)
    }

    #[test]
    fn test_scene_draws_background_and_shape() {
        let (canvas, _) = red_square_canvas();
        let mut renderer = PixmapRenderer::new();
        renderer
            .build_scene(&RenderContext::for_export(&canvas))
            .unwrap();
        let surface = renderer.surface().unwrap();
        assert_eq!(surface.pixel_rgba(50, 50), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel_rgba(5, 5), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_grid_overlay() {
        let (canvas, _) = red_square_canvas();
        let mut renderer = PixmapRenderer::new();
        let ctx = RenderContext::for_export(&canvas).with_grid(true);
        renderer.build_scene(&ctx).unwrap();
        // Grid line at x = 50 crosses the background at y = 5.
        let pixel = renderer.surface().unwrap().pixel_rgba(50, 5).unwrap();
        assert_ne!(pixel, [255, 255, 255, 255]);
    }

    #[test]
    fn test_tiny_grid_spacing_draws_nothing() {
        let (mut canvas, _) = red_square_canvas();
        canvas.settings.grid_spacing = 1e-6;
        let mut renderer = PixmapRenderer::new();
        let ctx = RenderContext::for_export(&canvas).with_grid(true);
        renderer.build_scene(&ctx).unwrap();
        assert_eq!(renderer.surface().unwrap().pixel_rgba(50, 5), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_selection_outline() {
        let (mut canvas, id) = red_square_canvas();
        canvas.store.select(Some(id));
        let mut renderer = PixmapRenderer::new();
        let ctx = RenderContext::for_export(&canvas).with_selection(true);
        renderer.build_scene(&ctx).unwrap();
        // Outline straddles the left edge at x = 30.
        let pixel = renderer.surface().unwrap().pixel_rgba(29, 50).unwrap();
        assert_ne!(pixel, [255, 255, 255, 255]);
    }

    #[test]
    fn test_surface_reused_between_frames() {
        let (canvas, _) = red_square_canvas();
        let mut renderer = PixmapRenderer::new();
        let ctx = RenderContext::for_export(&canvas);
        renderer.build_scene(&ctx).unwrap();
        renderer.build_scene(&ctx).unwrap();
        assert_eq!(renderer.surface().map(|s| s.width()), Some(100));
    }
}
