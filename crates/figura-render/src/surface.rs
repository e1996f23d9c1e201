//! Drawing surface seam shared by the scene and export renderers.

use crate::renderer::{RenderResult, RendererError};
use figura_core::shapes::Shape;
use kurbo::{Affine, BezPath, PathEl, Rect, Shape as _};
use peniko::Color;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Stroke, StrokeDash, Transform};

/// Minimal set of drawing operations a backend provides.
pub trait Surface {
    /// Fill a path (non-zero winding) placed by `transform`.
    fn fill_path(&mut self, path: &BezPath, transform: Affine, color: Color);

    /// Stroke a path placed by `transform`. Width and dashes are in
    /// surface units.
    fn stroke_path(&mut self, path: &BezPath, transform: Affine, color: Color, width: f64, dash: Option<&[f64]>);
}

/// Draw one shape: kernel path placed by the shape and the view, fill then
/// stroke, with the shape opacity applied to both.
pub fn draw_shape<S: Surface + ?Sized>(surface: &mut S, shape: &Shape, view: Affine) {
    let path = shape.local_path();
    let transform = view * shape.placement();
    let style = shape.style();
    if let Some(fill) = style.fill_with_opacity() {
        surface.fill_path(&path, transform, fill);
    }
    if let Some(stroke) = style.stroke_with_opacity() {
        surface.stroke_path(&path, transform, stroke, style.stroke_width, None);
    }
}

/// Draw the document: opaque background, then shapes in reverse store
/// order so index 0 ends up on top.
pub fn draw_document<S: Surface + ?Sized>(
    surface: &mut S,
    shapes: &[Shape],
    background: Option<Color>,
    bounds: Rect,
    view: Affine,
) {
    if let Some(color) = background {
        surface.fill_path(&bounds.to_path(0.1), view, color);
    }
    for shape in shapes.iter().rev() {
        draw_shape(surface, shape, view);
    }
}

/// CPU surface backed by a tiny-skia pixmap.
pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl PixmapSurface {
    /// Allocate a transparent surface.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(RendererError::InvalidSize { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    /// Straight (non-premultiplied) RGBA8 at a pixel.
    pub fn pixel_rgba(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
    }
}

fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

fn to_skia_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

fn to_paint(color: Color) -> Paint<'static> {
    let rgba = color.to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(rgba.r, rgba.g, rgba.b, rgba.a);
    paint.anti_alias = true;
    paint
}

impl Surface for PixmapSurface {
    fn fill_path(&mut self, path: &BezPath, transform: Affine, color: Color) {
        let Some(skia_path) = to_skia_path(path) else {
            log::debug!("Skipping empty path");
            return;
        };
        self.pixmap.fill_path(
            &skia_path,
            &to_paint(color),
            FillRule::Winding,
            to_skia_transform(transform),
            None,
        );
    }

    fn stroke_path(&mut self, path: &BezPath, transform: Affine, color: Color, width: f64, dash: Option<&[f64]>) {
        // Stroke in surface space so width and dashes ignore the transform's scale.
        let placed = transform * path.clone();
        let Some(skia_path) = to_skia_path(&placed) else {
            log::debug!("Skipping empty path");
            return;
        };
        let stroke = Stroke {
            width: width as f32,
            dash: dash.and_then(|d| StrokeDash::new(d.iter().map(|v| *v as f32).collect(), 0.0)),
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&skia_path, &to_paint(color), &stroke, Transform::identity(), None);
    }
}
