//! Raster export of the canvas document.

use crate::renderer::RendererError;
use crate::surface::{PixmapSurface, draw_document};
use figura_core::canvas::Canvas;
use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use kurbo::{Affine, Rect};
use peniko::Color;
use std::io;
use std::path::Path;
use thiserror::Error;

/// JPEG quality used when none is given.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Canvas is not ready for export")]
    NotReady,
    #[error("Invalid export size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("Encoding error: {0}")]
    Encode(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<RendererError> for ExportError {
    fn from(err: RendererError) -> Self {
        let RendererError::InvalidSize { width, height } = err;
        ExportError::InvalidSize { width, height }
    }
}

impl From<png::EncodingError> for ExportError {
    fn from(err: png::EncodingError) -> Self {
        ExportError::Encode(err.to_string())
    }
}

impl From<image::ImageError> for ExportError {
    fn from(err: image::ImageError) -> Self {
        ExportError::Encode(err.to_string())
    }
}

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg { quality: u8 },
}

impl ExportFormat {
    /// Pick a format from a file extension (`png`, `jpg`, `jpeg`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg {
                quality: DEFAULT_JPEG_QUALITY,
            }),
            _ => None,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg { .. } => "image/jpeg",
        }
    }
}

/// Flatten the background and shapes at canvas size, one unit per pixel.
/// Overlays are never drawn.
pub fn render_document(canvas: &Canvas) -> Result<PixmapSurface, ExportError> {
    if !canvas.created {
        log::warn!("Export requested before a canvas was created");
        return Err(ExportError::NotReady);
    }
    let mut surface = PixmapSurface::new(canvas.width, canvas.height)?;
    let bounds = Rect::from_origin_size((0.0, 0.0), canvas.size());
    let background = canvas.background.color().map(Color::from);
    draw_document(
        &mut surface,
        canvas.store.shapes(),
        background,
        bounds,
        Affine::IDENTITY,
    );
    Ok(surface)
}

/// Straight RGBA8 bytes of a rendered surface, row-major.
pub fn surface_rgba(surface: &PixmapSurface) -> Vec<u8> {
    surface
        .pixmap()
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect()
}

fn encode_png(surface: &PixmapSurface) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, surface.width(), surface.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&surface_rgba(surface))?;
        writer.finish()?;
    }
    Ok(buf)
}

fn encode_jpeg(surface: &PixmapSurface, quality: u8) -> Result<Vec<u8>, ExportError> {
    let data = surface.pixmap().data();
    let width = surface.width() as usize;
    // Premultiplied color channels are the image composited over black.
    let rgb = RgbImage::from_fn(surface.width(), surface.height(), |x, y| {
        let idx = (y as usize * width + x as usize) * 4;
        image::Rgb([data[idx], data[idx + 1], data[idx + 2]])
    });
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100)).encode_image(&rgb)?;
    Ok(buf)
}

/// Render and encode the canvas.
pub fn export_image(canvas: &Canvas, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    let surface = render_document(canvas)?;
    let bytes = match format {
        ExportFormat::Png => encode_png(&surface),
        ExportFormat::Jpeg { quality } => encode_jpeg(&surface, quality),
    }
    .inspect_err(|e| log::error!("Failed to encode {}: {}", format.mime_type(), e))?;
    log::info!(
        "Exported {}x{} canvas as {} ({} bytes)",
        canvas.width,
        canvas.height,
        format.mime_type(),
        bytes.len()
    );
    Ok(bytes)
}

/// Encode the canvas as PNG.
pub fn export_png(canvas: &Canvas) -> Result<Vec<u8>, ExportError> {
    export_image(canvas, ExportFormat::Png)
}

/// Encode the canvas as JPEG. Transparent areas come out black.
pub fn export_jpeg(canvas: &Canvas, quality: u8) -> Result<Vec<u8>, ExportError> {
    export_image(canvas, ExportFormat::Jpeg { quality })
}

/// Render, encode and write the canvas to `path`. Nothing is written when
/// rendering or encoding fails.
pub fn export_to_file(canvas: &Canvas, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
    let bytes = export_image(canvas, format)?;
    std::fs::write(path, bytes)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{RenderContext, Renderer};
    use crate::scene::PixmapRenderer;
    use figura_core::canvas::Background;
    use figura_core::shapes::{Circle, Rectangle, SerializableColor, ShapeStyle, Triangle};
    use kurbo::Point;

    const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn fill(r: u8, g: u8, b: u8) -> ShapeStyle {
        ShapeStyle::filled(SerializableColor::rgb(r, g, b))
    }

    fn overlapping_canvas(background: Background) -> Canvas {
        let mut canvas = Canvas::new();
        canvas.new_file(120, 80, background);
        // Index 0 (red) is on top of index 1 (blue).
        canvas.add_shape(Rectangle::new(Point::new(40.0, 40.0), 40.0, 40.0).with_style(fill(255, 0, 0)).into());
        canvas.add_shape(Rectangle::new(Point::new(60.0, 40.0), 40.0, 40.0).with_style(fill(0, 0, 255)).into());
        canvas
    }

    #[test]
    fn test_not_ready() {
        init_logger();
        let canvas = Canvas::new();
        assert!(matches!(export_png(&canvas), Err(ExportError::NotReady)));
    }

    #[test]
    fn test_not_ready_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let result = export_to_file(&Canvas::new(), &path, ExportFormat::Png);
        assert!(matches!(result, Err(ExportError::NotReady)));
        assert!(!path.exists());
    }

    #[test]
    fn test_first_listed_shape_on_top() {
        let canvas = overlapping_canvas(Background::White);
        let surface = render_document(&canvas).unwrap();
        assert_eq!(surface.pixel_rgba(50, 40), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel_rgba(75, 40), Some([0, 0, 255, 255]));
        assert_eq!(surface.pixel_rgba(5, 5), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_transparent_background() {
        let canvas = overlapping_canvas(Background::Transparent);
        let surface = render_document(&canvas).unwrap();
        assert_eq!(surface.pixel_rgba(5, 5), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_png_signature_and_size() {
        init_logger();
        let canvas = overlapping_canvas(Background::White);
        let bytes = export_png(&canvas).unwrap();
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (120, 80));
    }

    #[test]
    fn test_jpeg_drops_alpha_over_black() {
        let canvas = overlapping_canvas(Background::Transparent);
        let bytes = export_jpeg(&canvas, 90).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        let corner = decoded.get_pixel(5, 5);
        assert!(corner.0.iter().all(|c| *c < 16));
    }

    #[test]
    fn test_jpeg_keeps_pixel_layout() {
        let canvas = overlapping_canvas(Background::White);
        let bytes = export_jpeg(&canvas, 95).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (120, 80));
        let [r, g, b] = decoded.get_pixel(40, 40).0;
        assert!(r > 200 && g < 60 && b < 60);
        let [r, _, b] = decoded.get_pixel(70, 40).0;
        assert!(b > 150 && r < 100);
        assert!(decoded.get_pixel(110, 75).0.iter().all(|c| *c > 230));
    }

    #[test]
    fn test_export_to_file() {
        init_logger();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canvas.jpg");
        let format = ExportFormat::from_path(&path).unwrap();
        export_to_file(&overlapping_canvas(Background::Black), &path, format).unwrap();
        let written = std::fs::read(&path).unwrap();
        assert_eq!(&written[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("a.PNG")), Some(ExportFormat::Png));
        assert_eq!(
            ExportFormat::from_path(Path::new("a.jpeg")),
            Some(ExportFormat::Jpeg { quality: DEFAULT_JPEG_QUALITY })
        );
        assert_eq!(ExportFormat::from_path(Path::new("a.gif")), None);
    }

    #[test]
    fn test_scene_matches_export_without_overlays() {
        let mut canvas = overlapping_canvas(Background::White);
        canvas.add_shape(Circle::new(Point::new(90.0, 20.0), 15.0, 10.0).with_style(fill(225, 29, 72)).into());
        canvas.add_shape(
            Triangle::from_vertices([Point::new(10.0, 75.0), Point::new(30.0, 50.0), Point::new(50.0, 75.0)])
                .with_corner_radii([4.0, 4.0, 4.0])
                .with_style(fill(20, 184, 166))
                .into(),
        );
        let first = canvas.store.shapes()[0].id();
        canvas.store.select(Some(first));
        canvas.settings.show_grid = true;

        let exported = render_document(&canvas).unwrap();
        let mut renderer = PixmapRenderer::new();
        renderer.build_scene(&RenderContext::for_export(&canvas)).unwrap();
        let scene = renderer.surface().unwrap();
        assert_eq!(surface_rgba(scene), surface_rgba(&exported));
    }
}
