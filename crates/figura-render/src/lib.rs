//! Figura Render Library
//!
//! Renderer abstraction, a CPU scene renderer and raster export for Figura.
//! A Vello scene builder is available behind the `vello-renderer` feature.

pub mod export;
mod renderer;
pub mod scene;
pub mod surface;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use export::{ExportError, ExportFormat, export_image, export_jpeg, export_png, export_to_file};
pub use renderer::{GUIDE_DASH, RenderContext, RenderResult, Renderer, RendererError};
pub use scene::{PixmapRenderer, paint_scene};
pub use surface::{PixmapSurface, Surface, draw_shape};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
