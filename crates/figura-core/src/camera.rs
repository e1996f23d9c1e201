//! Camera module for pan/zoom transforms.

use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom step applied per wheel notch.
pub const WHEEL_ZOOM_FACTOR: f64 = 1.05;

/// Space kept between the canvas and the container edges when fitting.
pub const FIT_PADDING: f64 = 32.0;

/// Camera manages the view transform between the display container and the canvas.
///
/// It handles panning (translation) and zooming (scaling) operations,
/// converting between screen coordinates and canvas coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan)
    pub offset: Vec2,
    /// Current zoom level (1.0 = one canvas unit per pixel)
    pub zoom: f64,
    /// Minimum allowed zoom level
    pub min_zoom: f64,
    /// Maximum allowed zoom level
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.05,
            max_zoom: 20.0,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Canvas-to-screen transform for rendering.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Screen-to-canvas transform for input handling.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to canvas coordinates.
    pub fn screen_to_canvas(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a canvas point to screen coordinates.
    pub fn canvas_to_screen(&self, canvas_point: Point) -> Point {
        self.transform() * canvas_point
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom the camera, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let canvas_point = self.screen_to_canvas(screen_point);
        self.zoom = new_zoom;

        // Keep canvas_point under the cursor
        let new_screen = self.canvas_to_screen(canvas_point);
        self.offset += screen_point - new_screen;
    }

    /// Apply one wheel event: positive delta zooms out, negative zooms in.
    pub fn wheel_zoom(&mut self, screen_point: Point, wheel_delta: f64) {
        let factor = if wheel_delta > 0.0 {
            1.0 / WHEEL_ZOOM_FACTOR
        } else {
            WHEEL_ZOOM_FACTOR
        };
        self.zoom_at(screen_point, factor);
    }

    /// Scale and centre a `canvas` of the given size inside `container`.
    pub fn fit_canvas(&mut self, canvas: Size, container: Size, padding: f64) {
        if canvas.width <= 0.0 || canvas.height <= 0.0 {
            self.offset = Vec2::ZERO;
            self.zoom = 1.0;
            return;
        }

        let available = Size::new(
            (container.width - padding * 2.0).max(1.0),
            (container.height - padding * 2.0).max(1.0),
        );
        let scale_x = available.width / canvas.width;
        let scale_y = available.height / canvas.height;
        self.zoom = scale_x.min(scale_y).clamp(self.min_zoom, self.max_zoom);

        self.offset = Vec2::new(
            container.width / 2.0 - canvas.width * self.zoom / 2.0,
            container.height / 2.0 - canvas.height * self.zoom / 2.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = Camera::new();
        assert_eq!(camera.offset, Vec2::ZERO);
        assert!((camera.zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_canvas_with_offset_and_zoom() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(50.0, 100.0);
        camera.zoom = 2.0;
        let canvas = camera.screen_to_canvas(Point::new(150.0, 300.0));
        assert!((canvas.x - 50.0).abs() < f64::EPSILON);
        assert!((canvas.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(30.0, -20.0);
        camera.zoom = 1.5;

        let screen_point = Point::new(123.0, 456.0);
        let back = camera.canvas_to_screen(camera.screen_to_canvas(screen_point));
        assert!((back.x - screen_point.x).abs() < 1e-10);
        assert!((back.y - screen_point.y).abs() < 1e-10);
    }

    #[test]
    fn test_wheel_zoom_keeps_cursor_fixed() {
        let mut camera = Camera::new();
        let cursor = Point::new(200.0, 150.0);
        let before = camera.screen_to_canvas(cursor);

        camera.wheel_zoom(cursor, -1.0);
        assert!((camera.zoom - WHEEL_ZOOM_FACTOR).abs() < 1e-12);
        let after = camera.screen_to_canvas(cursor);
        assert!((after.x - before.x).abs() < 1e-9);
        assert!((after.y - before.y).abs() < 1e-9);

        camera.wheel_zoom(cursor, 1.0);
        assert!((camera.zoom - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_fit_canvas_centres() {
        let mut camera = Camera::new();
        camera.fit_canvas(
            Size::new(1920.0, 1080.0),
            Size::new(1024.0, 768.0),
            FIT_PADDING,
        );
        assert!((camera.zoom - 960.0 / 1920.0).abs() < 1e-12);
        let centre = camera.canvas_to_screen(Point::new(960.0, 540.0));
        assert!((centre.x - 512.0).abs() < 1e-9);
        assert!((centre.y - 384.0).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::new();
        camera.zoom_at(Point::ZERO, 0.0001);
        assert!((camera.zoom - camera.min_zoom).abs() < f64::EPSILON);

        camera.zoom_at(Point::ZERO, 10_000.0);
        assert!((camera.zoom - camera.max_zoom).abs() < f64::EPSILON);
    }
}
