//! Mapping between data space and the plot widget's pixels.

use super::rect::{DataRect, Rect};
use super::view::ViewController;
use glam::{DVec2, Vec2};

/// Wheel steps are scaled by this before exponentiation.
pub const WHEEL_ZOOM_RATE: f64 = 0.03;

/// Marker size 1.0 spans this many pixels.
pub const MARKER_PIXELS: f32 = 100.0;

/// Snapshot of a view rectangle laid over a screen rectangle.
///
/// Screen Y grows downward, data Y grows upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    screen: Rect,
    view: DataRect,
}

impl ViewTransform {
    /// Create a transform. Screen extents are clamped to at least one pixel.
    pub fn new(screen: Rect, view: DataRect) -> Self {
        let screen = Rect::new(screen.x, screen.y, screen.width.max(1.0), screen.height.max(1.0));
        Self { screen, view }
    }

    pub fn screen(&self) -> Rect {
        self.screen
    }

    pub fn view(&self) -> DataRect {
        self.view
    }

    /// Convert data coordinates to pixel coordinates.
    pub fn data_to_screen(&self, point: DVec2) -> Vec2 {
        let t = self.view.normalize(point);
        let px = self.screen.x + t.x as f32 * self.screen.width;
        // Y is inverted (0 at top in screen coords)
        let py = self.screen.bottom() - t.y as f32 * self.screen.height;
        Vec2::new(px, py)
    }

    /// Convert pixel coordinates to data coordinates.
    pub fn screen_to_data(&self, pixel: Vec2) -> DVec2 {
        self.view.denormalize(self.normalized(pixel))
    }

    /// Fractional position of a pixel inside the view, `(0, 0)` at the
    /// bottom-left corner and `(1, 1)` at the top-right.
    pub fn normalized(&self, pixel: Vec2) -> DVec2 {
        let local = pixel - self.screen.position();
        DVec2::new(
            (local.x / self.screen.width) as f64,
            1.0 - (local.y / self.screen.height) as f64,
        )
    }

    /// Convert a pixel delta (e.g. a mouse drag) to a data-space delta.
    pub fn screen_delta_to_data(&self, delta: Vec2) -> DVec2 {
        let per_pixel = self.view.size() / self.screen.size().as_dvec2();
        DVec2::new(delta.x as f64 * per_pixel.x, -(delta.y as f64) * per_pixel.y)
    }

    /// Drag the view so the content follows the cursor.
    pub fn drag(&self, view: &mut ViewController, pixel_delta: Vec2) {
        view.pan(-self.screen_delta_to_data(pixel_delta));
    }

    /// Zoom around the cursor by one wheel step.
    ///
    /// Positive `wheel_delta` zooms out and negative zooms in, by a factor of
    /// `exp(wheel_delta * 0.03)`.
    pub fn zoom_at_cursor(
        &self,
        view: &mut ViewController,
        cursor: Vec2,
        wheel_delta: f32,
        affect_x: bool,
        affect_y: bool,
    ) {
        let factor = (wheel_delta as f64 * WHEEL_ZOOM_RATE).exp();
        view.zoom(self.screen_to_data(cursor), factor, affect_x, affect_y);
    }

    /// Marker half-extent in normalized view units for a marker size multiplier.
    pub fn marker_scale(&self, marker_size: f32) -> Vec2 {
        Vec2::new(
            MARKER_PIXELS / self.screen.width,
            MARKER_PIXELS / self.screen.height,
        ) * marker_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transform() -> ViewTransform {
        ViewTransform::new(
            Rect::new(10.0, 20.0, 200.0, 100.0),
            DataRect::new(0.0, 0.0, 10.0, 5.0),
        )
    }

    #[test]
    fn test_corners() {
        let t = transform();
        assert_eq!(t.data_to_screen(DVec2::new(0.0, 0.0)), Vec2::new(10.0, 120.0));
        assert_eq!(t.data_to_screen(DVec2::new(10.0, 5.0)), Vec2::new(210.0, 20.0));
    }

    #[test]
    fn test_screen_to_data_inverts() {
        let t = transform();
        let p = DVec2::new(2.5, 1.0);
        let back = t.screen_to_data(t.data_to_screen(p));
        assert!(back.abs_diff_eq(p, 1e-5));
    }

    #[test]
    fn test_normalized() {
        let t = transform();
        assert_eq!(t.normalized(Vec2::new(110.0, 70.0)), DVec2::new(0.5, 0.5));
        assert_eq!(t.normalized(Vec2::new(10.0, 120.0)), DVec2::new(0.0, 0.0));
    }

    #[test]
    fn test_drag_moves_content_with_cursor() {
        let t = transform();
        let mut view = ViewController::new();
        view.set_rect(DataRect::new(0.0, 0.0, 10.0, 5.0));

        // 20px right is 1 data unit, 20px down is 1 data unit up
        t.drag(&mut view, Vec2::new(20.0, 20.0));
        assert_eq!(view.rect(), DataRect::new(-1.0, 1.0, 9.0, 6.0));
    }

    #[test]
    fn test_zoom_at_cursor_direction() {
        let t = transform();
        let mut view = ViewController::new();
        view.set_rect(t.view());

        t.zoom_at_cursor(&mut view, Vec2::new(110.0, 70.0), -10.0, true, true);
        assert!(view.rect().width() < 10.0);
        assert!((view.rect().center() - DVec2::new(5.0, 2.5)).length() < 1e-9);

        view.set_rect(t.view());
        t.zoom_at_cursor(&mut view, Vec2::new(110.0, 70.0), 10.0, true, false);
        assert!(view.rect().width() > 10.0);
        assert_eq!(view.rect().height(), 5.0);
    }

    #[test]
    fn test_marker_scale() {
        let t = transform();
        assert_eq!(t.marker_scale(1.0), Vec2::new(0.5, 1.0));
        assert_eq!(t.marker_scale(2.0), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_degenerate_screen_clamped() {
        let t = ViewTransform::new(Rect::new(0.0, 0.0, 0.0, -5.0), DataRect::DEFAULT);
        assert_eq!(t.screen().size(), Vec2::ONE);
    }
}
