//! Rectangles in screen space and data space.

use glam::{DVec2, Vec2};
use livegraph_core::config::MIN_VIEW_EXTENT;

/// Pixel-space rectangle of the plot widget (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// X position (left)
    pub x: f32,
    /// Y position (top)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a new rect.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the position as a Vec2.
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Get the size as a Vec2.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Check if a point is inside the rect.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Get the right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Axis-aligned rectangle in data coordinates.
///
/// Constructors and mutators keep both extents above [`MIN_VIEW_EXTENT`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataRect {
    min: DVec2,
    max: DVec2,
}

impl DataRect {
    /// The view a fresh plot starts with: a unit square centered on the origin.
    pub const DEFAULT: DataRect = DataRect {
        min: DVec2::new(-0.5, -0.5),
        max: DVec2::new(0.5, 0.5),
    };

    /// Create from corners, swapping inverted bounds and clamping degenerate extents.
    pub fn from_min_max(min: DVec2, max: DVec2) -> Self {
        let mut rect = Self { min, max };
        rect.sanitize();
        rect
    }

    /// Create from a corner and a size.
    pub fn from_pos_size(pos: DVec2, size: DVec2) -> Self {
        Self::from_min_max(pos, pos + size)
    }

    /// Create from bounds on each axis.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self::from_min_max(DVec2::new(x_min, y_min), DVec2::new(x_max, y_max))
    }

    pub fn min(&self) -> DVec2 {
        self.min
    }

    pub fn max(&self) -> DVec2 {
        self.max
    }

    pub fn x_min(&self) -> f64 {
        self.min.x
    }

    pub fn x_max(&self) -> f64 {
        self.max.x
    }

    pub fn y_min(&self) -> f64 {
        self.min.y
    }

    pub fn y_max(&self) -> f64 {
        self.max.y
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// Check if a point is inside (inclusive).
    pub fn contains(&self, point: DVec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Move by a data-space delta.
    pub fn translate(&mut self, delta: DVec2) {
        if !delta.is_finite() {
            tracing::warn!("Ignoring non-finite view translation {:?}", delta);
            return;
        }
        self.min += delta;
        self.max += delta;
    }

    /// Replace the X bounds.
    pub fn set_x(&mut self, x_min: f64, x_max: f64) {
        self.min.x = x_min;
        self.max.x = x_max;
        self.sanitize();
    }

    /// Replace the Y bounds.
    pub fn set_y(&mut self, y_min: f64, y_max: f64) {
        self.min.y = y_min;
        self.max.y = y_max;
        self.sanitize();
    }

    /// Fraction of the way from `min` to `max` at which `point` sits.
    pub fn normalize(&self, point: DVec2) -> DVec2 {
        (point - self.min) / self.size()
    }

    /// Inverse of [`normalize`](Self::normalize).
    pub fn denormalize(&self, t: DVec2) -> DVec2 {
        self.min + t * self.size()
    }

    /// Restore the positive-extent invariant.
    fn sanitize(&mut self) {
        if !(self.min.is_finite() && self.max.is_finite()) {
            tracing::warn!(
                "Non-finite view bounds {:?}..{:?}, resetting to default",
                self.min,
                self.max
            );
            *self = Self::DEFAULT;
            return;
        }
        if self.min.x > self.max.x {
            std::mem::swap(&mut self.min.x, &mut self.max.x);
        }
        if self.min.y > self.max.y {
            std::mem::swap(&mut self.min.y, &mut self.max.y);
        }
        if self.width() < MIN_VIEW_EXTENT {
            tracing::warn!("Degenerate view width {}, clamping", self.width());
            self.max.x = widen(self.min.x);
        }
        if self.height() < MIN_VIEW_EXTENT {
            tracing::warn!("Degenerate view height {}, clamping", self.height());
            self.max.y = widen(self.min.y);
        }
        if !self.max.is_finite() {
            tracing::warn!("View bounds overflowed while clamping, resetting to default");
            *self = Self::DEFAULT;
        }
    }
}

/// Smallest representable `max` above `min` with `max - min >= MIN_VIEW_EXTENT`.
///
/// Far from the origin one ULP of `min` exceeds the minimum extent, so the
/// step grows with the magnitude of `min`.
fn widen(min: f64) -> f64 {
    let mut extent = MIN_VIEW_EXTENT.max(min.abs() * f64::EPSILON * 4.0);
    for _ in 0..64 {
        let max = min + extent;
        if max - min >= MIN_VIEW_EXTENT {
            return max;
        }
        extent *= 2.0;
    }
    f64::INFINITY
}

impl Default for DataRect {
    fn default() -> Self {
        Self::DEFAULT
    }
}
