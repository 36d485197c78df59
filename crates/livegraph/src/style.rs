//! Render-time style of a series.

use super::types::DrawMode;
use glam::{DAffine2, DVec2};

/// Smallest allowed marker size.
pub const MIN_MARKER_SIZE: f32 = 0.05;
/// Largest allowed marker size.
pub const MAX_MARKER_SIZE: f32 = 5.0;

/// RGBA color with components in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgba(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::rgba(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color::rgba(0.0, 0.0, 1.0, 1.0);

    /// Create an opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color with alpha.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Opaque handle to a marker texture owned by the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Visual configuration of a series.
///
/// Offset and scale are applied by the renderer as a 2D affine transform;
/// they never touch the generated geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStyle {
    /// Streams to draw
    pub draw_mode: DrawMode,
    /// Draw color
    pub color: Color,
    /// Translation applied after scaling
    pub offset: DVec2,
    /// Per-axis scale
    pub scale: DVec2,
    /// Marker texture, or `None` for the viewer's default marker
    pub marker_texture: Option<TextureHandle>,
    /// Marker size multiplier
    marker_size: f32,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            draw_mode: DrawMode::LINES,
            color: Color::WHITE,
            offset: DVec2::ZERO,
            scale: DVec2::ONE,
            marker_texture: None,
            marker_size: 1.0,
        }
    }
}

impl SeriesStyle {
    /// Set the draw mode.
    pub fn with_draw_mode(mut self, draw_mode: DrawMode) -> Self {
        self.draw_mode = draw_mode;
        self
    }

    /// Set the color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the offset.
    pub fn with_offset(mut self, offset: DVec2) -> Self {
        self.offset = offset;
        self
    }

    /// Set the scale.
    pub fn with_scale(mut self, scale: DVec2) -> Self {
        self.scale = scale;
        self
    }

    /// Set the marker texture.
    pub fn with_marker_texture(mut self, texture: TextureHandle) -> Self {
        self.marker_texture = Some(texture);
        self
    }

    /// Set the marker size.
    pub fn with_marker_size(mut self, size: f32) -> Self {
        self.set_marker_size(size);
        self
    }

    /// Marker size multiplier, always within `MIN_MARKER_SIZE..=MAX_MARKER_SIZE`.
    pub fn marker_size(&self) -> f32 {
        self.marker_size
    }

    /// Set the marker size, clamping into the allowed range.
    pub fn set_marker_size(&mut self, size: f32) {
        self.marker_size = if size.is_nan() {
            1.0
        } else {
            size.clamp(MIN_MARKER_SIZE, MAX_MARKER_SIZE)
        };
    }

    /// The data-to-plot transform: `offset + scale * p`.
    pub fn transform(&self) -> DAffine2 {
        DAffine2::from_scale_angle_translation(self.scale, 0.0, self.offset)
    }

    /// Apply the transform to a single point.
    pub fn apply(&self, point: DVec2) -> DVec2 {
        self.offset + self.scale * point
    }
}
