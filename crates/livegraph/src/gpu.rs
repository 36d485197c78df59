//! Vertex and uniform layouts handed to a renderer.
//!
//! All types are `#[repr(C)]` and `Pod`, so a backend can upload them with
//! `bytemuck::cast_slice` without any conversion.

use super::style::SeriesStyle;
use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Depth written for live samples.
pub const LIVE_DEPTH: f32 = 0.0;

/// Depth written for padding slots past the last live sample.
///
/// A shader can test `position.z > 0.5` to collapse these vertices into
/// zero-area primitives.
pub const PADDING_DEPTH: f32 = 1.0;

/// Vertex used by the line, bar and area streams.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Default, Pod, Zeroable)]
pub struct GraphVertex {
    /// Data-space x, y and the live/padding depth flag
    pub position: [f32; 3],
}

impl GraphVertex {
    /// Create a new vertex.
    pub fn new(x: f32, y: f32, depth: f32) -> Self {
        Self {
            position: [x, y, depth],
        }
    }

    /// The x coordinate.
    #[inline]
    pub fn x(&self) -> f32 {
        self.position[0]
    }

    /// The y coordinate.
    #[inline]
    pub fn y(&self) -> f32 {
        self.position[1]
    }

    /// The depth flag.
    #[inline]
    pub fn depth(&self) -> f32 {
        self.position[2]
    }

    /// Whether this vertex pads an unused slot.
    #[inline]
    pub fn is_padding(&self) -> bool {
        self.depth() > 0.5
    }
}

/// Vertex used by the marker stream.
///
/// All four corners of a marker share the sample position; the renderer
/// offsets them in screen space using `uv`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Default, Pod, Zeroable)]
pub struct MarkerVertex {
    /// Data-space x, y and the live/padding depth flag
    pub position: [f32; 3],
    /// Corner of the marker quad, each component 0 or 1
    pub uv: [f32; 2],
}

/// Per-series uniform block.
///
/// Mirrors the render-time parameters of a series: color, the offset/scale
/// transform and the marker size in normalized view units.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct GraphUniform {
    /// RGBA color
    pub color: [f32; 4],
    /// (offset.x, offset.y, scale.x, scale.y)
    pub transform: [f32; 4],
    /// Marker half-extent in view units (x, y)
    pub marker_size: [f32; 2],
    /// Padding for 16-byte alignment
    pub _padding: [f32; 2],
}

impl GraphUniform {
    /// Build the uniform block for a series.
    ///
    /// `marker_scale` comes from [`ViewTransform::marker_scale`](crate::ViewTransform::marker_scale).
    pub fn new(style: &SeriesStyle, marker_scale: Vec2) -> Self {
        Self {
            color: style.color.to_array(),
            transform: [
                style.offset.x as f32,
                style.offset.y as f32,
                style.scale.x as f32,
                style.scale.y as f32,
            ],
            marker_size: marker_scale.to_array(),
            _padding: [0.0; 2],
        }
    }
}
