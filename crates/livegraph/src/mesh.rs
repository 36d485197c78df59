//! Geometry generation for the four draw styles.
//!
//! A [`GeometryBuilder`] is sized once for a buffer capacity `N` and owns:
//!
//! | Stream  | Vertices                     | Indices        | Topology    |
//! |---------|------------------------------|----------------|-------------|
//! | Lines   | `N` positions                | `N`            | line strip  |
//! | Bars    | `2N` (baseline, value) pairs | `2N`           | lines       |
//! | Area    | the bar vertices             | `4 * (N - 1)`  | quads       |
//! | Markers | `4N` corners                 | `4N`           | quads       |
//!
//! Index buffers only depend on `N` and are generated when the capacity
//! changes. Vertex positions are refreshed from the ring buffer when the
//! builder is dirty. Slots past the last live sample repeat the newest sample
//! at [`PADDING_DEPTH`], so every index stays valid and the trailing
//! primitives collapse to zero area.

use super::buffer::SampleRingBuffer;
use super::gpu::{GraphVertex, LIVE_DEPTH, MarkerVertex, PADDING_DEPTH};
use super::types::{DataPoint, DrawStyle};
use bytemuck::Pod;
use livegraph_core::profiling::profile_function;

bitflags::bitflags! {
    /// What part of the cached geometry is stale.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MeshDirty: u8 {
        /// Vertex positions no longer match the samples.
        const POSITIONS = 0b01;
        /// Arrays were reallocated for a new capacity.
        const TOPOLOGY = 0b10;
    }
}

/// Primitive assembly for an index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Connected polyline through every index.
    LineStrip,
    /// Independent segments, two indices each.
    Lines,
    /// Independent quads, four indices each.
    Quads,
}

/// Borrowed vertices and indices of one stream.
#[derive(Debug, Clone, Copy)]
pub struct GeometryStream<'a, V> {
    pub vertices: &'a [V],
    pub indices: &'a [u32],
    pub topology: Topology,
}

impl<V: Pod> GeometryStream<'_, V> {
    /// Vertex data ready for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.vertices)
    }

    /// Index data ready for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.indices)
    }
}

/// A stream of either vertex type, selected by [`DrawStyle`].
#[derive(Debug, Clone, Copy)]
pub enum StreamRef<'a> {
    /// Lines, bars or area.
    Graph(GeometryStream<'a, GraphVertex>),
    /// Markers.
    Marker(GeometryStream<'a, MarkerVertex>),
}

impl StreamRef<'_> {
    pub fn topology(&self) -> Topology {
        match self {
            StreamRef::Graph(s) => s.topology,
            StreamRef::Marker(s) => s.topology,
        }
    }

    pub fn indices(&self) -> &[u32] {
        match self {
            StreamRef::Graph(s) => s.indices,
            StreamRef::Marker(s) => s.indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        match self {
            StreamRef::Graph(s) => s.vertices.len(),
            StreamRef::Marker(s) => s.vertices.len(),
        }
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        match self {
            StreamRef::Graph(s) => s.vertex_bytes(),
            StreamRef::Marker(s) => s.vertex_bytes(),
        }
    }

    pub fn index_bytes(&self) -> &[u8] {
        match self {
            StreamRef::Graph(s) => s.index_bytes(),
            StreamRef::Marker(s) => s.index_bytes(),
        }
    }
}

/// Lazily rebuilt geometry for a single series.
#[derive(Debug, Clone)]
pub struct GeometryBuilder {
    capacity: usize,
    /// One vertex per slot; doubles as the line strip vertices
    positions: Vec<GraphVertex>,
    /// (baseline, value) per slot; shared by the bar and area streams
    bar_vertices: Vec<GraphVertex>,
    /// Four corners per slot
    marker_vertices: Vec<MarkerVertex>,
    line_indices: Vec<u32>,
    bar_indices: Vec<u32>,
    area_indices: Vec<u32>,
    marker_indices: Vec<u32>,
    live_count: usize,
    dirty: MeshDirty,
    rebuild_count: u64,
}

impl GeometryBuilder {
    /// Allocate geometry for `capacity` samples (clamped to at least 1).
    pub fn new(capacity: usize) -> Self {
        let mut builder = Self {
            capacity: 0,
            positions: Vec::new(),
            bar_vertices: Vec::new(),
            marker_vertices: Vec::new(),
            line_indices: Vec::new(),
            bar_indices: Vec::new(),
            area_indices: Vec::new(),
            marker_indices: Vec::new(),
            live_count: 0,
            dirty: MeshDirty::all(),
            rebuild_count: 0,
        };
        builder.ensure_capacity(capacity);
        builder
    }

    /// Reallocate for a new capacity if it differs from the current one.
    ///
    /// Returns `true` if the arrays were reallocated.
    pub fn ensure_capacity(&mut self, capacity: usize) -> bool {
        let capacity = capacity.max(1);
        if capacity == self.capacity {
            return false;
        }

        tracing::debug!(
            "Geometry capacity {} -> {}, regenerating topology",
            self.capacity,
            capacity
        );

        // Fresh allocations so the old arrays are released rather than reused
        self.positions = vec![GraphVertex::default(); capacity];
        self.bar_vertices = vec![GraphVertex::default(); capacity * 2];
        self.marker_vertices = (0..capacity * 4)
            .map(|i| MarkerVertex {
                position: [0.0; 3],
                uv: marker_uv(i),
            })
            .collect();

        self.line_indices = (0..capacity as u32).collect();
        self.bar_indices = (0..(capacity * 2) as u32).collect();
        self.area_indices = (0..area_index_count(capacity)).map(area_index).collect();
        self.marker_indices = (0..(capacity * 4) as u32).collect();

        self.capacity = capacity;
        self.live_count = 0;
        self.dirty = MeshDirty::all();
        true
    }

    /// Flag the vertex positions as stale.
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty.insert(MeshDirty::POSITIONS);
    }

    /// Whether a rebuild is pending.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn dirty_flags(&self) -> MeshDirty {
        self.dirty
    }

    /// Rebuild only if dirty or the buffer capacity changed.
    ///
    /// Returns `true` if a rebuild happened.
    pub fn rebuild_if_dirty(&mut self, buffer: &SampleRingBuffer) -> bool {
        if self.is_dirty() || self.capacity != buffer.capacity() {
            self.rebuild(buffer);
            true
        } else {
            false
        }
    }

    /// Regenerate all vertex positions from the buffer contents.
    pub fn rebuild(&mut self, buffer: &SampleRingBuffer) {
        profile_function!();

        self.ensure_capacity(buffer.capacity());

        let live = buffer.len();
        for (slot, point) in self.positions.iter_mut().zip(buffer.iter()) {
            *slot = to_vertex(point, LIVE_DEPTH);
        }
        let padding = to_vertex(buffer.last().unwrap_or(&DataPoint::ZERO), PADDING_DEPTH);
        for slot in &mut self.positions[live..] {
            *slot = padding;
        }

        for (j, slot) in self.bar_vertices.iter_mut().enumerate() {
            let source = self.positions[j / 2];
            // Even vertices sit on the baseline
            let y = source.y() * (j % 2) as f32;
            *slot = GraphVertex::new(source.x(), y, source.depth());
        }

        for (j, slot) in self.marker_vertices.iter_mut().enumerate() {
            slot.position = self.positions[j / 4].position;
        }

        self.live_count = live;
        self.dirty = MeshDirty::empty();
        self.rebuild_count = self.rebuild_count.wrapping_add(1);

        tracing::trace!(
            "Geometry rebuilt: {} live of {} slots",
            live,
            self.capacity
        );
    }

    /// Number of slots the arrays are sized for.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of live samples at the last rebuild.
    pub fn live_count(&self) -> usize {
        self.live_count
    }

    /// How many times [`rebuild`](Self::rebuild) has run.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }

    /// Primary position array.
    pub fn positions(&self) -> &[GraphVertex] {
        &self.positions
    }

    /// Line strip stream.
    pub fn lines(&self) -> GeometryStream<'_, GraphVertex> {
        GeometryStream {
            vertices: &self.positions,
            indices: &self.line_indices,
            topology: Topology::LineStrip,
        }
    }

    /// Bar segment stream.
    pub fn bars(&self) -> GeometryStream<'_, GraphVertex> {
        GeometryStream {
            vertices: &self.bar_vertices,
            indices: &self.bar_indices,
            topology: Topology::Lines,
        }
    }

    /// Filled area stream.
    pub fn area(&self) -> GeometryStream<'_, GraphVertex> {
        GeometryStream {
            vertices: &self.bar_vertices,
            indices: &self.area_indices,
            topology: Topology::Quads,
        }
    }

    /// Marker quad stream.
    pub fn markers(&self) -> GeometryStream<'_, MarkerVertex> {
        GeometryStream {
            vertices: &self.marker_vertices,
            indices: &self.marker_indices,
            topology: Topology::Quads,
        }
    }

    /// Stream for a draw style.
    pub fn stream(&self, style: DrawStyle) -> StreamRef<'_> {
        match style {
            DrawStyle::Lines => StreamRef::Graph(self.lines()),
            DrawStyle::Bars => StreamRef::Graph(self.bars()),
            DrawStyle::Area => StreamRef::Graph(self.area()),
            DrawStyle::Points => StreamRef::Marker(self.markers()),
        }
    }

    /// Number of leading indices that reference live samples.
    ///
    /// Drawing only this prefix skips the collapsed padding primitives.
    pub fn live_index_count(&self, style: DrawStyle) -> usize {
        let live = self.live_count;
        match style {
            DrawStyle::Lines => live,
            DrawStyle::Bars => live * 2,
            DrawStyle::Area => area_index_count(live),
            DrawStyle::Points => live * 4,
        }
    }
}

impl Default for GeometryBuilder {
    fn default() -> Self {
        Self::new(crate::buffer::DEFAULT_CAPACITY)
    }
}

fn to_vertex(point: &DataPoint, depth: f32) -> GraphVertex {
    GraphVertex::new(point.x as f32, point.y as f32, depth)
}

/// Length of the area index buffer for `capacity` samples.
#[inline]
pub fn area_index_count(capacity: usize) -> usize {
    4 * capacity.saturating_sub(1)
}

/// The `k`-th index of the area quad buffer.
///
/// Quad `q` covers samples `q` and `q + 1`, visiting
/// `baseline(q), value(q), value(q + 1), baseline(q + 1)`.
#[inline]
pub fn area_index(k: usize) -> u32 {
    (((k + 2) / 4) * 2 + (((k + 1) / 2) & 1)) as u32
}

/// Corner UV of the `i`-th marker vertex.
#[inline]
pub fn marker_uv(i: usize) -> [f32; 2] {
    [((i % 4) / 2) as f32, (((i + 1) % 4) / 2) as f32]
}

/// Split a quad index list into a triangle list.
///
/// Each quad `a b c d` becomes `a b c` and `a c d`. A trailing partial quad is
/// dropped.
pub fn triangulate_quads(indices: &[u32]) -> Vec<u32> {
    let mut triangles = Vec::with_capacity(indices.len() / 4 * 6);
    for quad in indices.chunks_exact(4) {
        triangles.extend_from_slice(&[quad[0], quad[1], quad[2], quad[0], quad[2], quad[3]]);
    }
    triangles
}
