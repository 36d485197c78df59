//! A named stream of samples with its geometry, style and append listeners.

use super::buffer::{RingBufferIter, SampleRingBuffer, clamp_capacity};
use super::csv;
use super::error::{PlotError, PlotResult};
use super::gpu::GraphUniform;
use super::mesh::GeometryBuilder;
use super::style::SeriesStyle;
use super::transform::ViewTransform;
use super::types::{DataPoint, DrawMode};
use glam::{DVec2, Vec2};
use livegraph_core::config::PlotSettings;
use std::path::Path;

/// Hit radius of a marker in pixels, multiplied by the marker size.
pub const HIT_RADIUS: f32 = 5.0;

/// Identifies a listener registered with [`Series::on_append`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Passed to append listeners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppendEvent {
    /// The sample as stored
    pub point: DataPoint,
    /// The sample after the series offset and scale
    pub plotted: DVec2,
}

type AppendListener = Box<dyn FnMut(&AppendEvent)>;

/// A plotted stream: ring buffer, lazily rebuilt geometry and style.
pub struct Series {
    name: String,
    buffer: SampleRingBuffer,
    geometry: GeometryBuilder,
    style: SeriesStyle,
    clear_on_start: bool,
    listeners: Vec<(ListenerId, AppendListener)>,
    next_listener: u64,
}

impl std::fmt::Debug for Series {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Series")
            .field("name", &self.name)
            .field("len", &self.buffer.len())
            .field("capacity", &self.buffer.capacity())
            .field("style", &self.style)
            .field("clear_on_start", &self.clear_on_start)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Series {
    /// Create an empty series. A capacity of 0 is clamped to 1.
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        let capacity = clamp_capacity(capacity);
        Self {
            name: name.into(),
            buffer: SampleRingBuffer::new(capacity),
            geometry: GeometryBuilder::new(capacity),
            style: SeriesStyle::default(),
            clear_on_start: true,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Create with the default capacity and marker size from `settings`.
    pub fn from_settings(name: impl Into<String>, settings: &PlotSettings) -> Self {
        let settings = settings.clone().validated();
        let mut series = Self::new(name, settings.default_capacity);
        series.style.set_marker_size(settings.default_marker_size);
        series
    }

    /// Set the style.
    pub fn with_style(mut self, style: SeriesStyle) -> Self {
        self.style = style;
        self
    }

    /// Whether to clear this series when the host starts a new session
    /// (on by default).
    pub fn with_clear_on_start(mut self, clear: bool) -> Self {
        self.clear_on_start = clear;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn style(&self) -> &SeriesStyle {
        &self.style
    }

    /// Style changes never invalidate geometry.
    pub fn style_mut(&mut self) -> &mut SeriesStyle {
        &mut self.style
    }

    pub fn clear_on_start(&self) -> bool {
        self.clear_on_start
    }

    pub fn set_clear_on_start(&mut self, clear: bool) {
        self.clear_on_start = clear;
    }

    /// Append a sample, evicting the oldest when full.
    pub fn add_data(&mut self, x: f64, y: f64) {
        self.push(DataPoint::new(x, y));
    }

    /// Append a sample and notify listeners.
    ///
    /// Listeners are skipped while the draw mode is [`DrawMode::NONE`].
    pub fn push(&mut self, point: DataPoint) {
        self.buffer.push(point);
        self.geometry.mark_dirty();

        if self.style.draw_mode == DrawMode::NONE || self.listeners.is_empty() {
            return;
        }

        let event = AppendEvent {
            point,
            plotted: self.style.apply(point.to_dvec2()),
        };
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }

    /// Append several samples in order.
    pub fn extend<I: IntoIterator<Item = DataPoint>>(&mut self, points: I) {
        for point in points {
            self.push(point);
        }
    }

    /// Replace the content without notifying listeners.
    ///
    /// Only the last `capacity` points are kept.
    pub fn replace_points<I: IntoIterator<Item = DataPoint>>(&mut self, points: I) {
        self.buffer.clear();
        self.buffer.extend(points);
        self.geometry.mark_dirty();
    }

    /// Remove every sample.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.geometry.mark_dirty();
    }

    /// Change capacity. Existing samples are discarded.
    pub fn set_capacity(&mut self, capacity: usize) {
        let capacity = clamp_capacity(capacity);
        if capacity == self.buffer.capacity() {
            return;
        }

        tracing::debug!(
            "Resizing series '{}' from {} to {} samples",
            self.name,
            self.buffer.capacity(),
            capacity
        );
        self.buffer.resize(capacity);
        self.geometry.ensure_capacity(capacity);
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> RingBufferIter<'_, DataPoint> {
        self.buffer.iter()
    }

    pub fn buffer(&self) -> &SampleRingBuffer {
        &self.buffer
    }

    /// Rebuild geometry if any sample changed since the last call.
    ///
    /// Call once per frame before drawing.
    pub fn prepare_geometry(&mut self) -> &GeometryBuilder {
        self.geometry.rebuild_if_dirty(&self.buffer);
        &self.geometry
    }

    /// The last prepared geometry, possibly stale.
    pub fn geometry(&self) -> &GeometryBuilder {
        &self.geometry
    }

    /// Whether [`prepare_geometry`](Self::prepare_geometry) would rebuild.
    pub fn needs_rebuild(&self) -> bool {
        self.geometry.is_dirty()
    }

    /// Uniform block for drawing this series through `transform`.
    pub fn uniform(&self, transform: &ViewTransform) -> GraphUniform {
        GraphUniform::new(&self.style, transform.marker_scale(self.style.marker_size()))
    }

    /// Register a closure called after every append.
    pub fn on_append<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&AppendEvent) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregister a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Find the oldest sample whose marker lies under `cursor`.
    ///
    /// A sample is hit when its plotted screen position is within
    /// `5 * marker_size` pixels of the cursor on both axes.
    pub fn hit_test(&self, transform: &ViewTransform, cursor: Vec2) -> Option<DataPoint> {
        let radius = HIT_RADIUS * self.style.marker_size();
        self.buffer.iter().copied().find(|point| {
            let pixel = transform.data_to_screen(self.style.apply(point.to_dvec2()));
            let d = (pixel - cursor).abs();
            d.x < radius && d.y < radius
        })
    }

    /// Encode the content as CSV text.
    pub fn to_csv(&self) -> String {
        csv::encode(&self.buffer)
    }

    /// Replace the content with decoded CSV text.
    ///
    /// Returns the decode report so callers can inspect substituted lines.
    pub fn load_csv_str(&mut self, text: &str) -> csv::DecodeReport {
        let report = csv::decode_with_report(text);
        if report.points.len() > self.capacity() {
            tracing::warn!(
                "CSV for series '{}' has {} samples, keeping the last {}",
                self.name,
                report.points.len(),
                self.capacity()
            );
        }
        self.replace_points(report.points.iter().copied());
        report
    }

    /// Replace the content with a CSV file.
    ///
    /// Returns the number of lines that had to be substituted.
    pub fn load_csv(&mut self, path: impl AsRef<Path>) -> PlotResult<usize> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PlotError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let report = self.load_csv_str(&text);
        tracing::debug!(
            "Loaded {} samples into '{}' from {}",
            self.len(),
            self.name,
            path.display()
        );
        Ok(report.malformed.len())
    }

    /// Write the content to a CSV file, replacing it if it exists.
    pub fn save_csv(&self, path: impl AsRef<Path>) -> PlotResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_csv()).map_err(|source| PlotError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(
            "Saved {} samples from '{}' to {}",
            self.len(),
            self.name,
            path.display()
        );
        Ok(())
    }
}
