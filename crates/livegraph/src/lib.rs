//! livegraph - Streaming plots backed by ring buffers
//!
//! This crate provides:
//! - A fixed-capacity ring buffer of samples with oldest-first iteration
//! - Renderer-agnostic geometry (line strip, bars, area, markers) rebuilt lazily
//! - A view controller with pan, zoom and follow-the-latest-sample framing
//! - CSV import/export of sample sequences
//! - A name-addressed series registry for producers
//!
//! Drawing is left to the host: it uploads the vertex/index streams from
//! [`GeometryBuilder`] and the per-series [`GraphUniform`].
//!
//! # Example
//!
//! ```
//! use livegraph::*;
//!
//! let view = ViewController::new().shared();
//! view.borrow_mut().set_auto_follow(true, true);
//!
//! let mut series = Series::new("sine", 256);
//! follow(&view, &mut series);
//!
//! for i in 0..1000 {
//!     let t = i as f64 * 0.01;
//!     series.add_data(t, t.sin());
//! }
//!
//! let geometry = series.prepare_geometry();
//! assert_eq!(geometry.live_count(), 256);
//! assert!(view.borrow().rect().x_max() > 9.9);
//! ```

pub mod buffer;
pub mod csv;
pub mod error;
pub mod gpu;
pub mod grid;
pub mod mesh;
pub mod rect;
pub mod registry;
pub mod series;
pub mod style;
pub mod transform;
pub mod types;
pub mod view;

// Re-exports
pub use buffer::{RingBuffer, RingBufferIter, SampleRingBuffer};
pub use error::{PlotError, PlotResult};
pub use gpu::{GraphUniform, GraphVertex, MarkerVertex};
pub use grid::{GridLine, GridLines};
pub use mesh::{GeometryBuilder, GeometryStream, StreamRef, Topology};
pub use rect::{DataRect, Rect};
pub use registry::{Clock, ManualClock, SeriesRegistry, SystemClock};
pub use series::{AppendEvent, ListenerId, Series};
pub use style::{Color, SeriesStyle, TextureHandle};
pub use transform::ViewTransform;
pub use types::{DataPoint, DrawMode, DrawStyle};
pub use view::{SharedView, ViewController, follow};

pub use livegraph_core::config::PlotSettings;
