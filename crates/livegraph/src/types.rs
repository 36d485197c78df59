//! Core sample and draw-mode types.

use glam::DVec2;

/// A single sample: `x` is the independent variable (usually time), `y` the value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DataPoint {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl DataPoint {
    /// The origin, also used as the substitute for malformed CSV records.
    pub const ZERO: DataPoint = DataPoint { x: 0.0, y: 0.0 };

    /// Create a new data point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// View as a glam vector.
    pub fn to_dvec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl From<(f64, f64)> for DataPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<DVec2> for DataPoint {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

bitflags::bitflags! {
    /// Which geometry streams a renderer should draw for a series.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DrawMode: u8 {
        /// Marker quad per sample.
        const POINTS = 0b0001;
        /// Line strip through the samples.
        const LINES = 0b0010;
        /// Vertical bar from zero to each sample.
        const BARS = 0b0100;
        /// Filled area between zero and the line.
        const AREA = 0b1000;
    }
}

impl DrawMode {
    /// Nothing is drawn.
    pub const NONE: DrawMode = DrawMode::empty();

    /// The draw styles enabled by this mode, in draw order.
    pub fn styles(self) -> impl Iterator<Item = DrawStyle> {
        DrawStyle::ALL
            .into_iter()
            .filter(move |style| self.contains(style.mode()))
    }
}

/// One of the four geometry streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawStyle {
    /// Line strip.
    Lines,
    /// Independent baseline-to-value segments.
    Bars,
    /// Quads between consecutive bars.
    Area,
    /// Camera-facing marker quads.
    Points,
}

impl DrawStyle {
    /// All styles, in the order a renderer draws them.
    pub const ALL: [DrawStyle; 4] = [
        DrawStyle::Lines,
        DrawStyle::Bars,
        DrawStyle::Area,
        DrawStyle::Points,
    ];

    /// The flag that enables this style.
    pub fn mode(self) -> DrawMode {
        match self {
            DrawStyle::Lines => DrawMode::LINES,
            DrawStyle::Bars => DrawMode::BARS,
            DrawStyle::Area => DrawMode::AREA,
            DrawStyle::Points => DrawMode::POINTS,
        }
    }
}
