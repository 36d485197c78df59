//! Background grid lines for a data window.
//!
//! The step is a fifth of the largest power of ten below the visible extent,
//! so a window always shows between 5 and 50 steps. Every fifth line is a
//! major line and carries a label.

use super::csv::format_value;
use super::rect::DataRect;

/// Number of decades searched in each direction from 1.
const MAX_DECADES: usize = 10;

/// Every n-th step is a major line.
pub const MAJOR_EVERY: i64 = 5;

/// Hard cap per axis, only reachable for extents outside the searched decades.
pub const MAX_LINES_PER_AXIS: usize = 1000;

/// Largest power of ten strictly below `value`, within ten decades of 1.
pub fn prev_power_of_ten(value: f64) -> f64 {
    let mut power = 1.0;
    for _ in 0..MAX_DECADES {
        if power > value {
            break;
        }
        power *= 10.0;
    }
    for _ in 0..MAX_DECADES {
        if power < value {
            break;
        }
        power /= 10.0;
    }
    power
}

/// Grid spacing for a visible extent.
pub fn grid_step(extent: f64) -> f64 {
    prev_power_of_ten(extent) / MAJOR_EVERY as f64
}

/// A single grid line.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    /// Position in data units
    pub value: f64,
    /// Major lines are drawn stronger and labeled
    pub major: bool,
    /// Formatted value for major lines
    pub label: Option<String>,
}

/// Grid lines for both axes of a view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLines {
    /// Vertical lines, at X positions
    pub x: Vec<GridLine>,
    /// Horizontal lines, at Y positions
    pub y: Vec<GridLine>,
    pub x_step: f64,
    pub y_step: f64,
}

impl GridLines {
    /// Compute lines covering `rect`.
    pub fn compute(rect: &DataRect) -> Self {
        let x_step = grid_step(rect.width());
        let y_step = grid_step(rect.height());
        Self {
            x: axis_lines(rect.x_min(), rect.x_max(), x_step),
            y: axis_lines(rect.y_min(), rect.y_max(), y_step),
            x_step,
            y_step,
        }
    }

    /// Major lines on the X axis.
    pub fn major_x(&self) -> impl Iterator<Item = &GridLine> {
        self.x.iter().filter(|line| line.major)
    }

    /// Major lines on the Y axis.
    pub fn major_y(&self) -> impl Iterator<Item = &GridLine> {
        self.y.iter().filter(|line| line.major)
    }
}

/// Lines at every multiple of `step` inside `min..=max`.
pub fn axis_lines(min: f64, max: f64, step: f64) -> Vec<GridLine> {
    if !(min.is_finite() && max.is_finite() && step.is_finite()) || step <= 0.0 || max <= min {
        return Vec::new();
    }

    // Count in f64: step multiples of a wide view do not fit in an i64
    let first = (min / step).ceil();
    let last = (max / step).floor();
    let count = last - first + 1.0;
    if !count.is_finite() || count > MAX_LINES_PER_AXIS as f64 {
        tracing::warn!(
            "Grid over {}..{} needs {} lines, skipping",
            min,
            max,
            count
        );
        return Vec::new();
    }
    // Step indices must stay exact once cast
    const MAX_INDEX: f64 = (1u64 << 53) as f64;
    if first.abs() > MAX_INDEX || last.abs() > MAX_INDEX {
        tracing::warn!("Grid step {} too fine for {}..{}, skipping", step, min, max);
        return Vec::new();
    }
    let first = first as i64;
    let last = last as i64;

    (first..=last)
        .map(|k| {
            let value = k as f64 * step;
            let major = k % MAJOR_EVERY == 0;
            GridLine {
                value,
                major,
                label: major.then(|| format_value(value)),
            }
        })
        .collect()
}
