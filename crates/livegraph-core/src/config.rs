//! Settings shared by a plot view and the series it displays.

use glam::DVec2;

/// Smallest extent a view or auto-follow cap may shrink to.
pub const MIN_VIEW_EXTENT: f64 = 1e-5;

/// Plot settings for a viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSettings {
    /// Follow incoming samples on the X axis.
    pub auto_adjust_x: bool,
    /// Follow incoming samples on the Y axis.
    pub auto_adjust_y: bool,
    /// Largest extent auto-follow may grow the view to, per axis.
    pub max_view_size: DVec2,
    /// Capacity used for newly created series.
    pub default_capacity: usize,
    /// Marker size used for newly created series.
    pub default_marker_size: f32,
}

impl Default for PlotSettings {
    fn default() -> Self {
        PlotSettings {
            auto_adjust_x: false,
            auto_adjust_y: false,
            max_view_size: DVec2::new(10.0, 10.0),
            default_capacity: 500,
            default_marker_size: 1.0,
        }
    }
}

impl PlotSettings {
    /// Enable or disable auto-follow on both axes.
    pub fn with_auto_adjust(mut self, x: bool, y: bool) -> Self {
        self.auto_adjust_x = x;
        self.auto_adjust_y = y;
        self
    }

    /// Set the auto-follow cap.
    pub fn with_max_view_size(mut self, size: DVec2) -> Self {
        self.max_view_size = size;
        self
    }

    /// Set the capacity for new series.
    pub fn with_default_capacity(mut self, capacity: usize) -> Self {
        self.default_capacity = capacity;
        self
    }

    /// Clamp out-of-range values in place.
    ///
    /// Returns `true` if anything had to be changed.
    pub fn validate(&mut self) -> bool {
        let before = self.clone();

        // NaN compares false against everything, so reject it explicitly
        let clamp_extent = |v: f64| {
            if v.is_nan() {
                MIN_VIEW_EXTENT
            } else {
                v.max(MIN_VIEW_EXTENT)
            }
        };
        self.max_view_size = DVec2::new(
            clamp_extent(self.max_view_size.x),
            clamp_extent(self.max_view_size.y),
        );
        self.default_capacity = self.default_capacity.max(1);
        if !self.default_marker_size.is_finite() {
            self.default_marker_size = 1.0;
        }
        self.default_marker_size = self.default_marker_size.clamp(0.05, 5.0);

        let changed = before != *self;
        if changed {
            tracing::warn!("Plot settings clamped: {:?} -> {:?}", before, self);
        }
        changed
    }

    /// Consume and return a validated copy.
    pub fn validated(mut self) -> Self {
        self.validate();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let mut settings = PlotSettings::default();
        assert!(!settings.validate());
        assert_eq!(settings.max_view_size, DVec2::new(10.0, 10.0));
    }

    #[test]
    fn test_validate_clamps_view_size() {
        let mut settings =
            PlotSettings::default().with_max_view_size(DVec2::new(0.0, f64::NAN));
        assert!(settings.validate());
        assert_eq!(settings.max_view_size, DVec2::splat(MIN_VIEW_EXTENT));
    }

    #[test]
    fn test_validate_clamps_capacity_and_marker() {
        let mut settings = PlotSettings::default().with_default_capacity(0);
        settings.default_marker_size = 12.0;
        settings.validate();
        assert_eq!(settings.default_capacity, 1);
        assert_eq!(settings.default_marker_size, 5.0);
    }
}
