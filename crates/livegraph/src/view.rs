//! Visible data window with pan, zoom and auto-follow.
//!
//! X and Y each run an independent two-state machine: *manual* or
//! *auto-follow*. Any pan or zoom drops the touched axes back to manual
//! until the host re-enables following.

use super::rect::DataRect;
use super::series::{ListenerId, Series};
use glam::DVec2;
use livegraph_core::config::{MIN_VIEW_EXTENT, PlotSettings};
use std::cell::RefCell;
use std::rc::Rc;

/// A view controller shared with append listeners.
pub type SharedView = Rc<RefCell<ViewController>>;

/// Controls the data-space rectangle a plot displays.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewController {
    rect: DataRect,
    auto_x: bool,
    auto_y: bool,
    max_extent: DVec2,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::from_settings(&PlotSettings::default())
    }
}

impl ViewController {
    /// Default rectangle, auto-follow off, 10x10 cap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from viewer settings (validated copy).
    pub fn from_settings(settings: &PlotSettings) -> Self {
        let settings = settings.clone().validated();
        Self {
            rect: DataRect::DEFAULT,
            auto_x: settings.auto_adjust_x,
            auto_y: settings.auto_adjust_y,
            max_extent: settings.max_view_size,
        }
    }

    /// Wrap for sharing with series listeners.
    pub fn shared(self) -> SharedView {
        Rc::new(RefCell::new(self))
    }

    /// The visible rectangle.
    pub fn rect(&self) -> DataRect {
        self.rect
    }

    /// Replace the visible rectangle. Auto-follow flags are left untouched.
    pub fn set_rect(&mut self, rect: DataRect) {
        self.rect = rect;
    }

    pub fn auto_x(&self) -> bool {
        self.auto_x
    }

    pub fn auto_y(&self) -> bool {
        self.auto_y
    }

    /// Enable or disable following per axis.
    pub fn set_auto_follow(&mut self, x: bool, y: bool) {
        self.auto_x = x;
        self.auto_y = y;
    }

    /// Largest extent auto-follow grows the view to.
    pub fn max_extent(&self) -> DVec2 {
        self.max_extent
    }

    /// Set the auto-follow cap, clamped to at least [`MIN_VIEW_EXTENT`].
    pub fn set_max_extent(&mut self, extent: DVec2) {
        let mut settings = PlotSettings::default().with_max_view_size(extent);
        settings.validate();
        self.max_extent = settings.max_view_size;
    }

    /// Translate the view by a data-space delta.
    ///
    /// Manual interaction: disables auto-follow on both axes.
    pub fn pan(&mut self, delta: DVec2) {
        self.rect.translate(delta);
        self.auto_x = false;
        self.auto_y = false;
    }

    /// Scale the view around `focal`.
    ///
    /// `factor < 1` zooms in, `factor > 1` zooms out. The focal point keeps its
    /// relative position inside the view. Affected axes switch to manual.
    pub fn zoom(&mut self, focal: DVec2, factor: f64, affect_x: bool, affect_y: bool) {
        if !(factor.is_finite() && factor > 0.0) || !focal.is_finite() {
            tracing::warn!("Ignoring zoom by {} around {:?}", factor, focal);
            return;
        }

        let t = self.rect.normalize(focal);
        if affect_x {
            let (min, max) = scale_axis(focal.x, t.x, self.rect.width(), factor);
            self.rect.set_x(min, max);
            self.auto_x = false;
        }
        if affect_y {
            let (min, max) = scale_axis(focal.y, t.y, self.rect.height(), factor);
            self.rect.set_y(min, max);
            self.auto_y = false;
        }
    }

    /// Restore the default rectangle.
    pub fn reset(&mut self) {
        self.rect = DataRect::DEFAULT;
    }

    /// Reframe to keep a new sample visible on following axes.
    ///
    /// A point outside the view on a following axis becomes the new edge on
    /// that side; the opposite edge moves only as far as needed to respect
    /// the max extent. The view therefore grows up to the cap, then slides.
    pub fn on_sample(&mut self, point: DVec2) {
        if self.auto_x && point.x.is_finite() {
            let (min, max) = follow_axis(
                self.rect.x_min(),
                self.rect.x_max(),
                point.x,
                self.max_extent.x,
            );
            self.rect.set_x(min, max);
        }
        if self.auto_y && point.y.is_finite() {
            let (min, max) = follow_axis(
                self.rect.y_min(),
                self.rect.y_max(),
                point.y,
                self.max_extent.y,
            );
            self.rect.set_y(min, max);
        }
    }
}

/// Subscribe a shared view to a series so it reframes on every append.
pub fn follow(view: &SharedView, series: &mut Series) -> ListenerId {
    let view = Rc::clone(view);
    series.on_append(move |event| view.borrow_mut().on_sample(event.plotted))
}

fn scale_axis(focal: f64, t: f64, extent: f64, factor: f64) -> (f64, f64) {
    let new_extent = (extent * factor).max(MIN_VIEW_EXTENT);
    let min = focal - t * new_extent;
    (min, min + new_extent)
}

fn follow_axis(mut min: f64, mut max: f64, p: f64, cap: f64) -> (f64, f64) {
    if p < min {
        min = p;
        max = (p + cap).min(max);
    }
    if p > max {
        min = (p - cap).max(min);
        max = p;
    }
    (min, max)
}
