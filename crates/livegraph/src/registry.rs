//! Name-addressed collection of series.
//!
//! Producers that only know a series by name append through the registry:
//!
//! ```
//! use livegraph::{Series, SeriesRegistry};
//!
//! let mut registry = SeriesRegistry::new();
//! registry.register(Series::new("temperature", 100));
//! registry.add_data("temperature", 0.0, 21.5);
//!
//! assert_eq!(registry.get("temperature").map(|s| s.len()), Some(1));
//! ```

use super::error::{PlotError, PlotResult};
use super::series::Series;
use livegraph_core::collections::{NameMap, name_map_with_capacity};
use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;
use std::time::Instant;

/// Time source for [`SeriesRegistry::add_value`].
pub trait Clock {
    /// Seconds since an arbitrary fixed origin.
    fn now(&self) -> f64;
}

/// Wall clock measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Clock advanced by hand. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    time: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(time: f64) -> Self {
        Self {
            time: Rc::new(Cell::new(time)),
        }
    }

    pub fn set(&self, time: f64) {
        self.time.set(time);
    }

    pub fn advance(&self, seconds: f64) {
        self.time.set(self.time.get() + seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.time.get()
    }
}

/// Owns series by name.
///
/// Lookups by an unknown name log a warning and do nothing; they never
/// create a series.
pub struct SeriesRegistry {
    series: NameMap<Series>,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for SeriesRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeriesRegistry")
            .field("series", &self.series.keys().collect::<Vec<_>>())
            .field("time", &self.clock.now())
            .finish()
    }
}

impl Default for SeriesRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesRegistry {
    /// Create an empty registry timed by a [`SystemClock`].
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }

    /// Create an empty registry with a custom time source.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            series: name_map_with_capacity(8),
            clock: Box::new(clock),
        }
    }

    /// Current time of the registry clock.
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Add a series under its name, returning the one it replaced.
    pub fn register(&mut self, series: Series) -> Option<Series> {
        let name = series.name().to_string();
        let previous = self.series.insert(name, series);
        if let Some(previous) = &previous {
            tracing::debug!("Replaced series '{}'", previous.name());
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&Series> {
        self.series.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Series> {
        self.series.get_mut(name)
    }

    /// Like [`get`](Self::get), but a miss is an error and is logged.
    pub fn lookup(&self, name: &str) -> PlotResult<&Series> {
        self.series.get(name).ok_or_else(|| not_found(name))
    }

    /// Mutable [`lookup`](Self::lookup).
    pub fn lookup_mut(&mut self, name: &str) -> PlotResult<&mut Series> {
        self.series.get_mut(name).ok_or_else(|| not_found(name))
    }

    pub fn remove(&mut self, name: &str) -> Option<Series> {
        self.series.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.series.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.series.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Series> {
        self.series.values_mut()
    }

    /// Drop every series.
    pub fn reset(&mut self) {
        tracing::debug!("Resetting registry ({} series)", self.series.len());
        self.series.clear();
    }

    /// Append a sample to the named series.
    pub fn add_data(&mut self, name: &str, x: f64, y: f64) {
        if let Ok(series) = self.lookup_mut(name) {
            series.add_data(x, y);
        }
    }

    /// Append a value stamped with the registry clock.
    pub fn add_value(&mut self, name: &str, y: f64) {
        let x = self.clock.now();
        self.add_data(name, x, y);
    }

    /// Clear the series flagged with `clear_on_start`.
    pub fn begin_session(&mut self) {
        for series in self.series.values_mut().filter(|s| s.clear_on_start()) {
            series.clear();
        }
    }

    /// Clear every series, keeping registrations.
    pub fn clear_all(&mut self) {
        for series in self.series.values_mut() {
            series.clear();
        }
    }

    /// Load a CSV file into the named series.
    ///
    /// Returns the number of malformed lines.
    pub fn load_csv(&mut self, name: &str, path: impl AsRef<Path>) -> PlotResult<usize> {
        self.lookup_mut(name)?.load_csv(path)
    }

    /// Save the named series to a CSV file.
    pub fn save_csv(&self, name: &str, path: impl AsRef<Path>) -> PlotResult<()> {
        self.lookup(name)?.save_csv(path)
    }
}

fn not_found(name: &str) -> PlotError {
    tracing::warn!("No series named '{}'", name);
    PlotError::NotFound {
        name: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_replaces() {
        let mut registry = SeriesRegistry::new();
        assert!(registry.register(Series::new("a", 4)).is_none());

        let replaced = registry.register(Series::new("a", 8));
        assert_eq!(replaced.map(|s| s.capacity()), Some(4));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a").map(|s| s.capacity()), Some(8));
    }

    #[test]
    fn test_miss_is_noop() {
        let mut registry = SeriesRegistry::new();
        registry.add_data("missing", 1.0, 2.0);
        registry.add_value("missing", 2.0);

        assert!(registry.is_empty());
        assert!(matches!(
            registry.lookup("missing"),
            Err(PlotError::NotFound { name }) if name == "missing"
        ));
    }

    #[test]
    fn test_add_value_uses_clock() {
        let clock = ManualClock::new(1.5);
        let mut registry = SeriesRegistry::with_clock(clock.clone());
        registry.register(Series::new("v", 4));

        registry.add_value("v", 10.0);
        clock.advance(0.5);
        registry.add_value("v", 20.0);

        let points: Vec<(f64, f64)> = registry
            .get("v")
            .map(|s| s.iter().map(|p| (p.x, p.y)).collect())
            .unwrap_or_default();
        assert_eq!(points, vec![(1.5, 10.0), (2.0, 20.0)]);
    }

    #[test]
    fn test_names_sorted() {
        let mut registry = SeriesRegistry::new();
        registry.register(Series::new("b", 1));
        registry.register(Series::new("a", 1));
        assert_eq!(registry.names(), vec!["a", "b"]);
    }

    #[test]
    fn test_begin_session_clears_flagged() {
        let mut registry = SeriesRegistry::new();
        registry.register(Series::new("keep", 4).with_clear_on_start(false));
        registry.register(Series::new("clear", 4));
        registry.add_data("keep", 0.0, 0.0);
        registry.add_data("clear", 0.0, 0.0);

        registry.begin_session();
        assert_eq!(registry.get("keep").map(Series::len), Some(1));
        assert_eq!(registry.get("clear").map(Series::len), Some(0));

        registry.clear_all();
        assert_eq!(registry.get("keep").map(Series::len), Some(0));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_reset() {
        let mut registry = SeriesRegistry::new();
        registry.register(Series::new("a", 1));
        registry.reset();
        assert!(registry.is_empty());
        assert!(registry.get("a").is_none());
    }

    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
        assert!(a >= 0.0);
    }
}
