//! Data series and the series store
//!
//! Markers are grouped into series, one per curve being digitized. Each
//! series owns its markers (in global coordinates, in placement order) along
//! with the size and shape its markers are drawn with.
//!
//! # Main Types
//!
//! - [`Series`] - One curve: ordered markers plus marker style
//! - [`SeriesStore`] - All series of a session plus the working index
//!
//! # Invariants
//!
//! - The store is never empty: it starts with one default series, and
//!   deleting the sole remaining series clears its markers instead of
//!   removing it.
//! - The working index is always in bounds, including after deletions.
//! - Marker sizes never drop below [`MIN_MARKER_SIZE`].

use crate::types::{GlobalCoord, MarkerShape};
use serde::{Deserialize, Serialize};

/// Marker size a fresh series starts with
pub const DEFAULT_MARKER_SIZE: f64 = 5.0;

/// Smallest allowed marker size
pub const MIN_MARKER_SIZE: f64 = 1.0;

/// One data series: ordered markers plus the style they are drawn with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    markers: Vec<GlobalCoord>,
    marker_size: f64,
    marker_shape: MarkerShape,
}

impl Series {
    /// Create a new empty series with the default style
    pub fn new() -> Self {
        Self {
            markers: Vec::new(),
            marker_size: DEFAULT_MARKER_SIZE,
            marker_shape: MarkerShape::default(),
        }
    }

    /// The markers of this series, in placement order
    pub fn markers(&self) -> &[GlobalCoord] {
        &self.markers
    }

    /// Number of markers in this series
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether this series has no markers
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Size markers of this series are drawn with
    pub fn marker_size(&self) -> f64 {
        self.marker_size
    }

    /// Shape markers of this series are drawn with
    pub fn marker_shape(&self) -> MarkerShape {
        self.marker_shape
    }
}

impl Default for Series {
    fn default() -> Self {
        Self::new()
    }
}

/// All series of a digitizing session
///
/// New markers always go to the *working* series. Edit operations address
/// series by explicit index instead.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStore {
    series: Vec<Series>,
    working: usize,
}

impl SeriesStore {
    /// Create a store holding one empty default series
    pub fn new() -> Self {
        Self {
            series: vec![Series::new()],
            working: 0,
        }
    }

    /// Rebuild a store from restored series
    ///
    /// Upholds the store invariants regardless of input: an empty list is
    /// replaced by a single default series and undersized markers are
    /// clamped. The working index starts at 0.
    pub fn from_series(mut series: Vec<Series>) -> Self {
        if series.is_empty() {
            series.push(Series::new());
        }
        for s in &mut series {
            s.marker_size = s.marker_size.max(MIN_MARKER_SIZE);
        }
        Self { series, working: 0 }
    }

    /// All series, in creation order
    pub fn all(&self) -> &[Series] {
        &self.series
    }

    /// Number of series (always >= 1)
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether the store holds no series; always false by construction
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Get a series by index
    pub fn get(&self, index: usize) -> Option<&Series> {
        self.series.get(index)
    }

    /// Index of the working series
    pub fn working_index(&self) -> usize {
        self.working
    }

    /// The working series
    pub fn working(&self) -> &Series {
        &self.series[self.working]
    }

    /// Make the first series the working series
    pub fn reset_working(&mut self) {
        self.working = 0;
    }

    /// Append a new empty series and make it the working series
    pub fn add_series(&mut self) {
        self.series.push(Series::new());
        self.working = self.series.len() - 1;
    }

    /// Cycle the working series forward, wrapping around
    pub fn next_series(&mut self) {
        self.working = (self.working + 1) % self.series.len();
    }

    /// Cycle the working series backward, wrapping around
    pub fn prev_series(&mut self) {
        self.working = (self.working + self.series.len() - 1) % self.series.len();
    }

    /// Append a marker to the working series
    pub fn add_marker(&mut self, marker: GlobalCoord) {
        self.series[self.working].markers.push(marker);
    }

    /// Remove the most recently placed marker of the working series
    ///
    /// No-op when the working series is empty.
    pub fn remove_last_marker(&mut self) {
        self.series[self.working].markers.pop();
    }

    /// Adjust the working series' marker size by a delta, clamped to the
    /// minimum size
    pub fn adjust_marker_size(&mut self, delta: f64) {
        let series = &mut self.series[self.working];
        series.marker_size = (series.marker_size + delta).max(MIN_MARKER_SIZE);
    }

    /// Cycle the working series' marker shape to the next shape
    pub fn cycle_marker_shape(&mut self) {
        let series = &mut self.series[self.working];
        series.marker_shape = series.marker_shape.next();
    }

    /// Move one marker by the given global-unit deltas
    ///
    /// Returns false if the indices are out of bounds.
    pub fn move_marker(&mut self, series: usize, marker: usize, dx: f64, dy: f64) -> bool {
        match self
            .series
            .get_mut(series)
            .and_then(|s| s.markers.get_mut(marker))
        {
            Some(m) => {
                *m = m.offset(dx, dy);
                true
            }
            None => false,
        }
    }

    /// Remove one marker by index
    ///
    /// Returns false if the indices are out of bounds.
    pub fn remove_marker(&mut self, series: usize, marker: usize) -> bool {
        match self.series.get_mut(series) {
            Some(s) if marker < s.markers.len() => {
                s.markers.remove(marker);
                true
            }
            _ => false,
        }
    }

    /// Remove one series by index
    ///
    /// The sole remaining series is cleared instead of removed, preserving
    /// its style. The working index is clamped afterwards. Returns false if
    /// the index is out of bounds.
    pub fn remove_series(&mut self, index: usize) -> bool {
        if index >= self.series.len() {
            return false;
        }
        if self.series.len() == 1 {
            self.series[0].markers.clear();
        } else {
            self.series.remove(index);
            self.working = self.working.min(self.series.len() - 1);
        }
        true
    }
}

impl Default for SeriesStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_has_one_default_series() {
        let store = SeriesStore::new();
        assert_eq!(store.len(), 1);
        assert_eq!(store.working_index(), 0);
        assert!(store.working().is_empty());
        assert_eq!(store.working().marker_size(), DEFAULT_MARKER_SIZE);
        assert_eq!(store.working().marker_shape(), MarkerShape::Circle);
    }

    #[test]
    fn test_add_series_becomes_working() {
        let mut store = SeriesStore::new();
        store.add_marker(GlobalCoord::new(1.0, 2.0));
        store.add_series();
        assert_eq!(store.len(), 2);
        assert_eq!(store.working_index(), 1);
        assert!(store.working().is_empty());
    }

    #[test]
    fn test_cycling_working_series_wraps() {
        let mut store = SeriesStore::new();
        store.add_series();
        store.add_series();

        // Cycling forward as many times as there are series is the identity.
        let start = store.working_index();
        for _ in 0..store.len() {
            store.next_series();
        }
        assert_eq!(store.working_index(), start);

        store.reset_working();
        store.prev_series();
        assert_eq!(store.working_index(), store.len() - 1);
    }

    #[test]
    fn test_remove_last_marker_is_noop_when_empty() {
        let mut store = SeriesStore::new();
        store.remove_last_marker();
        assert!(store.working().is_empty());

        store.add_marker(GlobalCoord::new(3.0, 4.0));
        store.add_marker(GlobalCoord::new(5.0, 6.0));
        store.remove_last_marker();
        assert_eq!(store.working().markers(), &[GlobalCoord::new(3.0, 4.0)]);
    }

    #[test]
    fn test_marker_size_clamps_at_minimum() {
        let mut store = SeriesStore::new();
        store.adjust_marker_size(-100.0);
        assert_eq!(store.working().marker_size(), MIN_MARKER_SIZE);
        store.adjust_marker_size(2.0);
        assert_eq!(store.working().marker_size(), MIN_MARKER_SIZE + 2.0);
    }

    #[test]
    fn test_cycle_marker_shape() {
        let mut store = SeriesStore::new();
        store.cycle_marker_shape();
        assert_eq!(store.working().marker_shape(), MarkerShape::Square);
    }

    #[test]
    fn test_move_marker_bounds() {
        let mut store = SeriesStore::new();
        store.add_marker(GlobalCoord::new(10.0, 10.0));
        assert!(store.move_marker(0, 0, 1.0, -1.0));
        assert_eq!(store.working().markers()[0], GlobalCoord::new(11.0, 9.0));
        assert!(!store.move_marker(0, 1, 1.0, 0.0));
        assert!(!store.move_marker(5, 0, 1.0, 0.0));
    }

    #[test]
    fn test_remove_sole_series_clears_but_keeps_style() {
        let mut store = SeriesStore::new();
        store.adjust_marker_size(3.0);
        store.cycle_marker_shape();
        store.add_marker(GlobalCoord::new(1.0, 1.0));

        assert!(store.remove_series(0));
        assert_eq!(store.len(), 1);
        assert!(store.working().is_empty());
        assert_eq!(store.working().marker_size(), DEFAULT_MARKER_SIZE + 3.0);
        assert_eq!(store.working().marker_shape(), MarkerShape::Square);
    }

    #[test]
    fn test_remove_series_clamps_working_index() {
        let mut store = SeriesStore::new();
        store.add_series();
        store.add_series();
        assert_eq!(store.working_index(), 2);

        assert!(store.remove_series(2));
        assert_eq!(store.len(), 2);
        assert_eq!(store.working_index(), 1);
    }

    #[test]
    fn test_from_series_upholds_invariants() {
        let store = SeriesStore::from_series(Vec::new());
        assert_eq!(store.len(), 1);

        let mut undersized = Series::new();
        undersized.marker_size = 0.25;
        let store = SeriesStore::from_series(vec![undersized]);
        assert_eq!(store.all()[0].marker_size(), MIN_MARKER_SIZE);
        assert_eq!(store.working_index(), 0);
    }
}
