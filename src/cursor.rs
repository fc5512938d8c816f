//! Interaction modes and the edit cursor
//!
//! The digitizer is modal: markers are placed in Normal mode, adjusted in
//! Edit mode, and axis reference points are captured in a dedicated capture
//! mode. [`Mode`] is the tagged state of that machine; the capture variant
//! carries its own [`AxisCapture`] sub-state so a half-entered capture cannot
//! exist outside capture mode.
//!
//! [`EditCursor`] combines the mode with the Edit-mode selection, a
//! `(series, marker)` index pair. The selection survives mode changes and is
//! re-clamped into bounds on Edit entry and whenever the store shrinks
//! underneath it. All relative navigation wraps around.

use crate::axes::{AxisCapture, AxisKind};
use crate::series::SeriesStore;

/// Fine navigation step
pub const FINE_STEP: usize = 1;

/// Coarse navigation step, selected by the coarse modifier
pub const COARSE_STEP: usize = 10;

/// The interaction mode of a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    /// Placing markers and adjusting the view
    Normal,
    /// Navigating and adjusting already-placed markers
    Edit,
    /// Capturing axis reference points
    AxisCapture(AxisCapture),
}

impl Mode {
    /// Banner text for the mode indicator
    pub fn display_name(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Edit => "EDIT",
            Mode::AxisCapture(capture) => match capture.kind() {
                AxisKind::Horizontal => "X AXIS",
                AxisKind::Vertical => "Y AXIS",
            },
        }
    }

    /// Whether this is Normal mode
    pub fn is_normal(&self) -> bool {
        matches!(self, Mode::Normal)
    }

    /// Whether this is Edit mode
    pub fn is_edit(&self) -> bool {
        matches!(self, Mode::Edit)
    }
}

/// Mode plus the Edit-mode selection
#[derive(Debug, Clone, PartialEq)]
pub struct EditCursor {
    mode: Mode,
    series_index: usize,
    marker_index: usize,
}

impl EditCursor {
    /// Create a cursor in Normal mode selecting the first marker of the
    /// first series
    pub fn new() -> Self {
        Self {
            mode: Mode::Normal,
            series_index: 0,
            marker_index: 0,
        }
    }

    /// Current mode
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// The in-flight axis capture, when in capture mode
    pub fn capture(&self) -> Option<&AxisCapture> {
        match &self.mode {
            Mode::AxisCapture(capture) => Some(capture),
            _ => None,
        }
    }

    /// Mutable access to the in-flight axis capture
    pub fn capture_mut(&mut self) -> Option<&mut AxisCapture> {
        match &mut self.mode {
            Mode::AxisCapture(capture) => Some(capture),
            _ => None,
        }
    }

    /// The selected (series, marker) index pair
    pub fn selection(&self) -> (usize, usize) {
        (self.series_index, self.marker_index)
    }

    /// Index of the selected series
    pub fn series_index(&self) -> usize {
        self.series_index
    }

    /// Index of the selected marker within the selected series
    pub fn marker_index(&self) -> usize {
        self.marker_index
    }

    /// Switch to Edit mode, clamping the selection into bounds
    pub fn enter_edit(&mut self, store: &SeriesStore) {
        self.mode = Mode::Edit;
        self.clamp(store);
    }

    /// Switch back to Normal mode
    pub fn leave_edit(&mut self) {
        self.mode = Mode::Normal;
    }

    /// Switch to capture mode for the given axis
    pub fn begin_capture(&mut self, kind: AxisKind) {
        self.mode = Mode::AxisCapture(AxisCapture::new(kind));
    }

    /// Leave capture mode after an axis committed
    pub fn finish_capture(&mut self) {
        self.mode = Mode::Normal;
    }

    /// Clamp the selection into the bounds of the store
    ///
    /// An empty selected series leaves the marker index at 0.
    pub fn clamp(&mut self, store: &SeriesStore) {
        self.series_index = self.series_index.min(store.len() - 1);
        let markers = store.all()[self.series_index].len();
        self.marker_index = if markers == 0 {
            0
        } else {
            self.marker_index.min(markers - 1)
        };
    }

    /// Select a later marker in the current series, wrapping around
    ///
    /// No-op when the series is empty.
    pub fn next_marker(&mut self, store: &SeriesStore, step: usize) {
        let markers = store.all()[self.series_index].len();
        if markers > 0 {
            self.marker_index = (self.marker_index + step) % markers;
        }
    }

    /// Select an earlier marker in the current series, wrapping around
    pub fn prev_marker(&mut self, store: &SeriesStore, step: usize) {
        let markers = store.all()[self.series_index].len();
        if markers > 0 {
            self.marker_index = (self.marker_index + markers - step % markers) % markers;
        }
    }

    /// Select a later series, wrapping around; resets the marker index
    pub fn next_series(&mut self, store: &SeriesStore, step: usize) {
        self.series_index = (self.series_index + step) % store.len();
        self.marker_index = 0;
    }

    /// Select an earlier series, wrapping around; resets the marker index
    pub fn prev_series(&mut self, store: &SeriesStore, step: usize) {
        let count = store.len();
        self.series_index = (self.series_index + count - step % count) % count;
        self.marker_index = 0;
    }

    /// Select the first marker of the current series
    pub fn first_marker(&mut self) {
        self.marker_index = 0;
    }

    /// Select the last marker of the current series (0 when empty)
    pub fn last_marker(&mut self, store: &SeriesStore) {
        let markers = store.all()[self.series_index].len();
        self.marker_index = markers.saturating_sub(1);
    }

    /// Select the first series, clamping the marker index into it
    pub fn first_series(&mut self, store: &SeriesStore) {
        self.series_index = 0;
        self.clamp(store);
    }

    /// Select the last series, clamping the marker index into it
    pub fn last_series(&mut self, store: &SeriesStore) {
        self.series_index = store.len() - 1;
        self.clamp(store);
    }

    /// Step the marker index back after a deletion, then clamp
    ///
    /// The selection lands on the previous marker, or 0 when the deleted
    /// marker was the first.
    pub fn retreat_marker(&mut self, store: &SeriesStore) {
        self.marker_index = self.marker_index.saturating_sub(1);
        self.clamp(store);
    }

    /// Step the series index back after a series deletion, then clamp
    ///
    /// The selection lands on the previous series (or stays at 0) with its
    /// first marker selected.
    pub fn retreat_series(&mut self, store: &SeriesStore) {
        self.series_index = self.series_index.saturating_sub(1);
        self.marker_index = 0;
        self.clamp(store);
    }
}

impl Default for EditCursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GlobalCoord;

    fn store_with(series_sizes: &[usize]) -> SeriesStore {
        let mut store = SeriesStore::new();
        for (i, &markers) in series_sizes.iter().enumerate() {
            if i > 0 {
                store.add_series();
            }
            for m in 0..markers {
                store.add_marker(GlobalCoord::new(m as f64, m as f64));
            }
        }
        store
    }

    #[test]
    fn test_initial_state() {
        let cursor = EditCursor::new();
        assert!(cursor.mode().is_normal());
        assert_eq!(cursor.selection(), (0, 0));
    }

    #[test]
    fn test_mode_display_names() {
        assert_eq!(Mode::Normal.display_name(), "NORMAL");
        assert_eq!(Mode::Edit.display_name(), "EDIT");
        let capture = Mode::AxisCapture(AxisCapture::new(AxisKind::Vertical));
        assert_eq!(capture.display_name(), "Y AXIS");
    }

    #[test]
    fn test_marker_navigation_wraps() {
        let store = store_with(&[3]);
        let mut cursor = EditCursor::new();
        cursor.enter_edit(&store);

        cursor.next_marker(&store, FINE_STEP);
        cursor.next_marker(&store, FINE_STEP);
        assert_eq!(cursor.marker_index(), 2);
        cursor.next_marker(&store, FINE_STEP);
        assert_eq!(cursor.marker_index(), 0);

        cursor.prev_marker(&store, FINE_STEP);
        assert_eq!(cursor.marker_index(), 2);
    }

    #[test]
    fn test_coarse_steps_are_modular() {
        let store = store_with(&[3]);
        let mut cursor = EditCursor::new();
        cursor.enter_edit(&store);

        // 10 mod 3 leaves a net step of 1 in either direction.
        cursor.next_marker(&store, COARSE_STEP);
        assert_eq!(cursor.marker_index(), 1);
        cursor.prev_marker(&store, COARSE_STEP);
        assert_eq!(cursor.marker_index(), 0);
    }

    #[test]
    fn test_series_navigation_resets_marker() {
        let store = store_with(&[3, 2]);
        let mut cursor = EditCursor::new();
        cursor.enter_edit(&store);
        cursor.last_marker(&store);
        assert_eq!(cursor.marker_index(), 2);

        cursor.next_series(&store, FINE_STEP);
        assert_eq!(cursor.selection(), (1, 0));

        cursor.prev_series(&store, FINE_STEP);
        assert_eq!(cursor.selection(), (0, 0));

        // Wrapping backward from the first series lands on the last.
        cursor.prev_series(&store, FINE_STEP);
        assert_eq!(cursor.series_index(), 1);
    }

    #[test]
    fn test_navigation_on_empty_series_keeps_zero() {
        let store = store_with(&[0]);
        let mut cursor = EditCursor::new();
        cursor.enter_edit(&store);

        cursor.next_marker(&store, FINE_STEP);
        cursor.prev_marker(&store, COARSE_STEP);
        cursor.last_marker(&store);
        assert_eq!(cursor.marker_index(), 0);
    }

    #[test]
    fn test_enter_edit_clamps_stale_selection() {
        let mut store = store_with(&[3]);
        let mut cursor = EditCursor::new();
        cursor.enter_edit(&store);
        cursor.last_marker(&store);
        cursor.leave_edit();

        store.remove_last_marker();
        store.remove_last_marker();
        cursor.enter_edit(&store);
        assert_eq!(cursor.marker_index(), 0);
    }

    #[test]
    fn test_series_jumps_clamp_marker() {
        let store = store_with(&[1, 5]);
        let mut cursor = EditCursor::new();
        cursor.enter_edit(&store);
        cursor.last_series(&store);
        cursor.last_marker(&store);
        assert_eq!(cursor.selection(), (1, 4));

        cursor.first_series(&store);
        assert_eq!(cursor.selection(), (0, 0));
    }

    #[test]
    fn test_retreat_marker_lands_on_previous_or_zero() {
        let mut store = store_with(&[3]);
        let mut cursor = EditCursor::new();
        cursor.enter_edit(&store);
        cursor.last_marker(&store);

        store.remove_marker(0, 2);
        cursor.retreat_marker(&store);
        assert_eq!(cursor.marker_index(), 1);

        store.remove_marker(0, 0);
        cursor.retreat_marker(&store);
        assert_eq!(cursor.marker_index(), 0);
    }

    #[test]
    fn test_retreat_series_lands_on_previous_or_zero() {
        let mut store = store_with(&[2, 2, 2]);
        let mut cursor = EditCursor::new();
        cursor.enter_edit(&store);
        cursor.next_series(&store, 2);
        assert_eq!(cursor.series_index(), 2);

        store.remove_series(2);
        cursor.retreat_series(&store);
        assert_eq!(cursor.selection(), (1, 0));

        store.remove_series(0);
        cursor.retreat_series(&store);
        assert_eq!(cursor.selection(), (0, 0));
    }

    #[test]
    fn test_capture_round_trip() {
        let mut cursor = EditCursor::new();
        cursor.begin_capture(AxisKind::Horizontal);
        assert!(cursor.capture().is_some());
        assert_eq!(cursor.mode().display_name(), "X AXIS");

        cursor.finish_capture();
        assert!(cursor.mode().is_normal());
        assert!(cursor.capture().is_none());
    }
}
