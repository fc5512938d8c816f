//! View transform between window pixels and image space
//!
//! The digitizer draws the plot image under a pan/zoom view. [`ViewTransform`]
//! owns that view and converts between the two spaces:
//!
//! ```text
//! screen = global * zoom - pan
//! global = (screen + pan) / zoom
//! ```
//!
//! Both projections truncate toward zero so that a marker always lands on a
//! whole pixel. Zoom is clamped to be non-negative; zoom 0 is a legal but
//! degenerate view in which every global point projects onto the pan origin,
//! so the inverse projection must not be used there.

use crate::types::{GlobalCoord, ScreenPos};

/// View pan distance for one arrow-key press, in global units
pub const PAN_STEP: f64 = 100.0;

/// Zoom change for one scroll step
pub const ZOOM_STEP: f64 = 0.1;

/// Pan/zoom mapping between screen positions and global coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Magnification applied to global coordinates; always >= 0
    zoom: f64,
    /// Offset of the view origin, subtracted after zooming
    pan: GlobalCoord,
}

impl ViewTransform {
    /// Create the identity view: zoom 1, no pan
    pub fn new() -> Self {
        Self {
            zoom: 1.0,
            pan: GlobalCoord::default(),
        }
    }

    /// Create a view with the given zoom factor (clamped to >= 0)
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom.max(0.0);
        self
    }

    /// Create a view with the given pan offset
    pub fn with_pan(mut self, pan: GlobalCoord) -> Self {
        self.pan = pan;
        self
    }

    /// Current zoom factor
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Current pan offset
    pub fn pan_offset(&self) -> GlobalCoord {
        self.pan
    }

    /// Project a global coordinate onto the screen
    pub fn to_screen(&self, global: GlobalCoord) -> ScreenPos {
        ScreenPos::new(
            (global.x * self.zoom - self.pan.x) as i32,
            (global.y * self.zoom - self.pan.y) as i32,
        )
    }

    /// Project a screen position back into global space
    ///
    /// The result is truncated toward zero to a whole global unit. The caller
    /// must ensure `zoom > 0`; at zoom 0 no inverse exists.
    pub fn to_global(&self, screen: ScreenPos) -> GlobalCoord {
        GlobalCoord::new(
            ((screen.x as f64 + self.pan.x) / self.zoom).trunc(),
            ((screen.y as f64 + self.pan.y) / self.zoom).trunc(),
        )
    }

    /// Shift the view by the given pan deltas
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan.x += dx;
        self.pan.y += dy;
    }

    /// Adjust the zoom factor by a delta, clamping the result to >= 0
    pub fn zoom_by(&mut self, delta: f64) {
        self.zoom = (self.zoom + delta).max(0.0);
    }

    /// Restore the identity view
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identity_view_is_exact() {
        let view = ViewTransform::new();
        let g = GlobalCoord::new(123.0, -45.0);
        assert_eq!(view.to_screen(g), ScreenPos::new(123, -45));
        assert_eq!(view.to_global(ScreenPos::new(123, -45)), g);
    }

    #[test]
    fn test_known_projection() {
        let view = ViewTransform::new()
            .with_zoom(2.0)
            .with_pan(GlobalCoord::new(10.0, 20.0));
        let screen = view.to_screen(GlobalCoord::new(30.0, 40.0));
        assert_eq!(screen, ScreenPos::new(50, 60));
        assert_eq!(view.to_global(screen), GlobalCoord::new(30.0, 40.0));
    }

    #[test]
    fn test_projection_truncates_toward_zero() {
        let view = ViewTransform::new().with_zoom(0.3);
        assert_eq!(view.to_screen(GlobalCoord::new(7.0, 7.0)), ScreenPos::new(2, 2));
        assert_eq!(
            view.to_screen(GlobalCoord::new(-7.0, -7.0)),
            ScreenPos::new(-2, -2)
        );
    }

    #[test]
    fn test_zoom_clamps_at_zero() {
        let mut view = ViewTransform::new();
        view.zoom_by(-5.0);
        assert_eq!(view.zoom(), 0.0);
        view.zoom_by(ZOOM_STEP);
        assert!((view.zoom() - ZOOM_STEP).abs() < 1e-12);
    }

    #[test]
    fn test_zoom_zero_collapses_projection() {
        let view = ViewTransform::new()
            .with_zoom(0.0)
            .with_pan(GlobalCoord::new(3.0, 4.0));
        assert_eq!(view.to_screen(GlobalCoord::new(100.0, 200.0)), ScreenPos::new(-3, -4));
        assert_eq!(view.to_screen(GlobalCoord::new(-9.0, 1.0)), ScreenPos::new(-3, -4));
    }

    #[test]
    fn test_pan_accumulates_and_reset_restores_identity() {
        let mut view = ViewTransform::new();
        view.pan_by(100.0, -50.0);
        view.pan_by(25.0, 25.0);
        assert_eq!(view.pan_offset(), GlobalCoord::new(125.0, -25.0));
        view.zoom_by(1.5);
        view.reset();
        assert_eq!(view, ViewTransform::new());
    }

    proptest! {
        // Projecting an integer global coordinate to the screen and back may
        // lose at most one unit per component as long as zoom >= 1.
        #[test]
        fn test_round_trip_within_one_unit(
            gx in -2000i32..2000,
            gy in -2000i32..2000,
            zoom in 1.0f64..8.0,
            pan_x in -500.0f64..500.0,
            pan_y in -500.0f64..500.0,
        ) {
            let view = ViewTransform::new()
                .with_zoom(zoom)
                .with_pan(GlobalCoord::new(pan_x, pan_y));
            let g = GlobalCoord::new(f64::from(gx), f64::from(gy));
            let back = view.to_global(view.to_screen(g));
            prop_assert!((back.x - g.x).abs() <= 1.0);
            prop_assert!((back.y - g.y).abs() <= 1.0);
        }
    }
}
