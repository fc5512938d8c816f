//! Core data types for plotdig-rs
//!
//! This module contains the fundamental data structures shared across the
//! digitizer: the coordinate-space vocabulary and the resolved data record.
//!
//! # Main Types
//!
//! - [`ScreenPos`] - Integer pixel position in the window
//! - [`GlobalCoord`] - Position in the plot image's own pixel space
//! - [`DataValue`] - A resolved numeric record in the plot's axis units
//! - [`MarkerShape`] - The shapes a series can draw its markers with
//!
//! # Coordinate Spaces
//!
//! Three coordinate spaces exist and must not be confused:
//!
//! - **Screen position**: where something lands in the window, in integer
//!   pixels. Depends on the current pan and zoom.
//! - **Global coordinate**: where something sits on the image itself,
//!   independent of pan and zoom. Markers and axis calibration points are
//!   stored in this space.
//! - **Data value**: the final numeric value in the plot's axis units,
//!   produced by resolving global coordinates against the axis calibration.
//!
//! [`crate::view::ViewTransform`] converts between the first two;
//! [`crate::resolve`] converts from the second to the third.

use serde::{Deserialize, Serialize};

/// A position in the plot image's own pixel space, independent of the view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct GlobalCoord {
    pub x: f64,
    pub y: f64,
}

impl GlobalCoord {
    /// Create a new global coordinate
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Return this coordinate shifted by the given deltas
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl std::fmt::Display for GlobalCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An integer pixel position in the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenPos {
    pub x: i32,
    pub y: i32,
}

impl ScreenPos {
    /// Create a new screen position
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Shape used to draw the markers of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MarkerShape {
    /// Filled circle (default)
    #[default]
    Circle,
    /// Axis-aligned filled square
    Square,
    /// Square rotated 45 degrees
    Rhombus,
    /// Triangle pointing up
    Triangle,
    /// Triangle pointing down
    TriangleInverted,
}

impl MarkerShape {
    /// Get all available marker shapes
    pub fn all() -> &'static [MarkerShape] {
        &[
            MarkerShape::Circle,
            MarkerShape::Square,
            MarkerShape::Rhombus,
            MarkerShape::Triangle,
            MarkerShape::TriangleInverted,
        ]
    }

    /// Get display name for this marker shape
    pub fn display_name(&self) -> &'static str {
        match self {
            MarkerShape::Circle => "Circle",
            MarkerShape::Square => "Square",
            MarkerShape::Rhombus => "Rhombus",
            MarkerShape::Triangle => "Triangle",
            MarkerShape::TriangleInverted => "Inverted triangle",
        }
    }

    /// Get the next marker shape (for cycling)
    pub fn next(&self) -> MarkerShape {
        match self {
            MarkerShape::Circle => MarkerShape::Square,
            MarkerShape::Square => MarkerShape::Rhombus,
            MarkerShape::Rhombus => MarkerShape::Triangle,
            MarkerShape::Triangle => MarkerShape::TriangleInverted,
            MarkerShape::TriangleInverted => MarkerShape::Circle,
        }
    }
}

/// A marker resolved into the plot's axis units
///
/// The uncertainties estimate how precisely the marker covers the underlying
/// data point: the marker's on-screen radius converted into axis units. Their
/// sign follows the sign of the axis span used to resolve them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataValue {
    pub x: f64,
    pub x_uncertainty: f64,
    pub y: f64,
    pub y_uncertainty: f64,
}

impl DataValue {
    /// Create a new resolved record
    pub fn new(x: f64, x_uncertainty: f64, y: f64, y_uncertainty: f64) -> Self {
        Self {
            x,
            x_uncertainty,
            y,
            y_uncertainty,
        }
    }
}
