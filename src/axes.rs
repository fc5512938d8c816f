//! Axis calibration and the reference-point capture protocol
//!
//! To resolve markers into numeric values the digitizer needs to know where
//! two reference points of each plot axis sit on the image. The user supplies
//! them by clicking; this module owns both the committed calibration and the
//! in-flight capture state.
//!
//! # Main Types
//!
//! - [`AxisKind`] - Which axis is being calibrated (horizontal X or vertical Y)
//! - [`Axis`] - A committed pair of reference points in global coordinates
//! - [`AxisCalibration`] - The current horizontal and vertical axes
//! - [`AxisCapture`] - The two-press protocol that produces a new [`Axis`]
//!
//! # Capture Protocol
//!
//! Capturing an axis is a two-state protocol:
//!
//! 1. `AwaitingFirstPoint`: a primary press records the start point.
//! 2. `AwaitingSecondPoint`: a primary press completes the axis. The second
//!    point is forced into line with the first (same vertical coordinate for
//!    a horizontal axis, same horizontal coordinate for a vertical axis), so
//!    a committed axis is always perfectly axis-aligned. A secondary press
//!    discards the pending start point and returns to the first state.
//!
//! The calibration is only ever replaced whole, never one endpoint at a time.

use crate::types::GlobalCoord;
use serde::{Deserialize, Serialize};

/// Which plot axis a calibration or capture refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisKind {
    /// The X axis of the plot
    Horizontal,
    /// The Y axis of the plot
    Vertical,
}

impl AxisKind {
    /// Short label for banners and help text
    pub fn label(&self) -> &'static str {
        match self {
            AxisKind::Horizontal => "X",
            AxisKind::Vertical => "Y",
        }
    }

    /// Force `end` into line with `start` along this axis kind
    pub fn align(&self, start: GlobalCoord, end: GlobalCoord) -> GlobalCoord {
        match self {
            AxisKind::Horizontal => GlobalCoord::new(end.x, start.y),
            AxisKind::Vertical => GlobalCoord::new(start.x, end.y),
        }
    }
}

impl std::fmt::Display for AxisKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AxisKind::Horizontal => write!(f, "X axis"),
            AxisKind::Vertical => write!(f, "Y axis"),
        }
    }
}

/// A calibrated axis: two reference points in global coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub start: GlobalCoord,
    pub end: GlobalCoord,
}

impl Axis {
    /// Create a new axis from two reference points
    pub fn new(start: GlobalCoord, end: GlobalCoord) -> Self {
        Self { start, end }
    }

    /// Whether the endpoints satisfy the alignment invariant for `kind`
    pub fn is_aligned(&self, kind: AxisKind) -> bool {
        match kind {
            AxisKind::Horizontal => self.start.y == self.end.y,
            AxisKind::Vertical => self.start.x == self.end.x,
        }
    }

    /// Return a copy with the end point forced into line with the start
    pub fn realigned(&self, kind: AxisKind) -> Self {
        Self {
            start: self.start,
            end: kind.align(self.start, self.end),
        }
    }
}

/// The committed axis calibration of a session
///
/// Starts out with placeholder axes spanning 100 global units each, so a
/// session is resolvable before the user has calibrated anything.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisCalibration {
    pub horizontal: Axis,
    pub vertical: Axis,
}

impl AxisCalibration {
    /// The committed axis of the given kind
    pub fn axis(&self, kind: AxisKind) -> &Axis {
        match kind {
            AxisKind::Horizontal => &self.horizontal,
            AxisKind::Vertical => &self.vertical,
        }
    }

    /// Replace the axis of the given kind whole
    pub fn set_axis(&mut self, kind: AxisKind, axis: Axis) {
        match kind {
            AxisKind::Horizontal => self.horizontal = axis,
            AxisKind::Vertical => self.vertical = axis,
        }
    }

    /// Horizontal span between the X reference points, in global units
    pub fn x_span(&self) -> f64 {
        self.horizontal.end.x - self.horizontal.start.x
    }

    /// Vertical span between the Y reference points, in global units
    pub fn y_span(&self) -> f64 {
        self.vertical.end.y - self.vertical.start.y
    }
}

impl Default for AxisCalibration {
    fn default() -> Self {
        Self {
            horizontal: Axis::new(GlobalCoord::new(0.0, 0.0), GlobalCoord::new(100.0, 0.0)),
            vertical: Axis::new(GlobalCoord::new(0.0, 100.0), GlobalCoord::new(0.0, 0.0)),
        }
    }
}

/// Phase of an in-flight axis capture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CapturePhase {
    /// Waiting for the first reference point
    AwaitingFirstPoint,
    /// First point recorded, waiting for the second
    AwaitingSecondPoint { start: GlobalCoord },
}

/// In-flight capture of one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisCapture {
    kind: AxisKind,
    phase: CapturePhase,
}

impl AxisCapture {
    /// Begin capturing the given axis
    pub fn new(kind: AxisKind) -> Self {
        Self {
            kind,
            phase: CapturePhase::AwaitingFirstPoint,
        }
    }

    /// The axis being captured
    pub fn kind(&self) -> AxisKind {
        self.kind
    }

    /// Current protocol phase
    pub fn phase(&self) -> &CapturePhase {
        &self.phase
    }

    /// The pending start point, if the first press has happened
    pub fn pending_start(&self) -> Option<GlobalCoord> {
        match self.phase {
            CapturePhase::AwaitingFirstPoint => None,
            CapturePhase::AwaitingSecondPoint { start } => Some(start),
        }
    }

    /// Feed a primary press; returns the completed axis when the second
    /// reference point lands
    pub fn press_primary(&mut self, point: GlobalCoord) -> Option<Axis> {
        match self.phase {
            CapturePhase::AwaitingFirstPoint => {
                self.phase = CapturePhase::AwaitingSecondPoint { start: point };
                None
            }
            CapturePhase::AwaitingSecondPoint { start } => {
                self.phase = CapturePhase::AwaitingFirstPoint;
                Some(Axis::new(start, self.kind.align(start, point)))
            }
        }
    }

    /// Feed a secondary press: discard a pending start point
    pub fn press_secondary(&mut self) {
        self.phase = CapturePhase::AwaitingFirstPoint;
    }
}
