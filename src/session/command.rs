//! The command surface of a digitizing session
//!
//! The presentation layer decodes raw input (pointer, wheel, keyboard) into
//! [`Command`] values; [`crate::session::Session::apply`] interprets them
//! according to the current mode. A command with no meaning in the current
//! mode is ignored, so the decoder never needs to know the mode for anything
//! but key collisions.

use crate::axes::AxisKind;
use crate::types::ScreenPos;

/// A cardinal direction from the arrow or nudge keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit deltas `(dx, dy)` in image orientation, where y grows downward
    pub fn deltas(&self) -> (f64, f64) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }
}

/// One decoded input gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Primary pointer press at a screen position: place a marker in Normal
    /// mode, feed the capture protocol in capture mode
    PrimaryPress(ScreenPos),
    /// Secondary pointer press: remove the last marker in Normal mode,
    /// discard the pending capture point in capture mode
    SecondaryPress,
    /// Wheel movement; `zoom` is set when the zoom modifier is held
    Scroll { steps: f64, zoom: bool },
    /// Arrow key: pan in Normal and capture modes, navigate in Edit mode;
    /// `coarse` selects the wide Edit-mode step
    Arrow { direction: Direction, coarse: bool },
    /// Jump to the first marker, or the first series when `series` is set
    /// (Edit mode)
    First { series: bool },
    /// Jump to the last marker, or the last series when `series` is set
    /// (Edit mode)
    Last { series: bool },
    /// Move the selected marker one global unit (Edit mode)
    Nudge(Direction),
    /// Switch to Edit mode
    EnterEdit,
    /// Switch back to Normal mode, resetting the working series
    LeaveEdit,
    /// Append a new empty series and make it the working series
    NewSeries,
    /// Cycle the working series forward
    NextSeries,
    /// Cycle the working series backward
    PrevSeries,
    /// Cycle the working series' marker shape
    CycleShape,
    /// Delete the selected marker (Edit mode)
    DeleteMarker,
    /// Delete the selected series (Edit mode)
    DeleteSeries,
    /// Restore the identity view
    ResetView,
    /// Persist the session to its sidecar file
    SaveSession,
    /// Resolve all series and write the export files
    Export,
    /// Show or hide the help overlay
    ToggleHelp,
    /// Begin capturing an axis (Normal mode)
    CaptureAxis(AxisKind),
    /// End this session; in capture mode this aborts the capture too
    Quit,
}

/// What the caller should do after a command was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep the session running
    Continue,
    /// The session is over; move on to the next image or exit
    EndSession,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_deltas_follow_screen_orientation() {
        assert_eq!(Direction::Up.deltas(), (0.0, -1.0));
        assert_eq!(Direction::Down.deltas(), (0.0, 1.0));
        assert_eq!(Direction::Left.deltas(), (-1.0, 0.0));
        assert_eq!(Direction::Right.deltas(), (1.0, 0.0));
    }
}
