//! Digitizing sessions and command dispatch
//!
//! A [`Session`] is the complete interactive state for one image: the view
//! transform, the series store, the axis calibration, the edit cursor and
//! the help flag. Nothing else holds digitizing state; the presentation
//! layer owns a session, feeds it decoded [`Command`]s and draws whatever
//! the accessors expose.
//!
//! # Architecture
//!
//! - [`Command`] - decoded input gestures (pointer, wheel, keys)
//! - [`Session::apply`] - central dispatch, interpreting commands by mode
//! - [`SessionSnapshot`] - the versioned sidecar record for persistence
//!
//! Dispatch is mode-first: Normal mode places markers and drives the view,
//! Edit mode navigates and mutates existing markers, capture mode routes
//! presses into the axis capture protocol while keeping the view alive.
//! Commands without a meaning in the current mode are ignored. Every store
//! mutation is followed by a cursor re-clamp so the Edit selection can never
//! dangle.

mod command;
mod snapshot;

pub use command::{Command, Direction, Flow};
pub use snapshot::{SessionSnapshot, SIDECAR_EXTENSION, SNAPSHOT_VERSION};

use crate::axes::AxisCalibration;
use crate::cursor::{EditCursor, Mode, COARSE_STEP, FINE_STEP};
use crate::error::Result;
use crate::export;
use crate::resolve;
use crate::series::SeriesStore;
use crate::types::{GlobalCoord, ScreenPos};
use crate::view::{ViewTransform, PAN_STEP, ZOOM_STEP};
use std::path::{Path, PathBuf};

/// The complete interactive state for digitizing one image
#[derive(Debug)]
pub struct Session {
    image_path: PathBuf,
    view: ViewTransform,
    store: SeriesStore,
    axes: AxisCalibration,
    cursor: EditCursor,
    help_visible: bool,
}

impl Session {
    /// Start a fresh session for an image
    pub fn new(image_path: impl Into<PathBuf>) -> Self {
        Self {
            image_path: image_path.into(),
            view: ViewTransform::new(),
            store: SeriesStore::new(),
            axes: AxisCalibration::default(),
            cursor: EditCursor::new(),
            help_visible: true,
        }
    }

    /// Open a session for an image, restoring its sidecar when one exists
    ///
    /// Restoring resets transient interaction state: the working series and
    /// the Edit selection start at 0 regardless of what was saved.
    pub fn open(image_path: impl Into<PathBuf>) -> Result<Self> {
        let mut session = Self::new(image_path);
        if let Some(snapshot) = SessionSnapshot::load(&session.image_path)? {
            let (store, axes) = snapshot.into_state();
            session.store = store;
            session.axes = axes;
        }
        Ok(session)
    }

    /// The image this session digitizes
    pub fn image_path(&self) -> &Path {
        &self.image_path
    }

    /// Current view transform
    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    /// The series store
    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    /// The committed axis calibration
    pub fn axes(&self) -> &AxisCalibration {
        &self.axes
    }

    /// The edit cursor (mode plus selection)
    pub fn cursor(&self) -> &EditCursor {
        &self.cursor
    }

    /// Current interaction mode
    pub fn mode(&self) -> &Mode {
        self.cursor.mode()
    }

    /// Whether the help overlay is shown
    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    /// Persist the current state to the sidecar file
    pub fn save(&self) -> Result<PathBuf> {
        SessionSnapshot::capture(&self.store, &self.axes).save(&self.image_path)
    }

    /// Resolve every series and write the export files
    pub fn export(&self) -> Result<Vec<PathBuf>> {
        let resolved = resolve::resolve_store(&self.store, &self.axes, self.view.zoom())?;
        export::write_all(&self.image_path, &resolved)
    }

    /// Apply one command to the session
    ///
    /// Errors from saving or exporting surface to the caller; the in-memory
    /// state is unchanged by a failed command and stays usable.
    pub fn apply(&mut self, command: Command) -> Result<Flow> {
        match *self.cursor.mode() {
            Mode::Normal => self.apply_normal(command),
            Mode::Edit => self.apply_edit(command),
            Mode::AxisCapture(_) => self.apply_capture(command),
        }
    }

    fn apply_normal(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::PrimaryPress(pos) => {
                if let Some(point) = self.press_point(pos) {
                    self.store.add_marker(point);
                    self.cursor.clamp(&self.store);
                    tracing::debug!("Placed marker at {}", point);
                }
            }
            Command::SecondaryPress => {
                self.store.remove_last_marker();
                self.cursor.clamp(&self.store);
            }
            Command::Scroll { steps, zoom: true } => self.view.zoom_by(steps * ZOOM_STEP),
            Command::Scroll { steps, zoom: false } => self.store.adjust_marker_size(steps),
            Command::Arrow { direction, .. } => self.pan(direction),
            Command::EnterEdit => self.cursor.enter_edit(&self.store),
            Command::NewSeries => self.store.add_series(),
            Command::NextSeries => self.store.next_series(),
            Command::PrevSeries => self.store.prev_series(),
            Command::CycleShape => self.store.cycle_marker_shape(),
            Command::ResetView => self.view.reset(),
            Command::CaptureAxis(kind) => self.cursor.begin_capture(kind),
            Command::SaveSession => {
                self.save()?;
            }
            Command::Export => {
                self.export()?;
            }
            Command::ToggleHelp => self.help_visible = !self.help_visible,
            Command::Quit => return Ok(Flow::EndSession),
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn apply_edit(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::LeaveEdit => {
                self.cursor.leave_edit();
                self.store.reset_working();
            }
            Command::Arrow { direction, coarse } => {
                let step = if coarse { COARSE_STEP } else { FINE_STEP };
                match direction {
                    Direction::Up => self.cursor.prev_series(&self.store, step),
                    Direction::Down => self.cursor.next_series(&self.store, step),
                    Direction::Left => self.cursor.prev_marker(&self.store, step),
                    Direction::Right => self.cursor.next_marker(&self.store, step),
                }
            }
            Command::First { series: true } => self.cursor.first_series(&self.store),
            Command::First { series: false } => self.cursor.first_marker(),
            Command::Last { series: true } => self.cursor.last_series(&self.store),
            Command::Last { series: false } => self.cursor.last_marker(&self.store),
            Command::Nudge(direction) => {
                let (series, marker) = self.cursor.selection();
                let (dx, dy) = direction.deltas();
                self.store.move_marker(series, marker, dx, dy);
            }
            Command::DeleteMarker => {
                let (series, marker) = self.cursor.selection();
                if self.store.remove_marker(series, marker) {
                    self.cursor.retreat_marker(&self.store);
                }
            }
            Command::DeleteSeries => {
                let (series, _) = self.cursor.selection();
                self.store.remove_series(series);
                self.cursor.retreat_series(&self.store);
            }
            Command::Scroll { steps, zoom: true } => self.view.zoom_by(steps * ZOOM_STEP),
            Command::ToggleHelp => self.help_visible = !self.help_visible,
            Command::Quit => return Ok(Flow::EndSession),
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn apply_capture(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::PrimaryPress(pos) => {
                if let Some(point) = self.press_point(pos) {
                    let committed = self.cursor.capture_mut().and_then(|capture| {
                        capture
                            .press_primary(point)
                            .map(|axis| (capture.kind(), axis))
                    });
                    if let Some((kind, axis)) = committed {
                        self.axes.set_axis(kind, axis);
                        self.cursor.finish_capture();
                        tracing::info!(
                            "Calibrated {} from {} to {}",
                            kind,
                            axis.start,
                            axis.end
                        );
                    }
                }
            }
            Command::SecondaryPress => {
                if let Some(capture) = self.cursor.capture_mut() {
                    capture.press_secondary();
                }
            }
            Command::Scroll { steps, zoom: true } => self.view.zoom_by(steps * ZOOM_STEP),
            Command::Arrow { direction, .. } => self.pan(direction),
            Command::ResetView => self.view.reset(),
            Command::Quit => return Ok(Flow::EndSession),
            _ => {}
        }
        Ok(Flow::Continue)
    }

    /// Convert a press position into global coordinates, unless the view is
    /// degenerate
    fn press_point(&self, pos: ScreenPos) -> Option<GlobalCoord> {
        if self.view.zoom() > 0.0 {
            Some(self.view.to_global(pos))
        } else {
            tracing::warn!("Ignoring press at zoom 0");
            None
        }
    }

    fn pan(&mut self, direction: Direction) {
        let step = PAN_STEP * self.view.zoom();
        let (dx, dy) = direction.deltas();
        self.view.pan_by(dx * step, dy * step);
    }
}
