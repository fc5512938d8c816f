//! # PlotDig-RS: Interactive Plot Digitizer
//!
//! A tool for recovering numeric data series from chart images. The user
//! clicks markers onto the plotted curves, calibrates each axis with two
//! reference points, and exports the resolved values as delimited text.
//!
//! ## Architecture
//!
//! - **Session**: One image's complete digitizing state (view, series,
//!   calibration, edit cursor) driven by a mode-aware command dispatcher
//! - **Frontend**: Renders the canvas and decodes input using eframe/egui
//! - **Resolve/Export**: Pure mapping from marker coordinates to axis-space
//!   data values, written out one file per series
//! - **Persistence**: Versioned JSON sidecars next to the image
//!
//! ## Coordinate Spaces
//!
//! Three coordinate spaces flow through the crate:
//!
//! - **Screen**: integer window pixels, origin at the canvas top-left
//! - **Global**: image pixels independent of pan and zoom; markers and
//!   axis reference points live here
//! - **Data**: axis units after calibration; only produced by resolution
//!
//! ## Example
//!
//! ```ignore
//! use plotdig_rs::{Command, Flow, Session};
//! use plotdig_rs::types::ScreenPos;
//!
//! fn main() -> plotdig_rs::Result<()> {
//!     let mut session = Session::open("chart.png")?;
//!     session.apply(Command::PrimaryPress(ScreenPos::new(120, 340)))?;
//!     session.apply(Command::SaveSession)?;
//!     session.apply(Command::Export)?;
//!     Ok(())
//! }
//! ```

pub mod axes;
pub mod cursor;
pub mod error;
pub mod export;
pub mod frontend;
pub mod resolve;
pub mod series;
pub mod session;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use error::{PlotDigError, Result};
pub use frontend::PlotDigApp;
pub use session::{Command, Flow, Session, SessionSnapshot};
pub use types::{DataValue, GlobalCoord, MarkerShape, ScreenPos};
pub use view::ViewTransform;
