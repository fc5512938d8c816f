//! Resolution of markers into plot axis units
//!
//! A marker stores *where on the image* a data point sits; resolution turns
//! that into *what value the plot assigns it* using the axis calibration.
//! Values are expressed as the fraction of the calibrated span, so a marker
//! halfway between the X reference points resolves to 0.5:
//!
//! ```text
//! x = (m.x - xs.x) / (xe.x - xs.x)
//! y = (m.y - ys.y) / (ye.y - ys.y)
//! ```
//!
//! Each record also carries an uncertainty: the marker's on-screen radius
//! `max(1, size * zoom)` converted into axis units by the same span. The
//! vertical uncertainty is negated to compensate for the screen's
//! downward-increasing vertical axis; both uncertainties inherit the sign of
//! their axis span.
//!
//! A zero span makes resolution impossible and is reported as a
//! [`PlotDigError::DegenerateCalibration`] naming the offending axis. The
//! guard runs before any division, so resolution never produces infinities
//! or NaN from the calibration.

use crate::axes::{AxisCalibration, AxisKind};
use crate::error::{PlotDigError, Result};
use crate::series::{Series, SeriesStore};
use crate::types::DataValue;

/// Resolve one series against the calibration
///
/// `zoom` is the view zoom the markers were placed under; it only affects
/// the uncertainties. Pass 1.0 for zoom-independent uncertainties. Marker
/// order is preserved.
pub fn resolve_series(
    series: &Series,
    axes: &AxisCalibration,
    zoom: f64,
) -> Result<Vec<DataValue>> {
    let x_span = axes.x_span();
    if x_span == 0.0 {
        return Err(PlotDigError::DegenerateCalibration {
            axis: AxisKind::Horizontal,
        });
    }
    let y_span = axes.y_span();
    if y_span == 0.0 {
        return Err(PlotDigError::DegenerateCalibration {
            axis: AxisKind::Vertical,
        });
    }

    let radius = (series.marker_size() * zoom).max(1.0);
    let x_start = axes.horizontal.start.x;
    let y_start = axes.vertical.start.y;

    Ok(series
        .markers()
        .iter()
        .map(|m| {
            DataValue::new(
                (m.x - x_start) / x_span,
                radius / x_span,
                (m.y - y_start) / y_span,
                -radius / y_span,
            )
        })
        .collect())
}

/// Resolve every series of the store, preserving series order
pub fn resolve_store(
    store: &SeriesStore,
    axes: &AxisCalibration,
    zoom: f64,
) -> Result<Vec<Vec<DataValue>>> {
    store
        .all()
        .iter()
        .map(|series| resolve_series(series, axes, zoom))
        .collect()
}
