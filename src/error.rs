//! Error handling for the plotdig-rs application
//!
//! This module defines custom error types and a Result alias for use
//! throughout the application.

use crate::axes::AxisKind;
use thiserror::Error;

/// Main error type for plotdig-rs operations
#[derive(Error, Debug)]
pub enum PlotDigError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors related to reading or decoding plot images
    #[error("Image error: {0}")]
    Image(String),

    /// Errors related to session sidecar files
    #[error("Session file error: {0}")]
    Session(String),

    /// Session sidecar written by an incompatible version of the tool
    #[error("Unsupported session file version {found} (expected {expected})")]
    SessionVersion { found: u32, expected: u32 },

    /// Axis calibration whose reference points coincide along the driving
    /// component, making resolution impossible
    #[error("Degenerate {axis} calibration: reference points coincide")]
    DegenerateCalibration { axis: AxisKind },

    /// Errors related to data export
    #[error("Export error: {0}")]
    Export(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PlotDigError>,
    },
}

impl PlotDigError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PlotDigError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for plotdig-rs operations
pub type Result<T> = std::result::Result<T, PlotDigError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

impl<T> ResultExt<T> for std::io::Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| PlotDigError::from(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| PlotDigError::from(e).with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlotDigError::Session("truncated file".to_string());
        assert_eq!(err.to_string(), "Session file error: truncated file");
    }

    #[test]
    fn test_error_with_context() {
        let err = PlotDigError::Export("disk full".to_string());
        let with_ctx = err.with_context("Failed to write series 2");
        assert!(with_ctx.to_string().contains("Failed to write series 2"));
    }

    #[test]
    fn test_version_mismatch_error() {
        let err = PlotDigError::SessionVersion {
            found: 7,
            expected: 1,
        };
        assert!(err.to_string().contains("version 7"));
        assert!(err.to_string().contains("expected 1"));
    }

    #[test]
    fn test_degenerate_calibration_names_axis() {
        let err = PlotDigError::DegenerateCalibration {
            axis: AxisKind::Horizontal,
        };
        assert!(err.to_string().contains("X axis"));
    }
}
