//! Versioned session sidecar files
//!
//! A digitizing session is persisted as a JSON sidecar next to its image:
//! `plot.png` gets `plot.png.plotdig`. The sidecar stores everything worth
//! keeping between runs (series with their styles, axis calibration) but no
//! transient interaction state; restoring a session always starts with the
//! first series selected.
//!
//! The record carries an explicit schema version. Loading a sidecar written
//! by a different schema fails fast instead of guessing.

use crate::axes::{AxisCalibration, AxisKind};
use crate::error::{PlotDigError, Result, ResultExt};
use crate::series::{Series, SeriesStore};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current sidecar schema version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Extension appended to the image path to form the sidecar path
pub const SIDECAR_EXTENSION: &str = "plotdig";

/// Everything a digitizing session persists between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Schema version, checked on load
    #[serde(default)]
    pub version: u32,
    /// When the snapshot was written
    pub saved_at: chrono::DateTime<chrono::Utc>,
    /// All series with their markers and styles
    pub series: Vec<Series>,
    /// The committed axis calibration
    pub axes: AxisCalibration,
}

impl SessionSnapshot {
    /// Capture the persistent state of a session
    pub fn capture(store: &SeriesStore, axes: &AxisCalibration) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: chrono::Utc::now(),
            series: store.all().to_vec(),
            axes: *axes,
        }
    }

    /// Sidecar path for an image: the image path with `.plotdig` appended
    pub fn sidecar_path(image_path: &Path) -> PathBuf {
        let mut name = image_path.as_os_str().to_owned();
        name.push(format!(".{}", SIDECAR_EXTENSION));
        PathBuf::from(name)
    }

    /// Write the snapshot next to the image
    pub fn save(&self, image_path: &Path) -> Result<PathBuf> {
        let path = Self::sidecar_path(image_path);
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PlotDigError::Session(e.to_string()))?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write session file {}", path.display()))?;
        tracing::info!("Saved session to {}", path.display());
        Ok(path)
    }

    /// Load the sidecar for an image
    ///
    /// A missing sidecar is not an error and yields `None`. A sidecar that
    /// exists but cannot be read, parsed, or version-checked is an error.
    pub fn load(image_path: &Path) -> Result<Option<Self>> {
        let path = Self::sidecar_path(image_path);
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(PlotDigError::from(e)
                    .with_context(format!("Failed to read session file {}", path.display())))
            }
        };

        let snapshot: Self = serde_json::from_str(&json)
            .map_err(|e| PlotDigError::Session(format!("{}: {}", path.display(), e)))?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(PlotDigError::SessionVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        if snapshot.series.is_empty() {
            return Err(PlotDigError::Session(format!(
                "{}: no series in session file",
                path.display()
            )));
        }
        tracing::info!(
            "Loaded session from {} ({} series)",
            path.display(),
            snapshot.series.len()
        );
        Ok(Some(snapshot))
    }

    /// Rebuild the in-memory state, enforcing the store and axis invariants
    pub fn into_state(self) -> (SeriesStore, AxisCalibration) {
        let store = SeriesStore::from_series(self.series);
        let mut axes = self.axes;
        for kind in [AxisKind::Horizontal, AxisKind::Vertical] {
            let axis = *axes.axis(kind);
            if !axis.is_aligned(kind) {
                tracing::warn!("Restored {} was not aligned; forcing alignment", kind);
                axes.set_axis(kind, axis.realigned(kind));
            }
        }
        (store, axes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axes::Axis;
    use crate::types::GlobalCoord;

    fn sample_store() -> SeriesStore {
        let mut store = SeriesStore::new();
        store.add_marker(GlobalCoord::new(10.0, 20.0));
        store.add_marker(GlobalCoord::new(30.0, 40.0));
        store.add_series();
        store.adjust_marker_size(2.0);
        store.cycle_marker_shape();
        store.add_marker(GlobalCoord::new(50.0, 60.0));
        store
    }

    #[test]
    fn test_sidecar_path_appends_extension() {
        let path = SessionSnapshot::sidecar_path(Path::new("/data/plot.png"));
        assert_eq!(path, PathBuf::from("/data/plot.png.plotdig"));
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("plot.png");

        let store = sample_store();
        let axes = AxisCalibration::default();
        let snapshot = SessionSnapshot::capture(&store, &axes);
        snapshot.save(&image).unwrap();

        let loaded = SessionSnapshot::load(&image).unwrap().unwrap();
        assert_eq!(loaded, snapshot);

        let (restored_store, restored_axes) = loaded.into_state();
        assert_eq!(restored_store.all(), store.all());
        assert_eq!(restored_axes, axes);
        // Transient interaction state is not persisted.
        assert_eq!(restored_store.working_index(), 0);
    }

    #[test]
    fn test_load_missing_sidecar_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("plot.png");
        assert!(SessionSnapshot::load(&image).unwrap().is_none());
    }

    #[test]
    fn test_load_corrupt_sidecar_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("plot.png");
        std::fs::write(SessionSnapshot::sidecar_path(&image), "not json at all").unwrap();

        let err = SessionSnapshot::load(&image).unwrap_err();
        assert!(matches!(err, PlotDigError::Session(_)));
    }

    #[test]
    fn test_load_version_mismatch_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("plot.png");

        let mut snapshot = SessionSnapshot::capture(&SeriesStore::new(), &AxisCalibration::default());
        snapshot.version = 99;
        let json = serde_json::to_string_pretty(&snapshot).unwrap();
        std::fs::write(SessionSnapshot::sidecar_path(&image), json).unwrap();

        let err = SessionSnapshot::load(&image).unwrap_err();
        assert!(matches!(
            err,
            PlotDigError::SessionVersion {
                found: 99,
                expected: SNAPSHOT_VERSION
            }
        ));
    }

    #[test]
    fn test_load_rejects_empty_series_list() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("plot.png");

        let mut snapshot = SessionSnapshot::capture(&SeriesStore::new(), &AxisCalibration::default());
        snapshot.series.clear();
        let json = serde_json::to_string_pretty(&snapshot).unwrap();
        std::fs::write(SessionSnapshot::sidecar_path(&image), json).unwrap();

        let err = SessionSnapshot::load(&image).unwrap_err();
        assert!(err.to_string().contains("no series"));
    }

    #[test]
    fn test_into_state_realigns_skewed_axes() {
        let mut axes = AxisCalibration::default();
        axes.horizontal = Axis::new(GlobalCoord::new(0.0, 10.0), GlobalCoord::new(80.0, 99.0));
        let snapshot = SessionSnapshot::capture(&SeriesStore::new(), &axes);

        let (_, restored) = snapshot.into_state();
        assert!(restored.horizontal.is_aligned(AxisKind::Horizontal));
        assert_eq!(restored.horizontal.end, GlobalCoord::new(80.0, 10.0));
    }
}
