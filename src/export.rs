//! Export of resolved series to delimited text files
//!
//! Each series becomes one tab-delimited file next to the source image,
//! named after it with the 0-based series index appended:
//! `plot.png` → `plot.png_0.csv`, `plot.png_1.csv`, ...
//!
//! Every file starts with [`EXPORT_HEADER`] and carries one row per marker,
//! all values formatted with 7 fractional digits. Failures are loud; a
//! failure on a later series leaves the files written before it on disk.

use crate::error::{Result, ResultExt};
use crate::types::DataValue;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Header line written to every export file
pub const EXPORT_HEADER: &str = "X\tX-uncertainty\tY\tY-uncertainty";

/// Export file path for one series: the image path with `_<index>.csv`
/// appended
pub fn export_path(image_path: &Path, series_index: usize) -> PathBuf {
    let mut name = image_path.as_os_str().to_owned();
    name.push(format!("_{}.csv", series_index));
    PathBuf::from(name)
}

/// Write one resolved series to its export file
pub fn write_series(
    image_path: &Path,
    series_index: usize,
    values: &[DataValue],
) -> Result<PathBuf> {
    let path = export_path(image_path, series_index);
    write_file(&path, values)
        .with_context(|| format!("Failed to write export file {}", path.display()))?;
    tracing::info!("Exported {} markers to {}", values.len(), path.display());
    Ok(path)
}

/// Write every resolved series, one file per series, in series order
pub fn write_all(image_path: &Path, resolved: &[Vec<DataValue>]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::with_capacity(resolved.len());
    for (i, values) in resolved.iter().enumerate() {
        paths.push(write_series(image_path, i, values)?);
    }
    Ok(paths)
}

fn write_file(path: &Path, values: &[DataValue]) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{}", EXPORT_HEADER)?;
    for value in values {
        writeln!(
            writer,
            "{:.7}\t{:.7}\t{:.7}\t{:.7}",
            value.x, value.x_uncertainty, value.y, value.y_uncertainty
        )?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_path_appends_index_to_full_name() {
        let path = export_path(Path::new("/data/plot.png"), 2);
        assert_eq!(path, PathBuf::from("/data/plot.png_2.csv"));
    }

    #[test]
    fn test_written_file_has_header_and_seven_digit_rows() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("plot.png");

        let values = vec![
            DataValue::new(0.5, 0.05, 0.5, -0.05),
            DataValue::new(1.0, 0.1, 0.25, -0.1),
        ];
        let path = write_series(&image, 0, &values).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some(EXPORT_HEADER));
        assert_eq!(
            lines.next(),
            Some("0.5000000\t0.0500000\t0.5000000\t-0.0500000")
        );
        assert_eq!(
            lines.next(),
            Some("1.0000000\t0.1000000\t0.2500000\t-0.1000000")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_series_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("plot.png");

        let path = write_series(&image, 1, &[]).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, format!("{}\n", EXPORT_HEADER));
    }

    #[test]
    fn test_write_all_creates_one_file_per_series() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("plot.png");

        let resolved = vec![
            vec![DataValue::new(0.1, 0.01, 0.2, -0.01)],
            Vec::new(),
            vec![DataValue::new(0.9, 0.01, 0.8, -0.01)],
        ];
        let paths = write_all(&image, &resolved).unwrap();
        assert_eq!(
            paths,
            vec![
                dir.path().join("plot.png_0.csv"),
                dir.path().join("plot.png_1.csv"),
                dir.path().join("plot.png_2.csv"),
            ]
        );
        for path in &paths {
            assert!(path.exists());
        }
    }

    #[test]
    fn test_write_to_missing_directory_fails_loudly() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("no_such_dir").join("plot.png");

        let err = write_series(&image, 0, &[]).unwrap_err();
        assert!(err.to_string().contains("Failed to write export file"));
    }
}
