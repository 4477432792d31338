//! Sheet files on disk.
//!
//! Sheets are named after the UTC time they were written,
//! `wall_sheet_<timestamp>.<ext>`, and are opened with `create_new`: an
//! existing file is never overwritten. When the name is taken, a numeric
//! suffix is appended.

use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};

use crate::config::OutputFormat;

const FILE_PREFIX: &str = "wall_sheet";
/// Attempts with a numeric suffix before giving up on a timestamp.
const MAX_SUFFIX: u32 = 100;

/// File name for a sheet written at `timestamp`, e.g.
/// `wall_sheet_2024-05-01T09-30-00-000Z.dxf`.
pub fn artifact_file_name(timestamp: DateTime<Utc>, format: OutputFormat) -> String {
    format!(
        "{FILE_PREFIX}_{}.{}",
        timestamp.format("%Y-%m-%dT%H-%M-%S-%3fZ"),
        format.extension()
    )
}

fn suffixed_name(timestamp: DateTime<Utc>, format: OutputFormat, suffix: u32) -> String {
    format!(
        "{FILE_PREFIX}_{}_{suffix}.{}",
        timestamp.format("%Y-%m-%dT%H-%M-%S-%3fZ"),
        format.extension()
    )
}

/// Writes `contents` to a new file in `directory`, creating the directory if
/// needed, and returns the path written.
///
/// # Errors
///
/// Returns the underlying [`io::Error`] if the directory cannot be created or
/// the file cannot be written, and [`io::ErrorKind::AlreadyExists`] if every
/// candidate name is taken.
pub fn write_artifact(
    directory: &Path,
    format: OutputFormat,
    contents: &[u8],
) -> io::Result<PathBuf> {
    write_artifact_at(directory, format, contents, Utc::now())
}

/// [`write_artifact`] with an explicit timestamp.
///
/// # Errors
///
/// See [`write_artifact`].
pub fn write_artifact_at(
    directory: &Path,
    format: OutputFormat,
    contents: &[u8],
    timestamp: DateTime<Utc>,
) -> io::Result<PathBuf> {
    fs::create_dir_all(directory)?;

    let candidates = std::iter::once(artifact_file_name(timestamp, format))
        .chain((1..=MAX_SUFFIX).map(|suffix| suffixed_name(timestamp, format, suffix)));

    for name in candidates {
        let path = directory.join(&name);
        let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                debug!(path:? = path; "Sheet file exists, trying next name");
                continue;
            }
            Err(err) => {
                error!(path:? = path, err:err; "Failed to create sheet file");
                return Err(err);
            }
        };

        fill_new_file(&path, file, contents)?;
        info!(path:? = path, bytes = contents.len(); "Sheet written");
        return Ok(path);
    }

    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!(
            "every name for {} in {} is taken",
            artifact_file_name(timestamp, format),
            directory.display()
        ),
    ))
}

/// Writes `contents` into the freshly created file at `path`.
///
/// On failure the file is removed so no truncated sheet is left behind.
fn fill_new_file(path: &Path, mut file: impl Write, contents: &[u8]) -> io::Result<()> {
    let result = file.write_all(contents).and_then(|()| file.flush());
    if let Err(err) = result {
        error!(path:? = path, err:err; "Failed to write sheet file");
        drop(file);
        if let Err(remove_err) = fs::remove_file(path) {
            warn!(path:? = path, err:err = remove_err; "Failed to remove partial sheet file");
        }
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use chrono::TimeZone;

    use super::*;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            artifact_file_name(fixed_time(), OutputFormat::Dxf),
            "wall_sheet_2024-05-01T09-30-00-000Z.dxf"
        );
        assert!(artifact_file_name(fixed_time(), OutputFormat::Svg).ends_with(".svg"));
    }

    #[test]
    fn test_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();

        let first = write_artifact_at(dir.path(), OutputFormat::Dxf, b"first", fixed_time()).unwrap();
        let second =
            write_artifact_at(dir.path(), OutputFormat::Dxf, b"second", fixed_time()).unwrap();

        assert_ne!(first, second);
        assert_eq!(fs::read(&first).unwrap(), b"first");
        assert_eq!(fs::read(&second).unwrap(), b"second");
        assert!(
            second
                .file_name()
                .unwrap()
                .to_string_lossy()
                .ends_with("_1.dxf")
        );
    }

    /// Accepts a few bytes, then fails like a full disk.
    struct FullDisk {
        inner: File,
        budget: usize,
    }

    impl Write for FullDisk {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::new(io::ErrorKind::StorageFull, "no space left"));
            }
            let len = buf.len().min(self.budget);
            self.budget -= len;
            self.inner.write(&buf[..len])
        }

        fn flush(&mut self) -> io::Result<()> {
            self.inner.flush()
        }
    }

    #[test]
    fn test_failed_write_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(artifact_file_name(fixed_time(), OutputFormat::Dxf));
        let inner = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .unwrap();

        let err = fill_new_file(&path, FullDisk { inner, budget: 4 }, b"  0\nSECTION").unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::StorageFull);
        assert!(!path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("documents").join("sheets");

        let path = write_artifact(&nested, OutputFormat::Svg, b"<svg/>").unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }
}
