//! Atomic write operations for tab-delimited files.
//!
//! A table is first written to a sibling temporary file with a `.tmp`
//! extension, flushed and closed, then renamed over the target path. On POSIX
//! systems a rename within one filesystem is atomic, so a reader never sees a
//! half-written table at the target path.
//!
//! # Examples
//!
//! ```no_run
//! use seglog_tsv::{write_table_atomic, Header, Row};
//!
//! # fn example() -> seglog_tsv::Result<()> {
//! let header = Header::new(vec!["t".into(), "state".into()]);
//! let rows = vec![Row::new(vec!["1".into(), "1".into()])];
//! write_table_atomic("logs/flight-1.txt", &header, &rows)?;
//! # Ok(())
//! # }
//! ```

use crate::table::{Header, Row};
use crate::{Result, TsvWriter};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Atomically writes `header` followed by `rows` to `path`.
///
/// An existing file at `path` is replaced.
///
/// # Errors
///
/// Returns an error if:
/// - The temporary file cannot be created
/// - An I/O error occurs during writing or flushing
/// - The rename fails (e.g., cross-filesystem move)
///
/// On failure the temporary file is removed on a best-effort basis and any
/// existing file at `path` is left unchanged.
pub fn write_table_atomic<P: AsRef<Path>>(path: P, header: &Header, rows: &[Row]) -> Result<()> {
    let path = path.as_ref();
    let temp_path = make_temp_path(path);

    if let Err(e) = write_to_temp_file(&temp_path, header, rows) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e);
    }

    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e.into());
    }

    trace!(path = %path.display(), rows = rows.len(), "Wrote table");
    Ok(())
}

/// Creates the temporary path used while writing `path`.
///
/// `.tmp` is appended to the existing extension, or used as the extension
/// when there is none.
fn make_temp_path(path: &Path) -> PathBuf {
    let mut temp_path = path.to_path_buf();
    let new_extension = match path.extension() {
        Some(ext) => {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".tmp");
            new_ext
        }
        None => std::ffi::OsString::from("tmp"),
    };
    temp_path.set_extension(new_extension);
    temp_path
}

fn write_to_temp_file(temp_path: &Path, header: &Header, rows: &[Row]) -> Result<()> {
    let file = File::create(temp_path)?;
    let mut writer = TsvWriter::new(file);
    writer.write_table(header, rows)?;
    let file = writer.into_inner()?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> (Header, Vec<Row>) {
        let header = Header::new(vec!["t".into(), "v".into()]);
        let rows = vec![
            Row::new(vec!["1".into(), "10".into()]),
            Row::new(vec!["2".into(), "20".into()]),
        ];
        (header, rows)
    }

    #[test]
    fn make_temp_path_with_extension() {
        let temp = make_temp_path(Path::new("/path/to/flight-1.txt"));
        assert_eq!(temp, Path::new("/path/to/flight-1.txt.tmp"));
    }

    #[test]
    fn make_temp_path_without_extension() {
        let temp = make_temp_path(Path::new("/path/to/file"));
        assert_eq!(temp, Path::new("/path/to/file.tmp"));
    }

    #[test]
    fn writes_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("flight-1.txt");
        let (header, rows) = sample();

        write_table_atomic(&path, &header, &rows).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "t\tv\n1\t10\n2\t20\n");
        assert!(!make_temp_path(&path).exists());
    }

    #[test]
    fn replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("flight-1.txt");
        std::fs::write(&path, "stale contents that are longer than the new ones\n").unwrap();
        let (header, rows) = sample();

        write_table_atomic(&path, &header, &rows[..1]).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "t\tv\n1\t10\n");
    }

    #[test]
    fn missing_parent_directory_fails_without_leftovers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("flight-1.txt");
        let (header, rows) = sample();

        assert!(write_table_atomic(&path, &header, &rows).is_err());
        assert!(!path.exists());
        assert!(!make_temp_path(&path).exists());
    }
}
