//! # Bill Export
//!
//! Writes a rendered bill to `bill_<invoice_number>.txt` in the export
//! directory. The directory is created on first use; an existing file with
//! the same number is overwritten.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

/// Bill export failures.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Could not create export directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// File name for a bill export.
pub fn export_file_name(invoice_number: i64) -> String {
    format!("bill_{}.txt", invoice_number)
}

/// Writes `text` under `dir` and returns the full path.
pub fn write_bill_export(dir: &Path, invoice_number: i64, text: &str) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(export_file_name(invoice_number));
    fs::write(&path, text).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), bytes = text.len(), "Bill exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        assert_eq!(export_file_name(7), "bill_7.txt");
    }

    #[test]
    fn test_write_creates_dir_and_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("exports");

        let first = write_bill_export(&dir, 3, "first").unwrap();
        assert_eq!(first, dir.join("bill_3.txt"));
        assert_eq!(fs::read_to_string(&first).unwrap(), "first");

        let again = write_bill_export(&dir, 3, "second").unwrap();
        assert_eq!(again, first);
        assert_eq!(fs::read_to_string(&again).unwrap(), "second");
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();

        let err = write_bill_export(&blocker, 1, "text").unwrap_err();
        assert!(matches!(err, ExportError::CreateDir { .. }));
    }
}
