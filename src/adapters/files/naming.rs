//! Collision-free output file naming
//!
//! Exports never replace an earlier file. The first free name in the sequence
//! `{base}.{ext}`, `{base}1.{ext}`, `{base}2.{ext}`, ... is used.

use crate::config::FileSinkConfig;
use crate::domain::{Result, TickerError};
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Upper bound on suffixes tried before giving up
const MAX_INDEX: u32 = 100_000;

/// Where a file sink writes: directory plus base name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLocation {
    pub dir: PathBuf,
    pub name: String,
}

impl OutputLocation {
    /// Builds the location from sink config, defaulting the directory to
    /// `fallback_dir` when none is configured
    pub fn from_config(config: &FileSinkConfig, fallback_dir: &str) -> Self {
        Self {
            dir: config
                .dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(fallback_dir)),
            name: config.name.clone(),
        }
    }

    /// Opens the next free file with the given extension
    ///
    /// # Errors
    ///
    /// See [`create_output_file`].
    pub fn create(&self, ext: &str) -> Result<(PathBuf, File)> {
        create_output_file(&self.dir, &self.name, ext)
    }

    /// Opens the next free file and hands it to `write`
    ///
    /// A failed write removes the file it was given, so no empty or partial
    /// export stays behind. Returns the path and the closure's row count.
    ///
    /// # Errors
    ///
    /// Returns the error from [`create_output_file`] or from `write`.
    pub fn write_new<F>(&self, ext: &str, write: F) -> Result<(PathBuf, usize)>
    where
        F: FnOnce(File) -> Result<usize>,
    {
        let (path, file) = self.create(ext)?;
        match write(file) {
            Ok(rows) => Ok((path, rows)),
            Err(e) => {
                if let Err(remove) = std::fs::remove_file(&path) {
                    tracing::warn!(
                        path = %path.display(),
                        error = %remove,
                        "Could not remove incomplete export"
                    );
                }
                Err(e)
            }
        }
    }
}

/// Candidate file name for a given index
///
/// Index 0 carries no numeric suffix.
pub fn candidate_name(base: &str, index: u32, ext: &str) -> String {
    if index == 0 {
        format!("{base}.{ext}")
    } else {
        format!("{base}{index}.{ext}")
    }
}

/// Creates `dir` if needed and opens the first free candidate
///
/// Every candidate is opened with create-new semantics, so any existing
/// directory entry (a dangling symlink included) counts as taken and is left
/// untouched.
///
/// # Errors
///
/// Returns `TickerError::Io` on filesystem failures, or
/// `TickerError::Export` if every candidate is taken.
pub fn create_output_file(dir: &Path, base: &str, ext: &str) -> Result<(PathBuf, File)> {
    std::fs::create_dir_all(dir).map_err(|e| {
        TickerError::Io(format!("Failed to create directory {}: {e}", dir.display()))
    })?;

    for index in 0..=MAX_INDEX {
        let path = dir.join(candidate_name(base, index, ext));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(TickerError::Io(format!(
                    "Failed to create {}: {e}",
                    path.display()
                )))
            }
        }
    }

    Err(TickerError::Export(format!(
        "No free file name for {base}.{ext} in {}",
        dir.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_candidate_names() {
        assert_eq!(candidate_name("ticker_list", 0, "csv"), "ticker_list.csv");
        assert_eq!(candidate_name("ticker_list", 1, "csv"), "ticker_list1.csv");
        assert_eq!(candidate_name("ticker_list", 12, "xlsx"), "ticker_list12.xlsx");
    }

    #[test]
    fn test_empty_directory_uses_base_name() {
        let temp = TempDir::new().unwrap();
        let (path, _file) = create_output_file(temp.path(), "ticker_list", "csv").unwrap();
        assert_eq!(path, temp.path().join("ticker_list.csv"));
    }

    #[test]
    fn test_skips_taken_names() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("ticker_list.csv"), "a").unwrap();
        std::fs::write(temp.path().join("ticker_list1.csv"), "b").unwrap();

        let (path, _file) = create_output_file(temp.path(), "ticker_list", "csv").unwrap();
        assert_eq!(path, temp.path().join("ticker_list2.csv"));
    }

    #[test]
    fn test_other_extensions_do_not_collide() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("ticker_list.json"), "[]").unwrap();

        let (path, _file) = create_output_file(temp.path(), "ticker_list", "csv").unwrap();
        assert_eq!(path, temp.path().join("ticker_list.csv"));
    }

    #[test]
    fn test_creates_missing_directories() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");

        let (path, _file) = create_output_file(&nested, "ticker_list", "json").unwrap();
        assert!(nested.is_dir());
        assert_eq!(path, nested.join("ticker_list.json"));
    }

    #[test]
    fn test_location_falls_back_to_format_dir() {
        let config = FileSinkConfig {
            enabled: true,
            name: "tickers".to_string(),
            dir: None,
        };
        let location = OutputLocation::from_config(&config, "csv");
        assert_eq!(location.dir, PathBuf::from("csv"));
        assert_eq!(location.name, "tickers");

        let location = OutputLocation::from_config(&FileSinkConfig::new("/tmp/out"), "csv");
        assert_eq!(location.dir, PathBuf::from("/tmp/out"));
        assert_eq!(location.name, "ticker_list");
    }

    #[test]
    fn test_create_output_file_keeps_existing() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("out.csv"), "keep").unwrap();

        let (path, _file) = create_output_file(temp.path(), "out", "csv").unwrap();

        assert_eq!(path, temp.path().join("out1.csv"));
        assert_eq!(std::fs::read_to_string(temp.path().join("out.csv")).unwrap(), "keep");
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_counts_as_taken() {
        let temp = TempDir::new().unwrap();
        let link = temp.path().join("ticker_list.csv");
        std::os::unix::fs::symlink(temp.path().join("gone"), &link).unwrap();

        let (path, _file) = create_output_file(temp.path(), "ticker_list", "csv").unwrap();

        assert_eq!(path, temp.path().join("ticker_list1.csv"));
        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert!(!temp.path().join("gone").exists());
    }

    #[test]
    fn test_failed_write_removes_file() {
        let temp = TempDir::new().unwrap();
        let location = OutputLocation {
            dir: temp.path().to_path_buf(),
            name: "ticker_list".to_string(),
        };

        let err = location
            .write_new("csv", |_file| Err(TickerError::Export("disk full".to_string())))
            .unwrap_err();

        assert!(err.to_string().contains("disk full"));
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_successful_write_keeps_file() {
        let temp = TempDir::new().unwrap();
        let location = OutputLocation {
            dir: temp.path().to_path_buf(),
            name: "ticker_list".to_string(),
        };

        let (path, rows) = location
            .write_new("json", |mut file| {
                use std::io::Write;
                file.write_all(b"[]")?;
                Ok(0)
            })
            .unwrap();

        assert_eq!(rows, 0);
        assert_eq!(std::fs::read_to_string(path).unwrap(), "[]");
    }
}
