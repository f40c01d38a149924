//! Filesystem access for tosh.
//!
//! This module handles:
//! - Reading source documents into memory
//! - Existence probes behind the `exists` subcommand

use crate::error::{Result, ToshError};
use std::path::Path;

/// Read a source document into memory.
///
/// An unreadable file is an immediate, synchronous failure carrying the
/// path; there is no retry or deferred signal.
pub fn read_source(path: &Path) -> Result<String> {
	std::fs::read_to_string(path).map_err(|source| ToshError::SourceRead {
		path: path.to_path_buf(),
		source,
	})
}

/// Whether the path exists at all.
pub fn exists(path: &Path) -> bool {
	path.exists()
}

/// Whether the path exists and is a regular file.
pub fn is_file(path: &Path) -> bool {
	path.is_file()
}

/// Whether the path exists and is a directory.
pub fn is_dir(path: &Path) -> bool {
	path.is_dir()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_read_source() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("conf.toml");
		std::fs::write(&path, "key = 1\n").unwrap();

		assert_eq!(read_source(&path).unwrap(), "key = 1\n");
	}

	#[test]
	fn test_read_source_missing_file() {
		let result = read_source(Path::new("/nonexistent/tosh/conf.toml"));
		match result.unwrap_err() {
			ToshError::SourceRead { path, .. } => {
				assert_eq!(path, Path::new("/nonexistent/tosh/conf.toml"));
			}
			other => panic!("Expected SourceRead error, got {other:?}"),
		}
	}

	#[test]
	fn test_probes() {
		let dir = tempfile::tempdir().unwrap();
		let file = dir.path().join("present");
		std::fs::write(&file, "").unwrap();

		assert!(exists(&file));
		assert!(is_file(&file));
		assert!(!is_dir(&file));

		assert!(exists(dir.path()));
		assert!(!is_file(dir.path()));
		assert!(is_dir(dir.path()));

		let missing = dir.path().join("absent");
		assert!(!exists(&missing));
		assert!(!is_file(&missing));
		assert!(!is_dir(&missing));
	}
}
