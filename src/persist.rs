use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
	#[error("No document found at {0:?}")]
	NotFound(PathBuf),
	#[error("Could not read {path:?}\n  - {source}")]
	Read { path: PathBuf, source: io::Error },
	#[error("Could not write {path:?}\n  - {source}")]
	Write { path: PathBuf, source: io::Error },
}

impl PersistenceError {
	pub fn path(&self) -> &Path {
		match self {
			Self::NotFound(path) | Self::Read { path, .. } | Self::Write { path, .. } => path,
		}
	}
}

/// Whole-document storage. Every write replaces the previous document.
pub trait DocumentStore {
	fn read_all(&self, path: &Path) -> Result<String, PersistenceError>;

	fn write_all(&mut self, path: &Path, text: &str) -> Result<(), PersistenceError>;
}

/// Documents on the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl DocumentStore for FsStore {
	fn read_all(&self, path: &Path) -> Result<String, PersistenceError> {
		std::fs::read_to_string(path).map_err(|source| match source.kind() {
			io::ErrorKind::NotFound => PersistenceError::NotFound(path.to_owned()),
			_ => PersistenceError::Read {
				path: path.to_owned(),
				source,
			},
		})
	}

	fn write_all(&mut self, path: &Path, text: &str) -> Result<(), PersistenceError> {
		std::fs::write(path, text).map_err(|source| PersistenceError::Write {
			path: path.to_owned(),
			source,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::{DocumentStore, FsStore, PersistenceError};

	#[test]
	fn write_then_read() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("doc.json");
		let mut store = FsStore;

		store.write_all(&path, "{\"elements\":[]}").unwrap();
		assert_eq!(store.read_all(&path).unwrap(), "{\"elements\":[]}");

		store.write_all(&path, "{}").unwrap();
		assert_eq!(store.read_all(&path).unwrap(), "{}");
	}

	#[test]
	fn missing_file_is_not_found() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("absent.json");

		match FsStore.read_all(&path) {
			Err(PersistenceError::NotFound(p)) => assert_eq!(p, path),
			other => panic!("unexpected {other:?}"),
		}
	}

	#[test]
	fn write_into_missing_directory_fails() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nested/doc.json");

		let err = FsStore.write_all(&path, "{}").unwrap_err();
		assert!(matches!(err, PersistenceError::Write { .. }));
		assert_eq!(err.path(), path.as_path());
	}
}
