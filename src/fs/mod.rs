//! Local filesystem access
//!
//! The walker talks to the filesystem through [`MetadataSource`], which
//! exposes the two primitives a traversal needs:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                      Walker                          │
//! └──────────────┬──────────────────────────┬───────────┘
//!                │ list_dir                 │ symlink_metadata
//!                ▼                          ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                 MetadataSource                       │
//! │  LocalFs: std::fs::read_dir + std::fs::symlink_metadata │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Listing returns names sorted bytewise so a walk over an unchanged tree
//! discovers entries in the same order every time.

pub mod types;

pub use types::{EntryStatus, EntryType, ErrorMarker, FileRecord};

use std::ffi::OsString;
use std::io;
use std::path::Path;

/// Directory listing and non-dereferencing stat
pub trait MetadataSource {
    /// Names of the entries in a directory, without `.` and `..`
    fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>>;

    /// Metadata of the entry itself; symlinks are not followed
    fn symlink_metadata(&self, path: &Path) -> io::Result<FileRecord>;
}

/// The host filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl MetadataSource for LocalFs {
    fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let mut names = std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect::<io::Result<Vec<_>>>()?;
        names.sort();
        Ok(names)
    }

    fn symlink_metadata(&self, path: &Path) -> io::Result<FileRecord> {
        let meta = std::fs::symlink_metadata(path)?;
        Ok(FileRecord::from_metadata(path, &meta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_list_dir_sorted() {
        let dir = tempdir().unwrap();
        for name in ["c", "a", "b"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let names = LocalFs.list_dir(dir.path()).unwrap();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_symlink_metadata_regular_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("file.txt");
        std::fs::write(&path, vec![0u8; 42]).unwrap();

        let record = LocalFs.symlink_metadata(&path).unwrap();
        assert_eq!(record.size, 42);
        assert!(record.entry_type().is_file());
        assert_eq!(record.path, path);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_not_followed() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("target");
        std::fs::write(&target, vec![0u8; 1000]).unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let record = LocalFs.symlink_metadata(&link).unwrap();
        assert!(record.entry_type().is_symlink());
        assert_ne!(record.size, 1000);
    }

    #[test]
    fn test_list_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let err = LocalFs.list_dir(&dir.path().join("missing")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
