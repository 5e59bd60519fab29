//! Filesystem entry types
//!
//! These types represent what a single non-dereferencing stat produced for
//! one path, or why it produced nothing.

use crate::error::EntryErrorKind;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
#[cfg(not(unix))]
use std::time::{SystemTime, UNIX_EPOCH};

/// Type of filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    /// Regular file
    File,
    /// Directory
    Directory,
    /// Symbolic link
    Symlink,
    /// Block device
    BlockDevice,
    /// Character device
    CharDevice,
    /// Named pipe (FIFO)
    Fifo,
    /// Unix socket
    Socket,
    /// Unknown type
    Unknown,
}

impl EntryType {
    /// Convert from mode bits (standard Unix S_IFMT values)
    pub fn from_mode(mode: u32) -> Self {
        match mode & 0o170000 {
            0o100000 => EntryType::File,        // S_IFREG
            0o040000 => EntryType::Directory,   // S_IFDIR
            0o120000 => EntryType::Symlink,     // S_IFLNK
            0o060000 => EntryType::BlockDevice, // S_IFBLK
            0o020000 => EntryType::CharDevice,  // S_IFCHR
            0o010000 => EntryType::Fifo,        // S_IFIFO
            0o140000 => EntryType::Socket,      // S_IFSOCK
            _ => EntryType::Unknown,
        }
    }

    /// Check if this is a regular file
    pub fn is_file(&self) -> bool {
        *self == EntryType::File
    }

    /// Check if this is a directory
    pub fn is_dir(&self) -> bool {
        *self == EntryType::Directory
    }

    /// Check if this is a symbolic link
    pub fn is_symlink(&self) -> bool {
        *self == EntryType::Symlink
    }
}

/// Metadata captured for one entry, immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Parent path joined with the listed name, byte-exact
    pub path: PathBuf,

    /// File mode (type + permissions)
    pub mode: u32,

    /// Inode number
    pub inode: u64,

    /// Device the entry lives on
    pub device: u64,

    /// Number of hard links
    pub link_count: u64,

    /// Owner user ID
    pub uid: u32,

    /// Owner group ID
    pub gid: u32,

    /// Size in bytes
    pub size: u64,

    /// Last access time (Unix timestamp)
    pub atime: i64,

    /// Last modification time (Unix timestamp)
    pub mtime: i64,

    /// Status change time (Unix timestamp)
    pub ctime: i64,
}

impl FileRecord {
    /// Build a record from the result of `symlink_metadata`
    #[cfg(unix)]
    pub fn from_metadata(path: impl Into<PathBuf>, meta: &Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;

        Self {
            path: path.into(),
            mode: meta.mode(),
            inode: meta.ino(),
            device: meta.dev(),
            link_count: meta.nlink(),
            uid: meta.uid(),
            gid: meta.gid(),
            size: meta.size(),
            atime: meta.atime(),
            mtime: meta.mtime(),
            ctime: meta.ctime(),
        }
    }

    /// Build a record from the result of `symlink_metadata`
    ///
    /// Hosts without unix metadata report no inode, device or ownership;
    /// the mode is synthesized from the file type.
    #[cfg(not(unix))]
    pub fn from_metadata(path: impl Into<PathBuf>, meta: &Metadata) -> Self {
        let file_type = meta.file_type();
        let mode = if file_type.is_dir() {
            0o040755
        } else if file_type.is_symlink() {
            0o120777
        } else {
            0o100644
        };

        Self {
            path: path.into(),
            mode,
            inode: 0,
            device: 0,
            link_count: 1,
            uid: 0,
            gid: 0,
            size: meta.len(),
            atime: unix_secs(meta.accessed().ok()),
            mtime: unix_secs(meta.modified().ok()),
            ctime: unix_secs(meta.created().ok()),
        }
    }

    /// Get the entry type from mode
    pub fn entry_type(&self) -> EntryType {
        EntryType::from_mode(self.mode)
    }

}

#[cfg(not(unix))]
fn unix_secs(time: Option<SystemTime>) -> i64 {
    time.and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Stands in for a `FileRecord` when the stat failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMarker {
    /// Path whose metadata could not be fetched
    pub path: PathBuf,

    /// Failure classification
    pub kind: EntryErrorKind,

    /// OS error text, for diagnostics only
    pub reason: String,
}

/// Outcome of capturing one path: exactly one of record or marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryStatus {
    Record(FileRecord),
    Failed(ErrorMarker),
}

impl EntryStatus {
    /// Returns the path associated with this entry
    pub fn path(&self) -> &Path {
        match self {
            EntryStatus::Record(record) => &record.path,
            EntryStatus::Failed(marker) => &marker.path,
        }
    }

    /// Returns the record if the stat succeeded
    pub fn record(&self) -> Option<&FileRecord> {
        match self {
            EntryStatus::Record(record) => Some(record),
            EntryStatus::Failed(_) => None,
        }
    }

    /// Returns true if this entry is an error marker
    pub fn is_failed(&self) -> bool {
        matches!(self, EntryStatus::Failed(_))
    }
}
