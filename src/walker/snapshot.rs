//! In-memory result of one traversal
//!
//! A [`Snapshot`] maps every discovered path to exactly one
//! [`EntryStatus`]. Entries keep discovery order (pre-order, depth-first),
//! which is the order persisted rows and verbose traces follow.
//!
//! Keys are the exact paths, so names that are not valid UTF-8 stay
//! distinct.

use crate::fs::types::{EntryStatus, FileRecord};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Path -> record-or-marker, in discovery order
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    entries: Vec<EntryStatus>,
    index: HashMap<PathBuf, usize>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing any previous status for the same path
    ///
    /// Replacement keeps the original position so a path never appears
    /// twice.
    pub fn insert(&mut self, status: EntryStatus) {
        match self.index.get(status.path()) {
            Some(&pos) => self.entries[pos] = status,
            None => {
                self.index
                    .insert(status.path().to_path_buf(), self.entries.len());
                self.entries.push(status);
            }
        }
    }

    /// Look up the status captured for a path
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&EntryStatus> {
        self.index.get(path.as_ref()).map(|&pos| &self.entries[pos])
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.index.contains_key(path.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in discovery order
    pub fn iter(&self) -> impl Iterator<Item = &EntryStatus> {
        self.entries.iter()
    }

    /// Successfully captured records in discovery order
    pub fn records(&self) -> impl Iterator<Item = &FileRecord> {
        self.entries.iter().filter_map(EntryStatus::record)
    }

    /// Number of error markers
    pub fn error_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_failed()).count()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a EntryStatus;
    type IntoIter = std::slice::Iter<'a, EntryStatus>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<EntryStatus> for Snapshot {
    fn from_iter<I: IntoIterator<Item = EntryStatus>>(iter: I) -> Self {
        let mut snapshot = Snapshot::new();
        for status in iter {
            snapshot.insert(status);
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EntryErrorKind;
    use crate::fs::types::ErrorMarker;

    fn record(path: &str, size: u64) -> EntryStatus {
        EntryStatus::Record(FileRecord {
            path: path.into(),
            mode: 0o100644,
            inode: 1,
            device: 1,
            link_count: 1,
            uid: 0,
            gid: 0,
            size,
            atime: 0,
            mtime: 0,
            ctime: 0,
        })
    }

    #[test]
    fn test_insertion_order_preserved() {
        let snapshot: Snapshot = ["/r/b", "/r/a", "/r/c"]
            .into_iter()
            .map(|p| record(p, 1))
            .collect();

        let paths: Vec<_> = snapshot.iter().map(|e| e.path()).collect();
        assert_eq!(
            paths,
            vec![Path::new("/r/b"), Path::new("/r/a"), Path::new("/r/c")]
        );
    }

    #[test]
    fn test_reinsert_replaces_in_place() {
        let mut snapshot = Snapshot::new();
        snapshot.insert(record("/r/a", 1));
        snapshot.insert(record("/r/b", 2));
        snapshot.insert(EntryStatus::Failed(ErrorMarker {
            path: "/r/a".into(),
            kind: EntryErrorKind::System,
            reason: "gone".into(),
        }));

        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.get("/r/a").unwrap().is_failed());
        assert_eq!(snapshot.iter().next().unwrap().path(), Path::new("/r/a"));
        assert_eq!(snapshot.error_count(), 1);
        assert_eq!(snapshot.records().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_paths_stay_distinct() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let a = Path::new("/r").join(OsStr::from_bytes(b"\xfe"));
        let b = Path::new("/r").join(OsStr::from_bytes(b"\xff"));
        assert_eq!(a.to_string_lossy(), b.to_string_lossy());

        let mut snapshot = Snapshot::new();
        for path in [&a, &b] {
            let mut status = record("", 1);
            if let EntryStatus::Record(ref mut r) = status {
                r.path = path.clone();
            }
            snapshot.insert(status);
        }

        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.contains(&a));
        assert!(snapshot.contains(&b));
    }

    #[test]
    fn test_lookup() {
        let snapshot: Snapshot = std::iter::once(record("/r/a", 7)).collect();
        assert!(snapshot.contains("/r/a"));
        assert!(!snapshot.contains("/r/b"));
        assert_eq!(snapshot.get("/r/a").unwrap().record().unwrap().size, 7);
    }
}
