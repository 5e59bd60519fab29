//! Depth-first filesystem walker
//!
//! Produces entries in pre-order: a directory's own entry comes out before
//! any of its children, and one subtree is exhausted before the next
//! sibling is visited.
//!
//! ```text
//! root/                 stack after visiting "root/a":
//! ├── a/                  [ root: (b, c) ]
//! │   └── x               [ root/a: (x)  ]   <- listed on next step
//! ├── b
//! └── c
//!
//! order: root/a, root/a/x, root/b, root/c
//! ```
//!
//! Failure handling:
//! - a failed stat becomes an [`ErrorMarker`] and the walk moves on
//! - a failed listing ends the walk with [`WalkerError::Listing`]

use crate::config::WalkConfig;
use crate::error::{EntryErrorKind, Result, WalkerError};
use crate::fs::types::{EntryStatus, EntryType, ErrorMarker, FileRecord};
use crate::fs::{LocalFs, MetadataSource};
use crate::walker::snapshot::Snapshot;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Counters for a completed walk
#[derive(Debug, Clone, Default)]
pub struct WalkStats {
    pub dirs: u64,
    pub files: u64,
    /// Symlinks, devices, pipes and sockets
    pub others: u64,
    pub errors: u64,
    /// Sum of regular file sizes
    pub bytes: u64,
    pub duration: Duration,
}

impl WalkStats {
    fn count(&mut self, status: &EntryStatus) {
        match status {
            EntryStatus::Record(record) => match record.entry_type() {
                EntryType::Directory => self.dirs += 1,
                EntryType::File => {
                    self.files += 1;
                    self.bytes += record.size;
                }
                _ => self.others += 1,
            },
            EntryStatus::Failed(_) => self.errors += 1,
        }
    }

    /// Entries visited per second
    pub fn entries_per_second(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            (self.dirs + self.files + self.others + self.errors) as f64 / secs
        } else {
            0.0
        }
    }
}

/// Result of [`Walker::traverse`]
#[derive(Debug, Clone)]
pub struct WalkResult {
    pub snapshot: Snapshot,
    pub stats: WalkStats,
}

/// Single-threaded recursive walker
pub struct Walker<S = LocalFs> {
    config: WalkConfig,
    source: S,
}

impl Walker<LocalFs> {
    pub fn new(config: WalkConfig) -> Self {
        Self::with_source(config, LocalFs)
    }
}

impl<S: MetadataSource> Walker<S> {
    /// Walk through an alternate metadata source
    pub fn with_source(config: WalkConfig, source: S) -> Self {
        Self { config, source }
    }

    /// Walk the whole tree and build a fresh snapshot
    pub fn traverse(&self) -> Result<WalkResult> {
        self.traverse_with_observer(|_| {})
    }

    /// Walk the whole tree, reporting each path before it is stat-ed
    pub fn traverse_with_observer<F>(&self, mut observer: F) -> Result<WalkResult>
    where
        F: FnMut(&Path),
    {
        let start = Instant::now();
        let verbose = self.config.verbose;

        info!("Traversing {}", self.config.root.display());

        let mut snapshot = Snapshot::new();
        let mut stats = WalkStats::default();

        let walk = self.entries(|path: &Path| {
            if verbose {
                debug!("{}", path.display());
            }
            observer(path);
        });

        for status in walk {
            let status = status?;
            stats.count(&status);
            snapshot.insert(status);
        }

        stats.duration = start.elapsed();

        info!(
            entries = snapshot.len(),
            errors = stats.errors,
            "Filesystem traversed in {:.6} seconds",
            stats.duration.as_secs_f64()
        );

        Ok(WalkResult { snapshot, stats })
    }

    /// Lazily walk the tree, yielding entries in pre-order
    pub fn entries<F>(&self, observer: F) -> Walk<'_, S, F>
    where
        F: FnMut(&Path),
    {
        Walk {
            source: &self.source,
            stack: vec![PendingDir::new(self.config.root.clone())],
            observer,
        }
    }
}

/// A directory whose children are still being visited
struct PendingDir {
    path: PathBuf,
    /// `None` until the directory has been listed
    names: Option<std::vec::IntoIter<OsString>>,
}

impl PendingDir {
    fn new(path: PathBuf) -> Self {
        Self { path, names: None }
    }
}

/// Pre-order iterator over a directory tree
///
/// Yields `Err` once if a directory cannot be listed, then ends.
pub struct Walk<'a, S, F> {
    source: &'a S,
    stack: Vec<PendingDir>,
    observer: F,
}

impl<S: MetadataSource, F: FnMut(&Path)> Walk<'_, S, F> {
    fn capture(&mut self, path: PathBuf) -> EntryStatus {
        (self.observer)(&path);

        match self.source.symlink_metadata(&path) {
            Ok(record) => EntryStatus::Record(FileRecord { path, ..record }),
            Err(e) => {
                let kind = EntryErrorKind::classify(&e);
                warn!(
                    "failed to get information about {}, {}",
                    path.display(),
                    kind
                );
                EntryStatus::Failed(ErrorMarker {
                    path,
                    kind,
                    reason: e.to_string(),
                })
            }
        }
    }
}

impl<S: MetadataSource, F: FnMut(&Path)> Iterator for Walk<'_, S, F> {
    type Item = Result<EntryStatus>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;

            if top.names.is_none() {
                match self.source.list_dir(&top.path) {
                    Ok(names) => top.names = Some(names.into_iter()),
                    Err(source) => {
                        let path = top.path.to_string_lossy().into_owned();
                        self.stack.clear();
                        return Some(Err(WalkerError::Listing { path, source }));
                    }
                }
            }

            let Some(name) = top.names.as_mut().and_then(Iterator::next) else {
                self.stack.pop();
                continue;
            };

            let child = top.path.join(name);
            let status = self.capture(child);

            if let EntryStatus::Record(ref record) = status {
                if record.entry_type().is_dir() {
                    self.stack.push(PendingDir::new(record.path.clone()));
                }
            }

            return Some(Ok(status));
        }
    }
}
