//! fsmeta-walker - Filesystem Metadata Crawler and Statistics
//!
//! Walks a directory tree, captures lstat metadata for every entry, and
//! computes descriptive statistics over it.
//!
//! # Features
//!
//! - **Symlink-safe traversal**: metadata is fetched without following
//!   links, so a link is recorded as itself.
//!
//! - **Fault tolerant**: an entry whose stat fails is recorded as an error
//!   marker (access or system class) and the walk carries on.
//!
//! - **Statistics**: mean, maximum and minimum file size, link count and
//!   age, each with the number of entries sharing that exact value.
//!
//! - **Compressed CSV output**: the raw metadata of a run, plus an
//!   append-only log of runs.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │          Walker          │  depth-first, single pass
//! │  list_dir + lstat        │
//! └────────────┬─────────────┘
//!              │ Snapshot (path -> record | marker)
//!      ┌───────┴──────────────────┐
//!      ▼                          ▼
//! ┌──────────────┐        ┌──────────────────┐
//! │    stats     │        │     persist      │
//! │ size / links │        │ data/*.csv.gz    │
//! │ age          │        │ data/datafiles.csv│
//! └──────┬───────┘        └──────────────────┘
//!        ▼
//! ┌──────────────┐
//! │  histogram   │
//! └──────────────┘
//! ```
//!
//! # Example
//!
//! ```bash
//! # Size and link statistics
//! fsmeta-walker /usr --size --links
//!
//! # Persist raw metadata under ./data
//! mkdir -p data && fsmeta-walker /etc --csv
//! ```

pub mod config;
pub mod error;
pub mod fs;
pub mod histogram;
pub mod persist;
pub mod progress;
pub mod stats;
pub mod walker;

pub use config::{AnalysisConfig, CliArgs, PersistConfig, RunConfig, WalkConfig};
pub use error::{Result, WalkerError};
pub use walker::{Snapshot, WalkResult, Walker};
