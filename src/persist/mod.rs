//! Persistence of raw metadata
//!
//! ```text
//! Snapshot ──► RecordRow (csv + serde) ──► GzEncoder ──► data/<root>_<date>.csv.gz
//!                                                     │
//!                        RunSummaryEntry ─────────────┴─► data/datafiles.csv (append)
//! ```

pub mod schema;
pub mod writer;

pub use schema::{output_file_name, RecordRow, RunSummaryEntry, RUN_LOG_FILE, SNAPSHOT_HEADER};
pub use writer::{append_run_summary, persist, read_snapshot_rows, run_log_path, write_snapshot};
