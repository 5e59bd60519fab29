//! Compressed snapshot writer and run-summary log
//!
//! A snapshot file is always created fresh: if a file with the same name
//! already exists (same root persisted twice on one day) the pass fails
//! with [`PersistError::OutputExists`] instead of touching it. Partial
//! output never appears under the final name.

use crate::config::PersistConfig;
use crate::error::{PersistError, PersistResult};
use crate::persist::schema::{
    output_file_name, RecordRow, RunSummaryEntry, RUN_LOG_FILE, SNAPSHOT_HEADER,
};
use crate::walker::Snapshot;
use chrono::Local;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Write every snapshot entry, in discovery order, to a new gzip CSV file
///
/// Rows are encoded into a temporary file next to `path`, which is only
/// linked into place once complete. A failed write leaves nothing behind.
/// Returns the number of data rows written.
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> PersistResult<u64> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staging = NamedTempFile::new_in(dir).map_err(|e| PersistError::io(dir, e))?;
    let rows = encode_rows(staging.as_file_mut(), snapshot, path)?;

    staging.persist_noclobber(path).map_err(|e| {
        let err = io::Error::from(e);
        match err.kind() {
            io::ErrorKind::AlreadyExists => PersistError::OutputExists {
                path: path.to_path_buf(),
            },
            _ => PersistError::io(path, err),
        }
    })?;

    debug!(rows, "Wrote snapshot to {}", path.display());
    Ok(rows)
}

/// Gzip-compressed CSV encoding of a snapshot; `path` labels errors
fn encode_rows<W: Write>(out: W, snapshot: &Snapshot, path: &Path) -> PersistResult<u64> {
    let encoder = GzEncoder::new(BufWriter::new(out), Compression::default());
    let mut writer = csv::Writer::from_writer(encoder);

    let mut rows = 0u64;
    for status in snapshot {
        writer.serialize(RecordRow::from(status))?;
        rows += 1;
    }

    // csv writes the header with the first record
    if rows == 0 {
        writer.write_record(SNAPSHOT_HEADER)?;
    }

    writer.flush().map_err(|e| PersistError::io(path, e))?;
    let encoder = writer
        .into_inner()
        .map_err(|e| PersistError::io(path, e.into_error()))?;
    let mut inner = encoder.finish().map_err(|e| PersistError::io(path, e))?;
    inner.flush().map_err(|e| PersistError::io(path, e))?;

    Ok(rows)
}

/// Decode a snapshot file written by [`write_snapshot`]
pub fn read_snapshot_rows(path: &Path) -> PersistResult<Vec<RecordRow>> {
    let file = File::open(path).map_err(|e| PersistError::io(path, e))?;
    let mut reader = csv::Reader::from_reader(GzDecoder::new(file));

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Append one row to the run-summary log, creating the log if needed
pub fn append_run_summary(log_path: &Path, entry: &RunSummaryEntry) -> PersistResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|e| PersistError::io(log_path, e))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer.serialize(entry)?;
    writer.flush().map_err(|e| PersistError::io(log_path, e))?;

    Ok(())
}

/// Path of the run-summary log for a data directory
pub fn run_log_path(data_dir: &Path) -> PathBuf {
    data_dir.join(RUN_LOG_FILE)
}

/// Persist a snapshot and, unless suppressed, log the run
pub fn persist(
    snapshot: &Snapshot,
    root: &Path,
    elapsed: Duration,
    config: &PersistConfig,
) -> PersistResult<RunSummaryEntry> {
    if !config.data_dir.is_dir() {
        return Err(PersistError::MissingOutputDir {
            path: config.data_dir.clone(),
        });
    }

    let now = Local::now();
    let filename = output_file_name(root, now.date_naive());
    let output_path = config.data_dir.join(&filename);

    let rows = write_snapshot(&output_path, snapshot)?;
    info!(rows, "Saved metadata to {}", output_path.display());

    let entry = RunSummaryEntry {
        output_filename: filename,
        timestamp: now.to_rfc3339(),
        platform: std::env::consts::OS.to_string(),
        elapsed_seconds: elapsed.as_secs_f64(),
        reserved_1: String::new(),
        reserved_2: String::new(),
    };

    if config.write_metadata_log {
        let log_path = run_log_path(&config.data_dir);
        append_run_summary(&log_path, &entry)?;
        debug!("Appended run summary to {}", log_path.display());
    }

    Ok(entry)
}
