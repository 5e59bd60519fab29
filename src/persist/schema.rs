//! Tabular layout of persisted metadata
//!
//! Two files live in the data directory:
//! - `<root>_<YYYY-MM-DD>.csv.gz`: one row per snapshot entry, with header
//! - `datafiles.csv`: append-only run log, one headerless row per run

use crate::fs::types::EntryStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the run-summary log inside the data directory
pub const RUN_LOG_FILE: &str = "datafiles.csv";

/// Extension of snapshot files
pub const SNAPSHOT_EXTENSION: &str = "csv.gz";

/// Column order of snapshot files
pub const SNAPSHOT_HEADER: &[&str] = &[
    "path",
    "mode",
    "inode",
    "device",
    "linkCount",
    "ownerUid",
    "ownerGid",
    "sizeBytes",
    "accessTime",
    "modifyTime",
    "changeTime",
];

/// One snapshot row; error markers leave every column but `path` empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRow {
    /// Display form; bytes that are not UTF-8 are replaced
    pub path: String,
    pub mode: Option<u32>,
    pub inode: Option<u64>,
    pub device: Option<u64>,
    pub link_count: Option<u64>,
    pub owner_uid: Option<u32>,
    pub owner_gid: Option<u32>,
    pub size_bytes: Option<u64>,
    pub access_time: Option<i64>,
    pub modify_time: Option<i64>,
    pub change_time: Option<i64>,
}

impl RecordRow {
    /// Returns true if this row came from an error marker
    pub fn is_marker(&self) -> bool {
        self.mode.is_none()
    }
}

impl From<&EntryStatus> for RecordRow {
    fn from(status: &EntryStatus) -> Self {
        match status {
            EntryStatus::Record(r) => Self {
                path: r.path.to_string_lossy().into_owned(),
                mode: Some(r.mode),
                inode: Some(r.inode),
                device: Some(r.device),
                link_count: Some(r.link_count),
                owner_uid: Some(r.uid),
                owner_gid: Some(r.gid),
                size_bytes: Some(r.size),
                access_time: Some(r.atime),
                modify_time: Some(r.mtime),
                change_time: Some(r.ctime),
            },
            EntryStatus::Failed(m) => Self {
                path: m.path.to_string_lossy().into_owned(),
                mode: None,
                inode: None,
                device: None,
                link_count: None,
                owner_uid: None,
                owner_gid: None,
                size_bytes: None,
                access_time: None,
                modify_time: None,
                change_time: None,
            },
        }
    }
}

/// One row of the run-summary log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummaryEntry {
    pub output_filename: String,
    /// RFC 3339, local time
    pub timestamp: String,
    pub platform: String,
    pub elapsed_seconds: f64,
    pub reserved_1: String,
    pub reserved_2: String,
}

/// Deterministic snapshot file name for a root path and date
///
/// `/var/log` on 2024-03-01 becomes `var-log_2024-03-01.csv.gz`.
pub fn output_file_name(root: &Path, date: NaiveDate) -> String {
    let raw = root.to_string_lossy();

    let mut trimmed: &str = &raw;
    loop {
        let next = trimmed
            .trim_start_matches(['/', std::path::MAIN_SEPARATOR])
            .trim_start_matches("./");
        if next == trimmed {
            break;
        }
        trimmed = next;
    }
    let trimmed = trimmed.trim_end_matches(['/', std::path::MAIN_SEPARATOR]);

    let stem = if trimmed.is_empty() || trimmed == "." {
        "root".to_string()
    } else {
        trimmed.replace(['/', std::path::MAIN_SEPARATOR], "-")
    };

    format!("{}_{}.{}", stem, date.format("%Y-%m-%d"), SNAPSHOT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EntryErrorKind;
    use crate::fs::types::{ErrorMarker, FileRecord};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(
            output_file_name(Path::new("/var/log"), date()),
            "var-log_2024-03-01.csv.gz"
        );
        assert_eq!(
            output_file_name(Path::new("/var/log/"), date()),
            "var-log_2024-03-01.csv.gz"
        );
        assert_eq!(
            output_file_name(Path::new("./src/walker"), date()),
            "src-walker_2024-03-01.csv.gz"
        );
    }

    #[test]
    fn test_output_file_name_root() {
        assert_eq!(output_file_name(Path::new("/"), date()), "root_2024-03-01.csv.gz");
        assert_eq!(output_file_name(Path::new("."), date()), "root_2024-03-01.csv.gz");
    }

    #[test]
    fn test_row_from_record() {
        let status = EntryStatus::Record(FileRecord {
            path: "/r/a".into(),
            mode: 0o100644,
            inode: 10,
            device: 20,
            link_count: 1,
            uid: 1000,
            gid: 100,
            size: 512,
            atime: 1,
            mtime: 2,
            ctime: 3,
        });
        let row = RecordRow::from(&status);
        assert_eq!(row.size_bytes, Some(512));
        assert_eq!(row.link_count, Some(1));
        assert!(!row.is_marker());
    }

    #[test]
    fn test_row_from_marker() {
        let status = EntryStatus::Failed(ErrorMarker {
            path: "/r/gone".into(),
            kind: EntryErrorKind::System,
            reason: "gone".into(),
        });
        let row = RecordRow::from(&status);
        assert_eq!(row.path, "/r/gone");
        assert!(row.is_marker());
        assert_eq!(row.size_bytes, None);
    }
}
