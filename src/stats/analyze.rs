//! Size, link-count and age analyses
//!
//! Dataset rules:
//! - size: regular files only, chosen by mode bits; zero-byte files are
//!   left out unless `include_empty_files` is set
//! - links: every captured record, whatever its type; error markers carry
//!   no link count and are skipped
//! - age: whole days since last modification, regular files only

use crate::config::AnalysisConfig;
use crate::error::AnalysisResult;
use crate::histogram::HistogramRenderer;
use crate::stats::{summarize, Summary};
use crate::walker::Snapshot;
use humansize::{format_size, BINARY};
use std::time::SystemTime;
use tracing::debug;

const SECS_PER_DAY: i64 = 86_400;

/// Which property a summary describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Size,
    Links,
    Age,
}

impl Dimension {
    /// Short name used in errors
    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Size => "size",
            Dimension::Links => "links",
            Dimension::Age => "age",
        }
    }

    /// Noun used in report lines ("Average file size")
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Size => "file size",
            Dimension::Links => "link count",
            Dimension::Age => "file age",
        }
    }

    fn histogram_axis(&self) -> &'static str {
        match self {
            Dimension::Size => "File size in kB",
            Dimension::Links => "Number of links",
            Dimension::Age => "Days since last modification",
        }
    }

    fn histogram_title(&self, root: &str) -> String {
        let what = match self {
            Dimension::Size => "file sizes",
            Dimension::Links => "link frequency",
            Dimension::Age => "file ages",
        };
        format!("Histogram of {} in tree starting at {}", what, root)
    }
}

/// Sizes of regular files eligible for size statistics
pub fn size_dataset(snapshot: &Snapshot, include_empty_files: bool) -> Vec<u64> {
    snapshot
        .records()
        .filter(|r| r.entry_type().is_file())
        .filter(|r| include_empty_files || r.size > 0)
        .map(|r| r.size)
        .collect()
}

/// Link counts of every captured record
pub fn link_dataset(snapshot: &Snapshot) -> Vec<u64> {
    snapshot.records().map(|r| r.link_count).collect()
}

/// Whole days between each regular file's mtime and `now`
///
/// Files modified in the future count as age zero.
pub fn age_dataset(snapshot: &Snapshot, now: SystemTime) -> Vec<u64> {
    let now_secs = match now.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(e) => -(e.duration().as_secs() as i64),
    };

    snapshot
        .records()
        .filter(|r| r.entry_type().is_file())
        .map(|r| now_secs.saturating_sub(r.mtime).max(0) / SECS_PER_DAY)
        .map(|days| days as u64)
        .collect()
}

/// Mean/max/min file size
pub fn analyze_size(
    snapshot: &Snapshot,
    config: &AnalysisConfig,
    histogram: &mut dyn HistogramRenderer,
) -> AnalysisResult<Summary<u64>> {
    let sizes = size_dataset(snapshot, config.include_empty_files);

    if config.verbose {
        let mut sorted = sizes.clone();
        sorted.sort_unstable();
        for size in sorted {
            debug!("Found a {} file", format_size(size, BINARY));
        }
    }

    let summary = summarize(Dimension::Size, &sizes)?;

    if config.collect_histogram_data {
        let mut kilobytes = sizes.iter().map(|&b| b as f64 / 1024.0);
        render(histogram, Dimension::Size, &mut kilobytes, &config.root_label);
    }

    Ok(summary)
}

/// Mean/max/min hard link count
pub fn analyze_links(
    snapshot: &Snapshot,
    config: &AnalysisConfig,
    histogram: &mut dyn HistogramRenderer,
) -> AnalysisResult<Summary<u64>> {
    let links = link_dataset(snapshot);

    let skipped = snapshot.error_count();
    if skipped > 0 {
        debug!(skipped, "Error markers excluded from link statistics");
    }

    let summary = summarize(Dimension::Links, &links)?;

    if config.collect_histogram_data {
        let mut values = links.iter().map(|&n| n as f64);
        render(histogram, Dimension::Links, &mut values, &config.root_label);
    }

    Ok(summary)
}

/// Mean/max/min age in days relative to `now`
pub fn analyze_age(
    snapshot: &Snapshot,
    now: SystemTime,
    config: &AnalysisConfig,
    histogram: &mut dyn HistogramRenderer,
) -> AnalysisResult<Summary<u64>> {
    let ages = age_dataset(snapshot, now);
    let summary = summarize(Dimension::Age, &ages)?;

    if config.collect_histogram_data {
        let mut values = ages.iter().map(|&d| d as f64);
        render(histogram, Dimension::Age, &mut values, &config.root_label);
    }

    Ok(summary)
}

fn render(
    histogram: &mut dyn HistogramRenderer,
    dimension: Dimension,
    values: &mut dyn Iterator<Item = f64>,
    root: &str,
) {
    let title = dimension.histogram_title(root);
    histogram.render(values, dimension.histogram_axis(), &title);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AnalysisError, EntryErrorKind};
    use crate::fs::types::{EntryStatus, ErrorMarker, FileRecord};
    use crate::stats::Statistic;
    use std::time::Duration;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(Vec<f64>, String, String)>,
    }

    impl HistogramRenderer for Recorder {
        fn render(&mut self, values: &mut dyn Iterator<Item = f64>, x_label: &str, title: &str) {
            self.calls
                .push((values.collect(), x_label.to_string(), title.to_string()));
        }
    }

    fn rec(path: &str, mode: u32, size: u64, links: u64) -> EntryStatus {
        EntryStatus::Record(FileRecord {
            path: path.into(),
            mode,
            inode: 1,
            device: 1,
            link_count: links,
            uid: 0,
            gid: 0,
            size,
            atime: 0,
            mtime: 0,
            ctime: 0,
        })
    }

    fn file(path: &str, size: u64) -> EntryStatus {
        rec(path, 0o100644, size, 1)
    }

    fn dir(path: &str, size: u64) -> EntryStatus {
        rec(path, 0o040755, size, 2)
    }

    fn marker(path: &str) -> EntryStatus {
        EntryStatus::Failed(ErrorMarker {
            path: path.into(),
            kind: EntryErrorKind::System,
            reason: "gone".into(),
        })
    }

    fn config() -> AnalysisConfig {
        AnalysisConfig {
            root_label: "/r".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_size_scenario() {
        let snapshot: Snapshot = vec![
            rec("/r/sub", 0o040755, 0, 1),
            file("/r/a", 100),
            file("/r/b", 300),
        ]
        .into_iter()
        .collect();

        let summary = analyze_size(&snapshot, &config(), &mut Recorder::default()).unwrap();
        assert_eq!(summary.samples, 2);
        assert_eq!(summary.mean.value, 200.0);
        assert_eq!(summary.max, Statistic { value: 300, occurrences: 1 });
        assert_eq!(summary.min, Statistic { value: 100, occurrences: 1 });
    }

    #[test]
    fn test_size_excludes_zero_and_non_files() {
        let snapshot: Snapshot = vec![
            file("/r/a", 10),
            file("/r/b", 20),
            file("/r/empty", 0),
            dir("/r/d", 4096),
            rec("/r/link", 0o120777, 7, 1),
            marker("/r/gone"),
        ]
        .into_iter()
        .collect();

        let summary = analyze_size(&snapshot, &config(), &mut Recorder::default()).unwrap();
        assert_eq!(summary.samples, 2);
        assert_eq!(summary.mean.value, 15.0);

        let mut with_empty = config();
        with_empty.include_empty_files = true;
        let summary = analyze_size(&snapshot, &with_empty, &mut Recorder::default()).unwrap();
        assert_eq!(summary.samples, 3);
        assert_eq!(summary.min, Statistic { value: 0, occurrences: 1 });
    }

    #[test]
    fn test_size_only_directories_is_empty_dataset() {
        let snapshot: Snapshot = vec![dir("/r/a", 0), dir("/r/a/b", 0)].into_iter().collect();
        let err = analyze_size(&snapshot, &config(), &mut Recorder::default()).unwrap_err();
        assert_eq!(err, AnalysisError::EmptyDataset { dimension: "size" });
    }

    #[test]
    fn test_links_cover_all_records() {
        let snapshot: Snapshot = vec![
            rec("/r/sub", 0o040755, 0, 1),
            file("/r/a", 100),
            file("/r/b", 300),
        ]
        .into_iter()
        .collect();

        let summary = analyze_links(&snapshot, &config(), &mut Recorder::default()).unwrap();
        assert_eq!(summary.samples, 3);
        assert_eq!(summary.mean, Statistic { value: 1.0, occurrences: 3 });
        assert_eq!(summary.max, Statistic { value: 1, occurrences: 3 });
        assert_eq!(summary.min, Statistic { value: 1, occurrences: 3 });
    }

    #[test]
    fn test_links_skip_markers() {
        let snapshot: Snapshot = vec![dir("/r/d", 0), marker("/r/gone"), file("/r/f", 1)]
            .into_iter()
            .collect();

        let summary = analyze_links(&snapshot, &config(), &mut Recorder::default()).unwrap();
        assert_eq!(summary.samples, 2);
        assert_eq!(summary.max, Statistic { value: 2, occurrences: 1 });
        assert_eq!(summary.min, Statistic { value: 1, occurrences: 1 });
        assert!(summary.max.occurrences <= snapshot.len());
    }

    #[test]
    fn test_links_only_markers_is_empty_dataset() {
        let snapshot: Snapshot = vec![marker("/r/gone")].into_iter().collect();
        let err = analyze_links(&snapshot, &config(), &mut Recorder::default()).unwrap_err();
        assert_eq!(err, AnalysisError::EmptyDataset { dimension: "links" });
    }

    #[test]
    fn test_histogram_only_when_requested() {
        let snapshot: Snapshot = vec![file("/r/a", 2048), file("/r/b", 1024)].into_iter().collect();

        let mut recorder = Recorder::default();
        analyze_size(&snapshot, &config(), &mut recorder).unwrap();
        assert!(recorder.calls.is_empty());

        let mut cfg = config();
        cfg.collect_histogram_data = true;
        analyze_size(&snapshot, &cfg, &mut recorder).unwrap();
        analyze_links(&snapshot, &cfg, &mut recorder).unwrap();

        assert_eq!(recorder.calls.len(), 2);
        let (values, x_label, title) = &recorder.calls[0];
        assert_eq!(values, &vec![2.0, 1.0]);
        assert_eq!(x_label, "File size in kB");
        assert_eq!(title, "Histogram of file sizes in tree starting at /r");
        assert_eq!(recorder.calls[1].1, "Number of links");
    }

    #[test]
    fn test_age_in_whole_days() {
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(10 * 86_400 + 5);
        let mut young = FileRecord {
            path: "/r/young".into(),
            mode: 0o100644,
            inode: 1,
            device: 1,
            link_count: 1,
            uid: 0,
            gid: 0,
            size: 1,
            atime: 0,
            mtime: 9 * 86_400,
            ctime: 0,
        };
        let mut future = young.clone();
        future.path = "/r/future".into();
        future.mtime = 20 * 86_400;
        let old = FileRecord { path: "/r/old".into(), mtime: 0, ..young.clone() };
        young.size = 2;

        let snapshot: Snapshot = vec![
            EntryStatus::Record(young),
            EntryStatus::Record(future),
            EntryStatus::Record(old),
            dir("/r/d", 0),
        ]
        .into_iter()
        .collect();

        assert_eq!(age_dataset(&snapshot, now), vec![1, 0, 10]);

        let summary = analyze_age(&snapshot, now, &config(), &mut Recorder::default()).unwrap();
        assert_eq!(summary.max, Statistic { value: 10, occurrences: 1 });
        assert_eq!(summary.min, Statistic { value: 0, occurrences: 1 });
    }

    #[test]
    fn test_age_extreme_mtimes() {
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(86_400);
        let snapshot: Snapshot = [i64::MIN, i64::MAX]
            .into_iter()
            .enumerate()
            .map(|(i, mtime)| {
                EntryStatus::Record(FileRecord {
                    path: format!("/r/{}", i).into(),
                    mode: 0o100644,
                    inode: 1,
                    device: 1,
                    link_count: 1,
                    uid: 0,
                    gid: 0,
                    size: 1,
                    atime: 0,
                    mtime,
                    ctime: 0,
                })
            })
            .collect();

        let ages = age_dataset(&snapshot, now);
        assert_eq!(ages, vec![(i64::MAX / 86_400) as u64, 0]);
    }
}
