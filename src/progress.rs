//! Progress and report output
//!
//! Provides the traversal spinner (indicatif) and the console-styled
//! header, walk summary and statistics lines.

use crate::stats::{Dimension, Statistic, Summary};
use crate::walker::WalkStats;
use console::style;
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Refresh the spinner message every this many entries
const UPDATE_EVERY: u64 = 256;

/// Spinner shown while the walk runs
pub struct ProgressReporter {
    bar: ProgressBar,
    visited: u64,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();

        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar, visited: 0 }
    }

    /// Record one visited path
    pub fn visit(&mut self, path: &Path) {
        self.visited += 1;
        if self.visited % UPDATE_EVERY == 1 {
            self.bar.set_message(format!(
                "Entries: {} | {}",
                format_number(self.visited),
                path.display()
            ));
        }
    }

    /// Set a status message
    pub fn set_status(&self, status: &str) {
        self.bar.set_message(status.to_string());
    }

    /// Finish and clear the progress display
    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let bytes: Vec<_> = s.bytes().rev().collect();

    let chunks: Vec<String> = bytes
        .chunks(3)
        .map(|chunk| chunk.iter().rev().map(|&b| b as char).collect::<String>())
        .collect();

    chunks.into_iter().rev().collect::<Vec<_>>().join(",")
}

/// Print a header at the start of the run
pub fn print_header(root: &str, analyses: &[Dimension], csv: bool) {
    let analyses = if analyses.is_empty() {
        "none".to_string()
    } else {
        analyses
            .iter()
            .map(|d| d.name())
            .collect::<Vec<_>>()
            .join(", ")
    };

    println!();
    println!(
        "{} {}",
        style("fsmeta-walker").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Root:").bold(), root);
    println!("  {} {}", style("Analyses:").bold(), analyses);
    println!("  {} {}", style("CSV:").bold(), if csv { "yes" } else { "no" });
    println!();
}

/// Print a summary of the walk
pub fn print_walk_summary(stats: &WalkStats) {
    println!(
        "Filesystem traversed in {:.6} seconds\n",
        stats.duration.as_secs_f64()
    );
    println!("  {} {}", style("Directories:").bold(), format_number(stats.dirs));
    println!("  {} {}", style("Files:").bold(), format_number(stats.files));
    println!("  {} {}", style("Other:").bold(), format_number(stats.others));
    println!("  {} {}", style("Total Size:").bold(), format_size(stats.bytes, BINARY));
    println!(
        "  {} {:.0} entries/sec",
        style("Rate:").bold(),
        stats.entries_per_second()
    );
    if stats.errors > 0 {
        println!(
            "  {} {}",
            style("Errors:").yellow().bold(),
            format_number(stats.errors)
        );
    }
    println!();
}

/// Render the three statistic lines for a summary
pub fn summary_lines(summary: &Summary<u64>) -> [String; 3] {
    let dim = summary.dimension;
    let mean = format_value(dim, summary.mean.value);
    let line = |name: &str, value: String, occurrences: usize| {
        format!(
            "{} {}:\t{}\t({} {})",
            name,
            dim.label(),
            value,
            occurrences,
            if occurrences == 1 { "file" } else { "files" }
        )
    };

    let Statistic { value: max, occurrences: max_n } = summary.max;
    let Statistic { value: min, occurrences: min_n } = summary.min;

    [
        line("Average", mean, summary.mean.occurrences),
        line("Maximum", format_value(dim, max as f64), max_n),
        line("Minimum", format_value(dim, min as f64), min_n),
    ]
}

/// Print the statistic lines for a summary
pub fn print_stats(summary: &Summary<u64>) {
    for line in summary_lines(summary) {
        println!("{}", line);
    }
    println!();
}

fn format_value(dimension: Dimension, value: f64) -> String {
    match dimension {
        Dimension::Size => format_size(value.round() as u64, BINARY),
        Dimension::Links => format!("{}", value),
        Dimension::Age => format!("{:.1} days", value),
    }
}
