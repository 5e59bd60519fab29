//! Configuration types for fsmeta-walker
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation, split per component so the
//!   walker, the analyzers and the persistence pass each receive only the
//!   options they act on

use crate::error::ConfigError;
use clap::Parser;
use std::path::PathBuf;

/// Default directory for compressed snapshots and the run-summary log
pub const DEFAULT_DATA_DIR: &str = "data";

/// Recursive filesystem metadata crawler
#[derive(Parser, Debug, Clone)]
#[command(
    name = "fsmeta-walker",
    version,
    about = "Recursively collect filesystem metadata and report statistics",
    long_about = "Walks a directory tree depth-first, capturing lstat metadata for every entry.\n\n\
                  Optionally reports mean/max/min file size, link count and age, renders\n\
                  frequency histograms, and persists the raw metadata as a compressed CSV.",
    after_help = "EXAMPLES:\n    \
        fsmeta-walker /usr --size --links\n    \
        fsmeta-walker /home -s --histogram\n    \
        fsmeta-walker /var/log -c            # write data/var-log_<date>.csv.gz\n    \
        fsmeta-walker /etc -c --nometadata   # skip data/datafiles.csv"
)]
pub struct CliArgs {
    /// Root directory from which to begin traversal
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Analyze file size
    #[arg(short = 's', long)]
    pub size: bool,

    /// Analyze file link count
    #[arg(short = 'l', long)]
    pub links: bool,

    /// Analyze file age (days since last modification)
    #[arg(short = 'a', long)]
    pub age: bool,

    /// Render a histogram for each requested analysis
    #[arg(long)]
    pub histogram: bool,

    /// Verbose mode: trace every visited path
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Write the raw metadata to a compressed CSV
    #[arg(short = 'c', long)]
    pub csv: bool,

    /// Do not append a run summary to datafiles.csv
    #[arg(long)]
    pub nometadata: bool,

    /// Quiet mode - suppress the progress spinner
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Count zero-byte regular files in size statistics
    #[arg(long)]
    pub include_empty: bool,

    /// Directory for CSV output and the run-summary log
    #[arg(long, default_value = DEFAULT_DATA_DIR, value_name = "DIR")]
    pub data_dir: PathBuf,
}

/// Options consumed by the walker
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// Directory the walk starts from
    pub root: PathBuf,

    /// Report each visited path before it is stat-ed
    pub verbose: bool,
}

impl WalkConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            verbose: false,
        }
    }
}

/// Options consumed by the statistics passes
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    /// Log per-value detail (sorted sizes)
    pub verbose: bool,

    /// Hand the dataset to the histogram renderer
    pub collect_histogram_data: bool,

    /// Keep zero-byte regular files in the size dataset
    pub include_empty_files: bool,

    /// Root path as shown in histogram titles
    pub root_label: String,
}

/// Options consumed by the persistence pass
#[derive(Debug, Clone)]
pub struct PersistConfig {
    /// Output directory; must already exist
    pub data_dir: PathBuf,

    /// Append a row to the run-summary log
    pub write_metadata_log: bool,
}

impl Default for PersistConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            write_metadata_log: true,
        }
    }
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub walk: WalkConfig,
    pub analysis: AnalysisConfig,
    pub persist: PersistConfig,

    /// Run the size pass
    pub analyze_size: bool,

    /// Run the link-count pass
    pub analyze_links: bool,

    /// Run the age pass
    pub analyze_age: bool,

    /// Run the persistence pass
    pub write_csv: bool,

    /// Show progress spinner
    pub show_progress: bool,
}

impl RunConfig {
    /// Create and validate configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        if !args.directory.exists() {
            return Err(ConfigError::InvalidRoot {
                path: args.directory,
                reason: "does not exist".to_string(),
            });
        }

        if !args.directory.is_dir() {
            return Err(ConfigError::InvalidRoot {
                path: args.directory,
                reason: "not a directory".to_string(),
            });
        }

        let root_label = args.directory.display().to_string();

        Ok(Self {
            walk: WalkConfig {
                root: args.directory,
                verbose: args.verbose,
            },
            analysis: AnalysisConfig {
                verbose: args.verbose,
                collect_histogram_data: args.histogram,
                include_empty_files: args.include_empty,
                root_label,
            },
            persist: PersistConfig {
                data_dir: args.data_dir,
                write_metadata_log: !args.nometadata,
            },
            analyze_size: args.size,
            analyze_links: args.links,
            analyze_age: args.age,
            write_csv: args.csv,
            // The spinner would interleave with per-path trace lines
            show_progress: !args.quiet && !args.verbose,
        })
    }
}
