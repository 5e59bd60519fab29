//! fsmeta-walker - Filesystem Metadata Crawler
//!
//! Entry point for the CLI application.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use fsmeta_walker::config::{CliArgs, RunConfig};
use fsmeta_walker::histogram::TerminalHistogram;
use fsmeta_walker::persist::persist;
use fsmeta_walker::progress::{print_header, print_stats, print_walk_summary, ProgressReporter};
use fsmeta_walker::stats::{analyze_age, analyze_links, analyze_size, Dimension};
use fsmeta_walker::walker::Walker;
use std::process::ExitCode;
use std::time::SystemTime;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Setup logging
    setup_logging(args.verbose)?;

    // Validate and create config
    let config = RunConfig::from_args(args).context("Invalid configuration")?;

    let requested: Vec<Dimension> = [
        (config.analyze_size, Dimension::Size),
        (config.analyze_links, Dimension::Links),
        (config.analyze_age, Dimension::Age),
    ]
    .into_iter()
    .filter_map(|(on, dim)| on.then_some(dim))
    .collect();

    if config.show_progress {
        print_header(&config.analysis.root_label, &requested, config.write_csv);
    }

    let mut progress = config.show_progress.then(ProgressReporter::new);
    if let Some(ref p) = progress {
        p.set_status("Traversing...");
    }

    // Run the walk
    let walker = Walker::new(config.walk.clone());
    let result = walker
        .traverse_with_observer(|path| {
            if let Some(ref mut p) = progress {
                p.visit(path);
            }
        })
        .context("Walk failed")?;

    if let Some(ref p) = progress {
        p.finish_and_clear();
    }

    print_walk_summary(&result.stats);

    if config.write_csv {
        let entry = persist(
            &result.snapshot,
            &config.walk.root,
            result.stats.duration,
            &config.persist,
        )
        .context("Failed to persist metadata")?;
        info!("Metadata written to {}", entry.output_filename);
    }

    // Each pass fails on its own; the others still run
    let mut histogram = TerminalHistogram::new();
    let now = SystemTime::now();
    let mut failed = 0;

    for dimension in requested {
        let outcome = match dimension {
            Dimension::Size => analyze_size(&result.snapshot, &config.analysis, &mut histogram),
            Dimension::Links => analyze_links(&result.snapshot, &config.analysis, &mut histogram),
            Dimension::Age => {
                analyze_age(&result.snapshot, now, &config.analysis, &mut histogram)
            }
        };

        match outcome {
            Ok(summary) => print_stats(&summary),
            Err(e) => {
                error!("{} analysis failed: {}", dimension.name(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(anyhow!("{} analysis pass(es) failed", failed));
    }

    if result.stats.errors > 0 {
        info!(errors = result.stats.errors, "Walk completed with errors");
    }

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("fsmeta_walker=debug,warn")
    } else {
        EnvFilter::new("fsmeta_walker=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}
