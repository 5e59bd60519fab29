//! Frequency histograms
//!
//! Analyses hand their dataset to a [`HistogramRenderer`] as a lazy
//! sequence plus axis labels. [`TerminalHistogram`] draws equal-width bins
//! as horizontal bars whose length is proportional to the logarithm of the
//! bin frequency.

use console::{style, Term};
use std::io::{self, Write};
use tracing::debug;

/// Label for the frequency axis
pub const FREQUENCY_LABEL: &str = "Frequency (logarithmic)";

/// Consumer of a numeric dataset
pub trait HistogramRenderer {
    fn render(&mut self, values: &mut dyn Iterator<Item = f64>, x_label: &str, title: &str);
}

/// One histogram bin, `[lower, upper)` except the last which is closed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Split values into `bins` equal-width bins spanning min..=max
pub fn bin_counts(values: &[f64], bins: usize) -> Vec<Bin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // All values equal: a single bin holds everything
    if max <= min {
        return vec![Bin {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut result: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            lower: min + width * i as f64,
            upper: min + width * (i + 1) as f64,
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        result[idx].count += 1;
    }

    result
}

/// Draws histograms on stdout
pub struct TerminalHistogram {
    term: Term,
    bins: usize,
    bar_width: usize,
}

impl TerminalHistogram {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            bins: 20,
            bar_width: 50,
        }
    }

    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins.max(1);
        self
    }

    fn lines(&self, values: &[f64], x_label: &str, title: &str) -> Vec<String> {
        let bins = bin_counts(values, self.bins);
        let peak = bins.iter().map(|b| b.count).max().unwrap_or(0);
        let scale = ((peak + 1) as f64).ln();

        let mut lines = Vec::with_capacity(bins.len() + 4);
        lines.push(style(title).bold().to_string());
        lines.push(format!("{} / {}", x_label, FREQUENCY_LABEL));

        for bin in &bins {
            let len = if bin.count == 0 || scale == 0.0 {
                0
            } else {
                (((bin.count + 1) as f64).ln() / scale * self.bar_width as f64).ceil() as usize
            };
            lines.push(format!(
                "{:>12.2} - {:<12.2} {} {}",
                bin.lower,
                bin.upper,
                style("█".repeat(len)).cyan(),
                bin.count
            ));
        }

        lines.push(String::new());
        lines
    }

    fn write_to<W: Write>(
        &self,
        out: &mut W,
        values: &[f64],
        x_label: &str,
        title: &str,
    ) -> io::Result<()> {
        for line in self.lines(values, x_label, title) {
            writeln!(out, "{}", line)?;
        }
        out.flush()
    }
}

impl Default for TerminalHistogram {
    fn default() -> Self {
        Self::new()
    }
}

impl HistogramRenderer for TerminalHistogram {
    fn render(&mut self, values: &mut dyn Iterator<Item = f64>, x_label: &str, title: &str) {
        let values: Vec<f64> = values.collect();
        let mut term = &self.term;
        if let Err(e) = self.write_to(&mut term, &values, x_label, title) {
            debug!("Failed to draw histogram '{}': {}", title, e);
        }
    }
}
