//! Descriptive statistics over a snapshot
//!
//! Each analysis pass filters the snapshot down to a dataset, then reports
//! mean, maximum and minimum together with how many values in the dataset
//! equal each statistic exactly.

pub mod analyze;

pub use analyze::{
    age_dataset, analyze_age, analyze_links, analyze_size, link_dataset, size_dataset, Dimension,
};

use crate::error::{AnalysisError, AnalysisResult};

/// A value usable in a dataset
pub trait Sample: Copy + PartialOrd {
    fn as_f64(self) -> f64;
}

impl Sample for u64 {
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl Sample for f64 {
    fn as_f64(self) -> f64 {
        self
    }
}

/// A statistic and the number of dataset values equal to it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistic<T> {
    pub value: T,
    pub occurrences: usize,
}

/// Mean, max and min of one dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Summary<T> {
    pub dimension: Dimension,
    /// Dataset size (the mean's denominator)
    pub samples: usize,
    /// Occurrences may be zero: the mean is rarely a member of the dataset
    pub mean: Statistic<f64>,
    pub max: Statistic<T>,
    pub min: Statistic<T>,
}

/// Arithmetic mean; an empty dataset has none
pub fn mean<T: Sample>(values: &[T]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().map(|v| v.as_f64()).sum();
    Some(sum / values.len() as f64)
}

/// Compute mean/max/min with occurrence counts
pub fn summarize<T: Sample>(dimension: Dimension, values: &[T]) -> AnalysisResult<Summary<T>> {
    let empty = || AnalysisError::EmptyDataset {
        dimension: dimension.name(),
    };

    let mean = mean(values).ok_or_else(empty)?;
    let (&first, rest) = values.split_first().ok_or_else(empty)?;

    let (min, max) = rest.iter().fold((first, first), |(lo, hi), &v| {
        (
            if v < lo { v } else { lo },
            if v > hi { v } else { hi },
        )
    });

    Ok(Summary {
        dimension,
        samples: values.len(),
        mean: Statistic {
            value: mean,
            occurrences: values.iter().filter(|v| v.as_f64() == mean).count(),
        },
        max: Statistic {
            value: max,
            occurrences: values.iter().filter(|&&v| v == max).count(),
        },
        min: Statistic {
            value: min,
            occurrences: values.iter().filter(|&&v| v == min).count(),
        },
    })
}
