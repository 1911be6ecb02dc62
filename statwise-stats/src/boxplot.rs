//! Box-Plot Summary
//!
//! Quartiles use the exclusive-median method: the sorted sample is split at
//! its midpoint (the median element is left out of both halves when n is
//! odd) and Q1/Q3 are the medians of the halves.
//!
//! Values outside `[Q1 − 1.5·IQR, Q3 + 1.5·IQR]` are reported as outliers and
//! do not count towards the whisker min/max.

use crate::error::StatsError;
use serde::{Deserialize, Serialize};

/// Fence multiplier applied to the IQR
const FENCE_MULTIPLIER: f64 = 1.5;

/// Five-number summary with IQR fencing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotSummary {
    /// Smallest value inside the fences
    pub min: f64,
    /// First quartile
    pub q1: f64,
    /// Median
    pub median: f64,
    /// Third quartile
    pub q3: f64,
    /// Largest value inside the fences
    pub max: f64,
    /// Q3 − Q1
    pub iqr: f64,
    /// Q1 − 1.5·IQR
    pub lower_fence: f64,
    /// Q3 + 1.5·IQR
    pub upper_fence: f64,
    /// Values outside the fences, in ascending order
    pub outliers: Vec<f64>,
}

impl BoxPlotSummary {
    /// Number of values outside the fences
    pub fn outlier_count(&self) -> usize {
        self.outliers.len()
    }
}

/// Median of an already-sorted, non-empty slice
fn sorted_median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

/// Median of an unsorted sample; `None` when empty
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(sorted_median(&sorted_copy(values)))
}

/// Compute the box-plot summary of `values`
pub fn box_plot(values: &[f64]) -> Result<BoxPlotSummary, StatsError> {
    if values.is_empty() {
        return Err(StatsError::insufficient(1, 0));
    }

    let sorted = sorted_copy(values);
    let n = sorted.len();
    let median = sorted_median(&sorted);

    let (q1, q3) = if n == 1 {
        (median, median)
    } else {
        let lower = &sorted[..n / 2];
        let upper = &sorted[(n + 1) / 2..];
        (sorted_median(lower), sorted_median(upper))
    };

    let iqr = q3 - q1;
    let lower_fence = q1 - FENCE_MULTIPLIER * iqr;
    let upper_fence = q3 + FENCE_MULTIPLIER * iqr;

    let (inside, outliers): (Vec<f64>, Vec<f64>) = sorted
        .iter()
        .partition(|&&x| x >= lower_fence && x <= upper_fence);

    // The median always lies inside the fences, so `inside` is never empty
    let min = inside.first().copied().unwrap_or(median);
    let max = inside.last().copied().unwrap_or(median);

    Ok(BoxPlotSummary {
        min,
        q1,
        median,
        q3,
        max,
        iqr,
        lower_fence,
        upper_fence,
        outliers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odd_length_excludes_median() {
        let summary = box_plot(&[7.0, 1.0, 3.0, 5.0, 9.0, 11.0, 13.0]).unwrap();
        // Halves are [1, 3, 5] and [9, 11, 13]
        assert_eq!(summary.median, 7.0);
        assert_eq!(summary.q1, 3.0);
        assert_eq!(summary.q3, 11.0);
        assert_eq!(summary.iqr, 8.0);
        assert!(summary.outliers.is_empty());
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 13.0);
    }

    #[test]
    fn test_even_length() {
        let summary = box_plot(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]).unwrap();
        assert_eq!(summary.median, 4.5);
        assert_eq!(summary.q1, 2.5);
        assert_eq!(summary.q3, 6.5);
    }

    #[test]
    fn test_outliers_excluded_from_whiskers() {
        let summary = box_plot(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
        // Q1 = 2, Q3 = 5, upper fence = 9.5
        assert_eq!(summary.outliers, vec![100.0]);
        assert_eq!(summary.outlier_count(), 1);
        assert_eq!(summary.max, 5.0);
        assert_eq!(summary.min, 1.0);
    }

    #[test]
    fn test_single_value() {
        let summary = box_plot(&[42.0]).unwrap();
        assert_eq!(summary.q1, 42.0);
        assert_eq!(summary.median, 42.0);
        assert_eq!(summary.q3, 42.0);
        assert_eq!(summary.min, 42.0);
        assert_eq!(summary.max, 42.0);
    }

    #[test]
    fn test_empty() {
        assert!(matches!(
            box_plot(&[]),
            Err(StatsError::InsufficientData { .. })
        ));
        assert!(median(&[]).is_none());
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }
}
