//! Descriptive Statistics
//!
//! Single-sample description: central tendency, spread, shape and the
//! box-plot summary. Spread and shape are built on the two-pass
//! [`SummaryStats`], so the moments stay stable under large offsets.

use crate::boxplot::{BoxPlotSummary, box_plot};
use crate::error::StatsError;
use crate::summary::SummaryStats;
use serde::{Deserialize, Serialize};

/// Description of one sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptiveResult {
    /// Variable name
    pub name: String,
    /// Number of values
    pub n: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Median
    pub median: f64,
    /// Sample standard deviation (needs n >= 2)
    pub std_dev: Option<f64>,
    /// Sample variance (needs n >= 2)
    pub variance: Option<f64>,
    /// Standard error of the mean (needs n >= 2)
    pub standard_error: Option<f64>,
    /// Smallest value, outliers included
    pub min: f64,
    /// Largest value, outliers included
    pub max: f64,
    /// max − min
    pub range: f64,
    /// Adjusted Fisher-Pearson skewness (needs n >= 3 and spread)
    pub skewness: Option<f64>,
    /// Sample excess kurtosis (needs n >= 4 and spread)
    pub excess_kurtosis: Option<f64>,
    /// Quartiles, fences and outliers
    pub box_plot: BoxPlotSummary,
    /// Two-pass sums the figures above were derived from
    pub summary: SummaryStats,
}

impl DescriptiveResult {
    /// Coefficient of variation in percent (0 when the mean is 0)
    pub fn coefficient_of_variation(&self) -> f64 {
        match self.std_dev {
            Some(sd) if self.mean != 0.0 => (sd / self.mean.abs()) * 100.0,
            _ => 0.0,
        }
    }
}

/// Describe a non-empty sample
pub fn describe(values: &[f64], name: &str) -> Result<DescriptiveResult, StatsError> {
    if values.is_empty() {
        return Err(StatsError::insufficient(1, 0));
    }

    let summary = SummaryStats::from_sample(values);
    let box_plot = box_plot(values)?;

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let std_dev = summary.std_dev();

    Ok(DescriptiveResult {
        name: name.to_string(),
        n: summary.n,
        mean: summary.mean,
        median: box_plot.median,
        std_dev,
        variance: summary.variance(),
        standard_error: std_dev.map(|sd| sd / (summary.n as f64).sqrt()),
        min,
        max,
        range: max - min,
        skewness: skewness(values, &summary),
        excess_kurtosis: excess_kurtosis(values, &summary),
        box_plot,
        summary,
    })
}

/// Central moment of order `k` (n denominator)
fn central_moment(values: &[f64], mean: f64, k: i32) -> f64 {
    values.iter().map(|x| (x - mean).powi(k)).sum::<f64>() / values.len() as f64
}

/// Adjusted Fisher-Pearson skewness G1
pub(crate) fn skewness(values: &[f64], summary: &SummaryStats) -> Option<f64> {
    let n = summary.n as f64;
    let m2 = summary.population_variance()?;
    if summary.n < 3 || m2 == 0.0 {
        return None;
    }
    let m3 = central_moment(values, summary.mean, 3);
    let g1 = m3 / m2.powf(1.5);
    Some(g1 * (n * (n - 1.0)).sqrt() / (n - 2.0))
}

/// Sample excess kurtosis G2
pub(crate) fn excess_kurtosis(values: &[f64], summary: &SummaryStats) -> Option<f64> {
    let n = summary.n as f64;
    let m2 = summary.population_variance()?;
    if summary.n < 4 || m2 == 0.0 {
        return None;
    }
    let m4 = central_moment(values, summary.mean, 4);
    let g2 = m4 / (m2 * m2) - 3.0;
    Some(((n + 1.0) * g2 + 6.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0)))
}
