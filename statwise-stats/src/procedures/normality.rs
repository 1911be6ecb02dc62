//! Kolmogorov–Smirnov Normality Test
//!
//! Compares the empirical CDF with a normal distribution fitted to the
//! sample's own mean and standard deviation. Alongside D and its p-value
//! the result carries the shape diagnostics usually read with it: moments,
//! a box plot, a histogram with expected normal counts and Q-Q points.

use crate::boxplot::{BoxPlotSummary, box_plot};
use crate::descriptive::{excess_kurtosis, skewness};
use crate::error::StatsError;
use crate::is_significant;
use crate::significance::{ks_lambda, ks_p_value};
use crate::special::{inv_normal_cdf, normal_cdf};
use crate::summary::SummaryStats;
use serde::{Deserialize, Serialize};

/// Minimum sample size for the test
const MIN_SAMPLE: usize = 5;

/// One histogram bin with the count a fitted normal would put in it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Lower edge (inclusive)
    pub lower: f64,
    /// Upper edge (exclusive, inclusive for the last bin)
    pub upper: f64,
    /// Observed values in the bin
    pub count: usize,
    /// n·(Φ(upper) − Φ(lower)) under the fitted normal
    pub expected_count: f64,
}

/// One point of a normal Q-Q plot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QqPoint {
    /// Fitted-normal quantile at the Blom plotting position
    pub theoretical: f64,
    /// Ordered sample value
    pub sample: f64,
}

/// Result of a Kolmogorov–Smirnov normality test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalityResult {
    /// Variable name
    pub variable_name: String,
    /// Sample size
    pub n: usize,
    /// Sample mean (fitted normal mean)
    pub mean: f64,
    /// Sample standard deviation (fitted normal sd)
    pub std_dev: f64,
    /// max(F̂ − Φ) above the fitted CDF
    pub d_plus: f64,
    /// max(Φ − F̂) below the fitted CDF
    pub d_minus: f64,
    /// max(D⁺, D⁻)
    pub d_statistic: f64,
    /// D·(√n + 0.12 + 0.11/√n)
    pub lambda: f64,
    /// Smirnov p-value
    pub p_value: f64,
    /// p < 0.05
    pub is_significant: bool,
    /// No evidence against normality
    pub is_normal: bool,
    /// Adjusted Fisher-Pearson skewness
    pub skewness: Option<f64>,
    /// Sample excess kurtosis
    pub excess_kurtosis: Option<f64>,
    /// Quartiles, fences and outliers
    pub box_plot: BoxPlotSummary,
    /// Sturges-rule histogram
    pub histogram: Vec<HistogramBin>,
    /// Normal Q-Q points in sample order
    pub qq_points: Vec<QqPoint>,
}

/// Test a sample for normality
pub fn normality_test(sample: &[f64], name: &str) -> Result<NormalityResult, StatsError> {
    let n = sample.len();
    if n < MIN_SAMPLE {
        return Err(StatsError::insufficient(MIN_SAMPLE, n));
    }

    let summary = SummaryStats::from_sample(sample);
    let std_dev = match summary.std_dev() {
        Some(sd) if sd > 0.0 => sd,
        _ => return Err(StatsError::DegenerateVariance),
    };
    let mean = summary.mean;

    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let count = n as f64;
    let (mut d_plus, mut d_minus) = (0.0_f64, 0.0_f64);
    for (i, &x) in sorted.iter().enumerate() {
        let fitted = normal_cdf(x, mean, std_dev);
        d_plus = d_plus.max((i + 1) as f64 / count - fitted);
        d_minus = d_minus.max(fitted - i as f64 / count);
    }
    let d_statistic = d_plus.max(d_minus);
    let p_value = ks_p_value(d_statistic, n);
    let significant = is_significant(p_value);

    Ok(NormalityResult {
        variable_name: name.to_string(),
        n,
        mean,
        std_dev,
        d_plus,
        d_minus,
        d_statistic,
        lambda: ks_lambda(d_statistic, n),
        p_value,
        is_significant: significant,
        is_normal: !significant,
        skewness: skewness(sample, &summary),
        excess_kurtosis: excess_kurtosis(sample, &summary),
        box_plot: box_plot(sample)?,
        histogram: histogram(&sorted, mean, std_dev),
        qq_points: qq_points(&sorted, mean, std_dev),
    })
}

/// Equal-width bins over [min, max], ⌈log₂ n⌉ + 1 of them
fn histogram(sorted: &[f64], mean: f64, std_dev: f64) -> Vec<HistogramBin> {
    let count = sorted.len() as f64;
    let bins = count.log2().ceil() as usize + 1;
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    let width = (max - min) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &x in sorted {
        let slot = if width > 0.0 {
            (((x - min) / width).floor() as usize).min(bins - 1)
        } else {
            0
        };
        counts[slot] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, observed)| {
            let lower = min + width * i as f64;
            let upper = if i + 1 == bins { max } else { lower + width };
            let probability = normal_cdf(upper, mean, std_dev) - normal_cdf(lower, mean, std_dev);
            HistogramBin {
                lower,
                upper,
                count: observed,
                expected_count: count * probability,
            }
        })
        .collect()
}

/// Blom positions (i − 0.375)/(n + 0.25) mapped onto the fitted normal
fn qq_points(sorted: &[f64], mean: f64, std_dev: f64) -> Vec<QqPoint> {
    let n = sorted.len() as f64;
    sorted
        .iter()
        .enumerate()
        .map(|(i, &sample)| {
            let position = (i as f64 + 1.0 - 0.375) / (n + 0.25);
            QqPoint {
                theoretical: mean + std_dev * inv_normal_cdf(position),
                sample,
            }
        })
        .collect()
}
