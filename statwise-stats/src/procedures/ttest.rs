//! Student's t-tests
//!
//! - Independent samples: pooled-variance t on n₁ + n₂ − 2 df
//! - Paired samples: one-sample t on the differences, n − 1 df

use super::{GroupSummary, check_paired};
use crate::effect::{EffectInterpretation, interpret_effect_size};
use crate::error::StatsError;
use crate::is_significant;
use crate::significance::t_p_value;
use crate::summary::SummaryStats;
use serde::{Deserialize, Serialize};

/// Which t-test to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TTestKind {
    /// Two unrelated samples
    Independent,
    /// Two measurements on the same subjects
    Paired,
}

impl std::fmt::Display for TTestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TTestKind::Independent => write!(f, "independent"),
            TTestKind::Paired => write!(f, "paired"),
        }
    }
}

impl std::str::FromStr for TTestKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "independent" | "unpaired" => Ok(TTestKind::Independent),
            "paired" | "dependent" => Ok(TTestKind::Paired),
            other => Err(format!("Unknown t-test kind: {}", other)),
        }
    }
}

/// Result of a two-sample t-test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TTestResult {
    /// Independent or paired
    pub kind: TTestKind,
    /// First sample
    pub group_a: GroupSummary,
    /// Second sample
    pub group_b: GroupSummary,
    /// mean(A) − mean(B)
    pub mean_difference: f64,
    /// Standard error of the difference
    pub standard_error: f64,
    /// t statistic
    pub t_statistic: f64,
    /// Degrees of freedom
    pub df: usize,
    /// Two-sided p-value
    pub p_value: f64,
    /// p < 0.05
    pub is_significant: bool,
    /// Cohen's d (d_z for paired samples)
    pub cohens_d: f64,
    /// Cohen's reading of |d|
    pub effect: EffectInterpretation,
    /// Pooled variance (independent only)
    pub pooled_variance: Option<f64>,
    /// A − B per pair (paired only)
    pub differences: Option<Vec<f64>>,
    /// Standard deviation of the differences (paired only)
    pub std_dev_difference: Option<f64>,
}

/// Run the t-test selected by `kind`
pub fn t_test(
    a: &[f64],
    b: &[f64],
    kind: TTestKind,
    name_a: &str,
    name_b: &str,
) -> Result<TTestResult, StatsError> {
    match kind {
        TTestKind::Independent => independent_t_test(a, b, name_a, name_b),
        TTestKind::Paired => paired_t_test(a, b, name_a, name_b),
    }
}

/// Pooled-variance t-test for two independent samples
pub fn independent_t_test(
    a: &[f64],
    b: &[f64],
    name_a: &str,
    name_b: &str,
) -> Result<TTestResult, StatsError> {
    for sample in [a, b] {
        if sample.len() < 2 {
            return Err(StatsError::insufficient(2, sample.len()));
        }
    }

    let stats_a = SummaryStats::from_sample(a);
    let stats_b = SummaryStats::from_sample(b);
    let (n1, n2) = (stats_a.n as f64, stats_b.n as f64);

    let df = stats_a.n + stats_b.n - 2;
    let pooled_variance = (stats_a.ss + stats_b.ss) / df as f64;
    if pooled_variance == 0.0 {
        return Err(StatsError::DegenerateVariance);
    }

    let mean_difference = stats_a.mean - stats_b.mean;
    let standard_error = (pooled_variance * (1.0 / n1 + 1.0 / n2)).sqrt();
    let t_statistic = mean_difference / standard_error;
    let p_value = t_p_value(t_statistic, df as f64);
    let cohens_d = mean_difference / pooled_variance.sqrt();

    Ok(TTestResult {
        kind: TTestKind::Independent,
        group_a: GroupSummary::new(name_a, &stats_a),
        group_b: GroupSummary::new(name_b, &stats_b),
        mean_difference,
        standard_error,
        t_statistic,
        df,
        p_value,
        is_significant: is_significant(p_value),
        cohens_d,
        effect: interpret_effect_size(cohens_d),
        pooled_variance: Some(pooled_variance),
        differences: None,
        std_dev_difference: None,
    })
}

/// t-test on the pairwise differences of two matched samples
pub fn paired_t_test(
    a: &[f64],
    b: &[f64],
    name_a: &str,
    name_b: &str,
) -> Result<TTestResult, StatsError> {
    check_paired(a, b)?;
    let n = a.len();
    if n < 2 {
        return Err(StatsError::insufficient(2, n));
    }

    let differences: Vec<f64> = a.iter().zip(b).map(|(x, y)| x - y).collect();
    let diff_stats = SummaryStats::from_sample(&differences);
    let std_dev_difference = diff_stats.std_dev().unwrap_or(0.0);
    if std_dev_difference == 0.0 {
        return Err(StatsError::DegenerateVariance);
    }

    let df = n - 1;
    let standard_error = std_dev_difference / (n as f64).sqrt();
    let t_statistic = diff_stats.mean / standard_error;
    let p_value = t_p_value(t_statistic, df as f64);
    let cohens_d = diff_stats.mean / std_dev_difference;

    Ok(TTestResult {
        kind: TTestKind::Paired,
        group_a: GroupSummary::new(name_a, &SummaryStats::from_sample(a)),
        group_b: GroupSummary::new(name_b, &SummaryStats::from_sample(b)),
        mean_difference: diff_stats.mean,
        standard_error,
        t_statistic,
        df,
        p_value,
        is_significant: is_significant(p_value),
        cohens_d,
        effect: interpret_effect_size(cohens_d),
        pooled_variance: None,
        differences: Some(differences),
        std_dev_difference: Some(std_dev_difference),
    })
}
