//! Test Procedures
//!
//! One pure function per procedure. Each consumes raw samples (or a
//! participant × item matrix), composes the primitives with a significance
//! calculator and returns an immutable record.
//!
//! ## Procedures
//!
//! - [`correlation`] - Pearson r and Spearman ρ
//! - [`one_way_anova`] - One-way analysis of variance
//! - [`independent_t_test`] / [`paired_t_test`] - Student's t-tests
//! - [`linear_regression`] - Simple least-squares regression
//! - [`chi_square_independence`] - Pearson χ² on a contingency table
//! - [`mann_whitney_u`] - Mann-Whitney U with normal approximation
//! - [`kruskal_wallis`] - Kruskal-Wallis H
//! - [`cronbach_alpha`] - Scale reliability
//! - [`normality_test`] - Kolmogorov–Smirnov against a fitted normal

mod anova;
mod chi_square;
mod correlation;
mod kruskal_wallis;
mod mann_whitney;
mod normality;
mod regression;
mod reliability;
mod ttest;

pub use anova::{AnovaResult, one_way_anova};
pub use chi_square::{ChiSquareResult, chi_square_independence};
pub use correlation::{CorrelationResult, correlation};
pub use kruskal_wallis::{KruskalWallisResult, RankGroupSummary, kruskal_wallis};
pub use mann_whitney::{MannWhitneyResult, mann_whitney_u};
pub use normality::{HistogramBin, NormalityResult, QqPoint, normality_test};
pub use regression::{FittedPoint, RegressionResult, linear_regression};
pub use reliability::{ItemStatistics, ReliabilityLevel, ReliabilityResult, cronbach_alpha};
pub use ttest::{TTestKind, TTestResult, independent_t_test, paired_t_test, t_test};

use crate::error::StatsError;
use crate::summary::SummaryStats;
use serde::{Deserialize, Serialize};

/// A named sample; a slice of groups forms a grouped sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Group label
    pub name: String,
    /// Observations
    pub values: Vec<f64>,
}

impl Group {
    /// Create a group from a label and its values
    pub fn new(name: impl Into<String>, values: impl Into<Vec<f64>>) -> Self {
        Self {
            name: name.into(),
            values: values.into(),
        }
    }
}

/// Descriptive figures of one group, as reported by ANOVA and the t-tests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Group label
    pub name: String,
    /// Number of observations
    pub n: usize,
    /// Group mean
    pub mean: f64,
    /// Sample standard deviation (0 below two observations)
    pub std_dev: f64,
    /// Σx
    pub sum: f64,
    /// Σ(x − mean)²
    pub ss: f64,
}

impl GroupSummary {
    pub(crate) fn new(name: &str, stats: &SummaryStats) -> Self {
        Self {
            name: name.to_string(),
            n: stats.n,
            mean: stats.mean,
            std_dev: stats.std_dev().unwrap_or(0.0),
            sum: stats.sum,
            ss: stats.ss,
        }
    }
}

/// Groups that carry at least one observation
pub(crate) fn groups_with_data(groups: &[Group]) -> Vec<&Group> {
    groups.iter().filter(|g| !g.values.is_empty()).collect()
}

/// Paired inputs must have the same length
pub(crate) fn check_paired<A, B>(x: &[A], y: &[B]) -> Result<(), StatsError> {
    if x.len() != y.len() {
        return Err(StatsError::DimensionMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_with_data() {
        let groups = vec![
            Group::new("a", vec![1.0]),
            Group::new("empty", Vec::new()),
            Group::new("b", vec![2.0, 3.0]),
        ];
        let names: Vec<&str> = groups_with_data(&groups)
            .iter()
            .map(|g| g.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_check_paired() {
        assert!(check_paired(&[1.0, 2.0], &[3.0, 4.0]).is_ok());
        assert_eq!(
            check_paired(&[1.0, 2.0], &[3.0]),
            Err(StatsError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
    }
}
