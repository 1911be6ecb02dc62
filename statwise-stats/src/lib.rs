#![warn(missing_docs)]
//! Statwise Statistical Engine
//!
//! Computes classical inferential statistics from raw sample data:
//! - Special functions (log-gamma, incomplete gamma/beta, erf, normal CDF and its inverse)
//! - Two-pass sums of squares and products, average ranks with tie correction
//! - Exclusive-median box-plot summaries with 1.5×IQR fencing
//! - p-values for t, F, χ² and z statistics
//! - Correlation, ANOVA, t-tests, regression, chi-square, Mann-Whitney U,
//!   Kruskal-Wallis H, Cronbach's alpha and Kolmogorov–Smirnov normality
//!
//! Every procedure is a pure function returning an immutable record or a
//! [`StatsError`] describing why the input cannot be analysed.

mod boxplot;
mod descriptive;
mod effect;
mod error;
pub mod parse;
pub mod procedures;
mod ranking;
pub mod significance;
pub mod special;
mod summary;

pub use boxplot::{BoxPlotSummary, box_plot, median};
pub use descriptive::{DescriptiveResult, describe};
pub use effect::{
    CorrelationStrength, EffectInterpretation, interpret_correlation, interpret_effect_size,
};
pub use error::StatsError;
pub use parse::{parse_categories, parse_item_matrix, parse_sample};
pub use procedures::{
    AnovaResult, ChiSquareResult, CorrelationResult, FittedPoint, Group, GroupSummary,
    HistogramBin, ItemStatistics, KruskalWallisResult, MannWhitneyResult, NormalityResult,
    QqPoint, RankGroupSummary, RegressionResult, ReliabilityLevel, ReliabilityResult, TTestKind,
    TTestResult, chi_square_independence, correlation, cronbach_alpha, independent_t_test,
    kruskal_wallis, linear_regression, mann_whitney_u, normality_test, one_way_anova,
    paired_t_test, t_test,
};
pub use ranking::{RankVector, rank};
pub use summary::{SummaryStats, sum_of_products};

/// Significance level used for every `is_significant` flag
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Iteration cap for the incomplete gamma series and continued fraction
pub const GAMMA_MAX_ITERATIONS: usize = 100;

/// Iteration cap for the incomplete beta continued fraction
pub const BETA_MAX_ITERATIONS: usize = 200;

/// Relative tolerance at which the iterative special functions stop
pub const CONVERGENCE_TOLERANCE: f64 = 1e-14;

/// Number of terms summed in the Smirnov asymptotic series
pub const SMIRNOV_TERMS: usize = 10;

/// Whether a p-value falls below [`SIGNIFICANCE_LEVEL`]
pub fn is_significant(p_value: f64) -> bool {
    p_value < SIGNIFICANCE_LEVEL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert!((SIGNIFICANCE_LEVEL - 0.05).abs() < f64::EPSILON);
        assert_eq!(GAMMA_MAX_ITERATIONS, 100);
        assert_eq!(BETA_MAX_ITERATIONS, 200);
        assert_eq!(SMIRNOV_TERMS, 10);
    }

    #[test]
    fn test_significance_threshold() {
        assert!(is_significant(0.049));
        assert!(!is_significant(0.05));
        assert!(!is_significant(0.5));
    }
}
