#![warn(missing_docs)]
//! # Statwise
//!
//! Classical inferential statistics from raw sample data.
//!
//! Statwise computes the tests found in an introductory statistics course,
//! together with the intermediate sums needed to show the work:
//! - **Correlation**: Pearson r with its t-test, Spearman ρ on average ranks
//! - **Group comparisons**: independent and paired t-tests, one-way ANOVA
//! - **Nonparametric tests**: Mann-Whitney U and Kruskal-Wallis H with tie correction
//! - **Regression**: simple least squares with the regression ANOVA
//! - **Categorical data**: chi-square test of independence with Cramér's V
//! - **Scales**: Cronbach's alpha with item diagnostics
//! - **Normality**: Kolmogorov–Smirnov against a fitted normal, with histogram and Q-Q data
//!
//! Every procedure is a pure function returning an immutable record, or a
//! [`StatsError`] when the input cannot be analysed.
//!
//! ## Quick Start
//!
//! ```
//! use statwise::prelude::*;
//!
//! let x = [10.0, 8.0, 13.0, 9.0, 11.0, 14.0, 6.0, 4.0, 12.0, 7.0, 5.0];
//! let y = [8.04, 6.95, 7.58, 8.81, 8.33, 9.96, 7.24, 4.26, 10.84, 4.82, 5.68];
//!
//! let result = correlation(&x, &y).unwrap();
//! assert!(result.is_significant);
//! ```
//!
//! ## Batch Analyses
//!
//! Analyses can also be listed in a TOML plan and run through the
//! `statwise` binary (see [`run`]), producing a human or JSON [`Report`].

// Re-export the engine
pub use statwise_stats::{
    AnovaResult, BoxPlotSummary, ChiSquareResult, CorrelationResult, CorrelationStrength,
    DescriptiveResult, EffectInterpretation, FittedPoint, Group, GroupSummary, HistogramBin,
    ItemStatistics, KruskalWallisResult, MannWhitneyResult, NormalityResult, QqPoint,
    RankGroupSummary, RankVector, RegressionResult, ReliabilityLevel, ReliabilityResult,
    SIGNIFICANCE_LEVEL, StatsError, SummaryStats, TTestKind, TTestResult, box_plot,
    chi_square_independence, correlation, cronbach_alpha, describe, independent_t_test,
    interpret_correlation, interpret_effect_size, is_significant, kruskal_wallis,
    linear_regression, mann_whitney_u, median, normality_test, one_way_anova, paired_t_test,
    parse_categories, parse_item_matrix, parse_sample, rank, sum_of_products, t_test,
};
pub use statwise_stats::{significance, special};

// Re-export report types
pub use statwise_report::{
    Analysis, AnalysisEntry, AnalysisStatus, FailureInfo, OutputFormat, Report, ReportMeta,
    ReportSummary, generate_json_report,
};

// Re-export plan handling
pub use statwise_cli::{AnalysisPlan, StatwiseConfig, execute_plan};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Group, StatsError, TTestKind, chi_square_independence, correlation, cronbach_alpha,
        describe, kruskal_wallis, linear_regression, mann_whitney_u, normality_test,
        one_way_anova, t_test,
    };
}

/// Run the Statwise CLI.
///
/// Call this from a binary's `main()`:
/// ```ignore
/// fn main() {
///     statwise::run().unwrap();
/// }
/// ```
pub use statwise_cli::run;
