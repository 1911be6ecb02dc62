//! Pearson and Spearman Correlation
//!
//! Pearson r = SPxy / √(SSx·SSy). Spearman ρ is Pearson r computed on the
//! average ranks of each variable. Both are tested with t on n − 2 df.

use super::check_paired;
use crate::effect::{CorrelationStrength, interpret_correlation};
use crate::error::StatsError;
use crate::is_significant;
use crate::ranking::rank;
use crate::significance::correlation_p_value;
use crate::summary::{SummaryStats, sum_of_products};
use serde::{Deserialize, Serialize};

/// Result of a bivariate correlation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationResult {
    /// Number of pairs
    pub n: usize,
    /// Degrees of freedom (n − 2)
    pub df: usize,
    /// Pearson product-moment coefficient
    pub pearson_r: f64,
    /// r²
    pub r_squared: f64,
    /// t for H0: ρ = 0 (undefined for a perfect fit or zero df)
    pub t_statistic: Option<f64>,
    /// Two-sided p-value of r
    pub p_value: f64,
    /// p < 0.05
    pub is_significant: bool,
    /// Spearman rank coefficient
    pub spearman_rho: f64,
    /// Two-sided p-value of ρ
    pub spearman_p_value: f64,
    /// Spearman p < 0.05
    pub spearman_is_significant: bool,
    /// Cohen's reading of |r|
    pub strength: CorrelationStrength,
    /// Mean of x
    pub mean_x: f64,
    /// Mean of y
    pub mean_y: f64,
    /// Standard deviation of x
    pub std_dev_x: f64,
    /// Standard deviation of y
    pub std_dev_y: f64,
    /// Σx
    pub sum_x: f64,
    /// Σy
    pub sum_y: f64,
    /// Σx²
    pub sum_x2: f64,
    /// Σy²
    pub sum_y2: f64,
    /// Σxy
    pub sum_xy: f64,
    /// Σ(x − x̄)²
    pub ss_x: f64,
    /// Σ(y − ȳ)²
    pub ss_y: f64,
    /// Σ(x − x̄)(y − ȳ)
    pub sp_xy: f64,
}

/// Pearson r from precomputed sums, clamped against rounding past ±1
fn pearson(sp: f64, ss_x: f64, ss_y: f64) -> f64 {
    (sp / (ss_x * ss_y).sqrt()).clamp(-1.0, 1.0)
}

/// Correlate two paired samples
pub fn correlation(x: &[f64], y: &[f64]) -> Result<CorrelationResult, StatsError> {
    check_paired(x, y)?;
    let n = x.len();
    if n < 2 {
        return Err(StatsError::insufficient(2, n));
    }

    let stats_x = SummaryStats::from_sample(x);
    let stats_y = SummaryStats::from_sample(y);
    if stats_x.is_constant() || stats_y.is_constant() {
        return Err(StatsError::DegenerateVariance);
    }

    let sp_xy = sum_of_products(x, y);
    let pearson_r = pearson(sp_xy, stats_x.ss, stats_y.ss);
    let df = n - 2;

    let t_statistic = (df > 0 && pearson_r.abs() < 1.0)
        .then(|| pearson_r * (df as f64).sqrt() / (1.0 - pearson_r * pearson_r).sqrt());
    let p_value = correlation_p_value(pearson_r, n);

    let ranks_x = rank(x).ranks;
    let ranks_y = rank(y).ranks;
    let spearman_rho = pearson(
        sum_of_products(&ranks_x, &ranks_y),
        SummaryStats::from_sample(&ranks_x).ss,
        SummaryStats::from_sample(&ranks_y).ss,
    );
    let spearman_p_value = correlation_p_value(spearman_rho, n);

    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();

    Ok(CorrelationResult {
        n,
        df,
        pearson_r,
        r_squared: pearson_r * pearson_r,
        t_statistic,
        p_value,
        is_significant: is_significant(p_value),
        spearman_rho,
        spearman_p_value,
        spearman_is_significant: is_significant(spearman_p_value),
        strength: interpret_correlation(pearson_r),
        mean_x: stats_x.mean,
        mean_y: stats_y.mean,
        std_dev_x: stats_x.std_dev().unwrap_or(0.0),
        std_dev_y: stats_y.std_dev().unwrap_or(0.0),
        sum_x: stats_x.sum,
        sum_y: stats_y.sum,
        sum_x2: stats_x.sum_of_squares,
        sum_y2: stats_y.sum_of_squares,
        sum_xy,
        ss_x: stats_x.ss,
        ss_y: stats_y.ss,
        sp_xy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANSCOMBE_X: [f64; 11] = [10.0, 8.0, 13.0, 9.0, 11.0, 14.0, 6.0, 4.0, 12.0, 7.0, 5.0];
    const ANSCOMBE_Y: [f64; 11] = [
        8.04, 6.95, 7.58, 8.81, 8.33, 9.96, 7.24, 4.26, 10.84, 4.82, 5.68,
    ];

    #[test]
    fn test_anscombe_fixture() {
        let result = correlation(&ANSCOMBE_X, &ANSCOMBE_Y).unwrap();

        assert_eq!(result.n, 11);
        assert_eq!(result.df, 9);
        assert!((result.pearson_r - 0.8164).abs() < 1e-4);
        assert!((result.mean_x - 9.0).abs() < 1e-12);
        assert!((result.ss_x - 110.0).abs() < 1e-9);
        assert!(result.is_significant);
        assert_eq!(result.strength, CorrelationStrength::Strong);
        // p ≈ 0.00217 for r = 0.816 at df = 9
        assert!((result.p_value - 0.00217).abs() < 1e-4);
    }

    #[test]
    fn test_perfect_linear() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let up: Vec<f64> = x.iter().map(|v| 3.0 * v + 2.0).collect();
        let down: Vec<f64> = x.iter().map(|v| -0.5 * v + 10.0).collect();

        let pos = correlation(&x, &up).unwrap();
        assert!((pos.pearson_r - 1.0).abs() < 1e-12);
        assert!((pos.spearman_rho - 1.0).abs() < 1e-12);
        assert!(pos.t_statistic.is_none());
        assert_eq!(pos.p_value, 0.0);

        let neg = correlation(&x, &down).unwrap();
        assert!((neg.pearson_r + 1.0).abs() < 1e-12);
        assert!((neg.spearman_rho + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_spearman_monotone_nonlinear() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let y: Vec<f64> = x.iter().map(|v: &f64| v.powi(3)).collect();
        let result = correlation(&x, &y).unwrap();

        assert!((result.spearman_rho - 1.0).abs() < 1e-12);
        assert!(result.pearson_r < 1.0);
        assert!(result.pearson_r > 0.9);
    }

    #[test]
    fn test_spearman_with_tied_ranks() {
        // x ranks [1, 2.5, 2.5, 4, 5]: SPxy = 8.5, SSx = 9.5, SSy = 10
        let x = [1.0, 2.0, 2.0, 3.0, 4.0];
        let y = [1.0, 3.0, 2.0, 5.0, 4.0];
        let result = correlation(&x, &y).unwrap();

        let rho = 8.5 / 95.0_f64.sqrt();
        assert!((result.spearman_rho - rho).abs() < 1e-12);
        // t = 3.08666 at df = 3
        assert!((result.spearman_p_value - 0.053854).abs() < 1e-5);
        assert!(!result.spearman_is_significant);

        assert!((result.pearson_r - 0.832050).abs() < 1e-5);
        assert!((result.p_value - 0.080510).abs() < 1e-5);
    }

    #[test]
    fn test_coefficients_bounded() {
        let x = [2.0, 7.0, 1.0, 8.0, 2.0, 8.0, 1.0, 8.0];
        let y = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        let result = correlation(&x, &y).unwrap();
        assert!((-1.0..=1.0).contains(&result.pearson_r));
        assert!((-1.0..=1.0).contains(&result.spearman_rho));
        assert!((0.0..=1.0).contains(&result.p_value));
    }

    #[test]
    fn test_raw_sums_match_two_pass() {
        let result = correlation(&ANSCOMBE_X, &ANSCOMBE_Y).unwrap();
        let n = result.n as f64;
        let naive_sp = result.sum_xy - result.sum_x * result.sum_y / n;
        assert!((naive_sp - result.sp_xy).abs() < 1e-9);
    }

    #[test]
    fn test_failures() {
        assert!(matches!(
            correlation(&[1.0], &[2.0]),
            Err(StatsError::InsufficientData { .. })
        ));
        assert!(matches!(
            correlation(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
            Err(StatsError::DimensionMismatch { .. })
        ));
        assert_eq!(
            correlation(&[4.0, 4.0, 4.0], &[1.0, 2.0, 3.0]).unwrap_err(),
            StatsError::DegenerateVariance
        );
    }
}
