//! Simple Linear Regression
//!
//! Least-squares fit of `y = intercept + slope·x` with slope = SPxy / SSx.
//! The regression ANOVA splits SSy into SSreg = SPxy²/SSx and SSres.

use super::check_paired;
use crate::error::StatsError;
use crate::is_significant;
use crate::significance::{f_p_value, t_p_value};
use crate::summary::{SummaryStats, sum_of_products};
use serde::{Deserialize, Serialize};

/// One observation with its fitted value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FittedPoint {
    /// Predictor value
    pub x: f64,
    /// Observed response
    pub y: f64,
    /// intercept + slope·x
    pub predicted: f64,
    /// y − predicted
    pub residual: f64,
}

/// Result of a simple linear regression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Predictor name
    pub label_x: String,
    /// Response name
    pub label_y: String,
    /// Number of points
    pub n: usize,
    /// Fitted slope
    pub slope: f64,
    /// Fitted intercept
    pub intercept: f64,
    /// Pearson r between x and y
    pub r: f64,
    /// Coefficient of determination
    pub r_squared: f64,
    /// r² adjusted for one predictor
    pub adjusted_r_squared: f64,
    /// √MSres
    pub standard_error_of_estimate: f64,
    /// Standard error of the slope
    pub slope_standard_error: f64,
    /// slope / its standard error, undefined for an exact fit
    pub slope_t: Option<f64>,
    /// Two-sided p-value of the slope
    pub slope_p_value: f64,
    /// Mean of x
    pub mean_x: f64,
    /// Mean of y
    pub mean_y: f64,
    /// Σ(x − x̄)²
    pub ss_x: f64,
    /// Σ(y − ȳ)²
    pub ss_y: f64,
    /// Σ(x − x̄)(y − ȳ)
    pub sp_xy: f64,
    /// Explained sum of squares
    pub ss_regression: f64,
    /// Residual sum of squares
    pub ss_residual: f64,
    /// SSreg + SSres
    pub ss_total: f64,
    /// Always 1
    pub df_regression: usize,
    /// n − 2
    pub df_residual: usize,
    /// SSreg / 1
    pub ms_regression: f64,
    /// SSres / (n − 2), 0 when there are no residual degrees of freedom
    pub ms_residual: f64,
    /// MSreg / MSres, undefined when MSres is 0
    pub f_statistic: Option<f64>,
    /// Upper-tail p-value of F
    pub p_value: f64,
    /// p < 0.05
    pub is_significant: bool,
    /// Observations with fitted values and residuals
    pub points: Vec<FittedPoint>,
}

impl RegressionResult {
    /// Predicted response at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Fit `y` on `x` by ordinary least squares
pub fn linear_regression(
    x: &[f64],
    y: &[f64],
    label_x: &str,
    label_y: &str,
) -> Result<RegressionResult, StatsError> {
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
    let slope = sp_xy / stats_x.ss;
    let intercept = stats_y.mean - slope * stats_x.mean;

    let points: Vec<FittedPoint> = x
        .iter()
        .zip(y)
        .map(|(&xi, &yi)| {
            let predicted = intercept + slope * xi;
            FittedPoint {
                x: xi,
                y: yi,
                predicted,
                residual: yi - predicted,
            }
        })
        .collect();

    let ss_total = stats_y.ss;
    let ss_residual: f64 = points.iter().map(|p| p.residual * p.residual).sum();
    let ss_regression = (ss_total - ss_residual).max(0.0);

    let df_residual = n - 2;
    let ms_regression = ss_regression;
    let ms_residual = if df_residual > 0 {
        ss_residual / df_residual as f64
    } else {
        0.0
    };

    let f_statistic = (ms_residual > 0.0).then(|| ms_regression / ms_residual);
    let p_value = match f_statistic {
        _ if df_residual == 0 => 1.0,
        Some(f) => f_p_value(f, 1.0, df_residual as f64),
        // Exact fit with residual degrees of freedom
        None => 0.0,
    };

    let standard_error_of_estimate = ms_residual.sqrt();
    let slope_standard_error = (ms_residual / stats_x.ss).sqrt();
    let slope_t = (slope_standard_error > 0.0).then(|| slope / slope_standard_error);
    let slope_p_value = match slope_t {
        _ if df_residual == 0 => 1.0,
        Some(t) => t_p_value(t, df_residual as f64),
        None => 0.0,
    };

    let r = (sp_xy / (stats_x.ss * stats_y.ss).sqrt()).clamp(-1.0, 1.0);
    let r_squared = ss_regression / ss_total;
    let adjusted_r_squared = if df_residual > 0 {
        1.0 - (1.0 - r_squared) * (n - 1) as f64 / df_residual as f64
    } else {
        r_squared
    };

    Ok(RegressionResult {
        label_x: label_x.to_string(),
        label_y: label_y.to_string(),
        n,
        slope,
        intercept,
        r,
        r_squared,
        adjusted_r_squared,
        standard_error_of_estimate,
        slope_standard_error,
        slope_t,
        slope_p_value,
        mean_x: stats_x.mean,
        mean_y: stats_y.mean,
        ss_x: stats_x.ss,
        ss_y: stats_y.ss,
        sp_xy,
        ss_regression,
        ss_residual,
        ss_total,
        df_regression: 1,
        df_residual,
        ms_regression,
        ms_residual,
        f_statistic,
        p_value,
        is_significant: is_significant(p_value),
        points,
    })
}
