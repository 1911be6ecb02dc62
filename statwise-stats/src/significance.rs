//! Significance Calculators
//!
//! Convert a test statistic and its degrees of freedom into a p-value.
//! Results are clamped to [0, 1]; non-positive degrees of freedom give 1.

use crate::SMIRNOV_TERMS;
use crate::special::{betainc, regularized_gamma_q};

fn clamp_p(p: f64) -> f64 {
    if p.is_nan() { 1.0 } else { p.clamp(0.0, 1.0) }
}

/// Two-sided p-value of a correlation coefficient `r` over `n` pairs (df = n − 2)
pub fn correlation_p_value(r: f64, n: usize) -> f64 {
    if n <= 2 {
        return 1.0;
    }
    if r.abs() >= 1.0 {
        return 0.0;
    }
    let df = (n - 2) as f64;
    let t = r * df.sqrt() / (1.0 - r * r).sqrt();
    t_p_value(t, df)
}

/// Two-sided p-value of Student's t
pub fn t_p_value(t: f64, df: f64) -> f64 {
    if df <= 0.0 {
        return 1.0;
    }
    clamp_p(betainc(df / (df + t * t), df / 2.0, 0.5))
}

/// Upper-tail p-value of Fisher's F with (`df1`, `df2`) degrees of freedom
pub fn f_p_value(f: f64, df1: f64, df2: f64) -> f64 {
    if df1 <= 0.0 || df2 <= 0.0 || f <= 0.0 {
        return 1.0;
    }
    clamp_p(betainc(df2 / (df2 + df1 * f), df2 / 2.0, df1 / 2.0))
}

/// Upper-tail p-value of a chi-square statistic
pub fn chi_square_p_value(chi_square: f64, df: f64) -> f64 {
    if df <= 0.0 || chi_square <= 0.0 {
        return 1.0;
    }
    clamp_p(regularized_gamma_q(df / 2.0, chi_square / 2.0))
}

/// Two-sided p-value of a standard normal z.
///
/// P(|Z| > |z|) = Q(1/2, z²/2), the complement of the lower incomplete gamma.
pub fn z_p_value(z: f64) -> f64 {
    clamp_p(regularized_gamma_q(0.5, z * z / 2.0))
}

/// Kolmogorov–Smirnov p-value of a distance `d` over `n` observations.
///
/// Sums the Smirnov series 2·Σ(−1)^(j−1)·exp(−2j²λ²) with
/// λ = d·(√n + 0.12 + 0.11/√n). A series that has not settled within
/// [`SMIRNOV_TERMS`] terms (small λ) gives 1.
pub fn ks_p_value(d: f64, n: usize) -> f64 {
    if n == 0 {
        return 1.0;
    }
    smirnov_series(ks_lambda(d, n))
}

/// λ = d·(√n + 0.12 + 0.11/√n)
pub fn ks_lambda(d: f64, n: usize) -> f64 {
    let root_n = (n as f64).sqrt();
    d * (root_n + 0.12 + 0.11 / root_n)
}

fn smirnov_series(lambda: f64) -> f64 {
    const RELATIVE_TO_PREVIOUS: f64 = 1e-3;
    const RELATIVE_TO_SUM: f64 = 1e-8;

    let exponent = -2.0 * lambda * lambda;
    let mut sign = 2.0;
    let mut sum = 0.0;
    let mut previous = 0.0;
    for j in 1..=SMIRNOV_TERMS {
        let j = j as f64;
        let term = sign * (exponent * j * j).exp();
        sum += term;
        if term.abs() <= RELATIVE_TO_PREVIOUS * previous || term.abs() <= RELATIVE_TO_SUM * sum {
            return clamp_p(sum);
        }
        sign = -sign;
        previous = term.abs();
    }
    1.0
}
