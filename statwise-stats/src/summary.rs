//! Summary Statistics
//!
//! Two-pass sums that every procedure derives its variances from:
//! - the mean is computed first
//! - squared deviations are then accumulated around it
//!
//! The naive `Σx² − (Σx)²/n` form cancels catastrophically once values carry
//! a large common offset. Going through [`SummaryStats`] keeps `ss` exact
//! relative to the spread of the data.

use serde::{Deserialize, Serialize};

/// Canonical two-pass summary of one sample
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of values
    pub n: usize,
    /// Σx
    pub sum: f64,
    /// Σx² (raw, kept for step-by-step display)
    pub sum_of_squares: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Σ(x − mean)²
    pub ss: f64,
}

impl SummaryStats {
    /// Compute the summary of `values`. An empty slice gives all zeros.
    pub fn from_sample(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len();
        let sum: f64 = values.iter().sum();
        let mean = sum / n as f64;

        let (ss, sum_of_squares) = values.iter().fold((0.0, 0.0), |(ss, sq), &x| {
            let dev = x - mean;
            (ss + dev * dev, sq + x * x)
        });

        Self {
            n,
            sum,
            sum_of_squares,
            mean,
            ss,
        }
    }

    /// Sample variance (n − 1 denominator); `None` below two values
    pub fn variance(&self) -> Option<f64> {
        (self.n >= 2).then(|| self.ss / (self.n - 1) as f64)
    }

    /// Sample standard deviation; `None` below two values
    pub fn std_dev(&self) -> Option<f64> {
        self.variance().map(f64::sqrt)
    }

    /// Population variance (n denominator); `None` for an empty sample
    pub fn population_variance(&self) -> Option<f64> {
        (self.n >= 1).then(|| self.ss / self.n as f64)
    }

    /// Whether the values have no spread at all
    pub fn is_constant(&self) -> bool {
        self.ss == 0.0
    }
}

/// Two-pass sum of products Σ(xᵢ − x̄)(yᵢ − ȳ).
///
/// Pairs beyond the shorter slice are ignored; callers check lengths first.
pub fn sum_of_products(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return 0.0;
    }
    let (x, y) = (&x[..n], &y[..n]);
    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    x.iter()
        .zip(y)
        .map(|(&xi, &yi)| (xi - mean_x) * (yi - mean_y))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_ss(values: &[f64]) -> f64 {
        let n = values.len() as f64;
        let sum: f64 = values.iter().sum();
        let sum_sq: f64 = values.iter().map(|x| x * x).sum();
        sum_sq - sum * sum / n
    }

    #[test]
    fn test_basic_summary() {
        let stats = SummaryStats::from_sample(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);

        assert_eq!(stats.n, 8);
        assert!((stats.sum - 40.0).abs() < f64::EPSILON);
        assert!((stats.mean - 5.0).abs() < f64::EPSILON);
        assert!((stats.ss - 32.0).abs() < 1e-12);
        assert!((stats.sum_of_squares - 232.0).abs() < 1e-12);
        assert!((stats.population_variance().unwrap() - 4.0).abs() < 1e-12);
        assert!((stats.variance().unwrap() - 32.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_matches_naive_on_small_input() {
        let values = [1.5, 2.25, 3.0, 7.75, 4.5];
        let stats = SummaryStats::from_sample(&values);
        assert!((stats.ss - naive_ss(&values)).abs() < 1e-10);
    }

    #[test]
    fn test_shift_invariance() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        let base = SummaryStats::from_sample(&values).ss;

        for &offset in &[1e3, 1e6, 1e9] {
            let shifted: Vec<f64> = values.iter().map(|x| x + offset).collect();
            let ss = SummaryStats::from_sample(&shifted).ss;
            assert!(((ss - base) / base).abs() < 1e-9, "offset {offset}: {ss} vs {base}");
        }
    }

    #[test]
    fn test_empty_and_single() {
        let empty = SummaryStats::from_sample(&[]);
        assert_eq!(empty.n, 0);
        assert!(empty.variance().is_none());
        assert!(empty.population_variance().is_none());

        let single = SummaryStats::from_sample(&[42.0]);
        assert!((single.mean - 42.0).abs() < f64::EPSILON);
        assert!(single.std_dev().is_none());
        assert!(single.is_constant());
    }

    #[test]
    fn test_sum_of_products() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        // SPxy = 2 * SSx = 2 * 5
        assert!((sum_of_products(&x, &y) - 10.0).abs() < 1e-12);
        assert!((sum_of_products(&x, &[4.0, 3.0, 2.0, 1.0]) + 5.0).abs() < 1e-12);
        assert_eq!(sum_of_products(&[], &[]), 0.0);
    }
}
