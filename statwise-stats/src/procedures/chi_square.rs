//! Chi-Square Test of Independence
//!
//! Cross-tabulates two categorical samples into an r×c table (categories in
//! sorted order), compares observed counts with the counts expected under
//! independence, and reports Cramér's V as the effect size.

use super::check_paired;
use crate::error::StatsError;
use crate::is_significant;
use crate::significance::chi_square_p_value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Expected counts below this are flagged as unreliable for the χ² approximation
const MIN_RELIABLE_EXPECTED: f64 = 5.0;

/// Result of a chi-square test of independence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChiSquareResult {
    /// Row variable name
    pub label_x: String,
    /// Column variable name
    pub label_y: String,
    /// Row categories (sorted)
    pub row_categories: Vec<String>,
    /// Column categories (sorted)
    pub column_categories: Vec<String>,
    /// Observed counts, `observed[row][col]`
    pub observed: Vec<Vec<usize>>,
    /// Expected counts under independence
    pub expected: Vec<Vec<f64>>,
    /// Per-cell (O − E)² / E
    pub contributions: Vec<Vec<f64>>,
    /// Row sums
    pub row_totals: Vec<usize>,
    /// Column sums
    pub column_totals: Vec<usize>,
    /// Number of paired observations
    pub grand_total: usize,
    /// Pearson χ²
    pub chi_square: f64,
    /// (r − 1)(c − 1)
    pub df: usize,
    /// Upper-tail p-value
    pub p_value: f64,
    /// p < 0.05
    pub is_significant: bool,
    /// √(χ² / (N·(min(r, c) − 1)))
    pub cramers_v: f64,
    /// Smallest expected count
    pub min_expected: f64,
    /// Number of cells whose expected count is below 5
    pub cells_expected_below_five: usize,
}

/// Index each distinct label in sorted order
fn category_index<S: AsRef<str>>(labels: &[S]) -> BTreeMap<&str, usize> {
    let mut index: BTreeMap<&str, usize> = labels.iter().map(|l| (l.as_ref(), 0)).collect();
    for (i, slot) in index.values_mut().enumerate() {
        *slot = i;
    }
    index
}

/// Pearson chi-square test on two paired categorical samples
pub fn chi_square_independence<S: AsRef<str>>(
    x: &[S],
    y: &[S],
    label_x: &str,
    label_y: &str,
) -> Result<ChiSquareResult, StatsError> {
    check_paired(x, y)?;
    let grand_total = x.len();
    if grand_total == 0 {
        return Err(StatsError::insufficient(1, 0));
    }

    let rows = category_index(x);
    let cols = category_index(y);
    for axis in [rows.len(), cols.len()] {
        if axis < 2 {
            return Err(StatsError::insufficient(2, axis));
        }
    }

    let mut observed = vec![vec![0usize; cols.len()]; rows.len()];
    for (a, b) in x.iter().zip(y) {
        observed[rows[a.as_ref()]][cols[b.as_ref()]] += 1;
    }

    let row_totals: Vec<usize> = observed.iter().map(|row| row.iter().sum()).collect();
    let column_totals: Vec<usize> = (0..cols.len())
        .map(|c| observed.iter().map(|row| row[c]).sum())
        .collect();

    let n = grand_total as f64;
    let expected: Vec<Vec<f64>> = row_totals
        .iter()
        .map(|&rt| {
            column_totals
                .iter()
                .map(|&ct| rt as f64 * ct as f64 / n)
                .collect()
        })
        .collect();

    let contributions: Vec<Vec<f64>> = observed
        .iter()
        .zip(&expected)
        .map(|(obs_row, exp_row)| {
            obs_row
                .iter()
                .zip(exp_row)
                .map(|(&o, &e)| (o as f64 - e).powi(2) / e)
                .collect()
        })
        .collect();

    let chi_square: f64 = contributions.iter().flatten().sum();
    let df = (rows.len() - 1) * (cols.len() - 1);
    let p_value = chi_square_p_value(chi_square, df as f64);

    let min_dim = rows.len().min(cols.len()) as f64;
    let cramers_v = (chi_square / (n * (min_dim - 1.0))).sqrt();

    let min_expected = expected
        .iter()
        .flatten()
        .copied()
        .fold(f64::INFINITY, f64::min);
    let cells_expected_below_five = expected
        .iter()
        .flatten()
        .filter(|&&e| e < MIN_RELIABLE_EXPECTED)
        .count();

    Ok(ChiSquareResult {
        label_x: label_x.to_string(),
        label_y: label_y.to_string(),
        row_categories: rows.keys().map(|k| k.to_string()).collect(),
        column_categories: cols.keys().map(|k| k.to_string()).collect(),
        observed,
        expected,
        contributions,
        row_totals,
        column_totals,
        grand_total,
        chi_square,
        df,
        p_value,
        is_significant: is_significant(p_value),
        cramers_v,
        min_expected,
        cells_expected_below_five,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expand a contingency table back into paired label samples
    fn expand(table: &[(&str, &str, usize)]) -> (Vec<String>, Vec<String>) {
        let mut x = Vec::new();
        let mut y = Vec::new();
        for &(a, b, count) in table {
            for _ in 0..count {
                x.push(a.to_string());
                y.push(b.to_string());
            }
        }
        (x, y)
    }

    #[test]
    fn test_independent_margins() {
        let (x, y) = expand(&[
            ("male", "yes", 10),
            ("male", "no", 20),
            ("female", "yes", 10),
            ("female", "no", 20),
        ]);
        let result = chi_square_independence(&x, &y, "sex", "smoker").unwrap();

        assert!(result.chi_square.abs() < 1e-12);
        assert!((result.p_value - 1.0).abs() < 1e-12);
        assert!(!result.is_significant);
        assert_eq!(result.df, 1);
        assert!(result.cramers_v.abs() < 1e-6);
    }

    #[test]
    fn test_association() {
        let (x, y) = expand(&[("a", "p", 30), ("a", "q", 10), ("b", "p", 10), ("b", "q", 30)]);
        let result = chi_square_independence(&x, &y, "x", "y").unwrap();

        // Every expected count is 20, every contribution 5
        assert!((result.chi_square - 20.0).abs() < 1e-10);
        assert!(result.p_value < 1e-4);
        assert!(result.is_significant);
        assert!((result.cramers_v - 0.5).abs() < 1e-10);
        assert_eq!(result.row_totals, vec![40, 40]);
        assert_eq!(result.grand_total, 80);
        assert_eq!(result.cells_expected_below_five, 0);
    }

    #[test]
    fn test_sorted_categories_and_shape() {
        let x = ["red", "blue", "green", "blue", "red", "green"];
        let y = ["s", "m", "l", "s", "m", "l"];
        let result = chi_square_independence(&x, &y, "colour", "size").unwrap();

        assert_eq!(result.row_categories, vec!["blue", "green", "red"]);
        assert_eq!(result.column_categories, vec!["l", "m", "s"]);
        assert_eq!(result.df, 4);
        assert_eq!(result.observed[1], vec![2, 0, 0]);
        assert!(result.min_expected < MIN_RELIABLE_EXPECTED);
        assert_eq!(result.cells_expected_below_five, 9);
    }

    #[test]
    fn test_failures() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            chi_square_independence(&empty, &empty, "x", "y"),
            Err(StatsError::InsufficientData { .. })
        ));
        assert!(matches!(
            chi_square_independence(&["a", "a", "a"], &["p", "q", "p"], "x", "y"),
            Err(StatsError::InsufficientData { .. })
        ));
        assert!(matches!(
            chi_square_independence(&["a", "b"], &["p"], "x", "y"),
            Err(StatsError::DimensionMismatch { .. })
        ));
    }
}
