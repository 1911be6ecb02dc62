//! Mann-Whitney U Test
//!
//! Ranks the pooled samples, derives U from the first group's rank sum and
//! tests U = min(U₁, U₂) with a normal approximation whose variance is
//! corrected for ties.

use crate::boxplot::median;
use crate::error::StatsError;
use crate::is_significant;
use crate::ranking::rank;
use crate::significance::z_p_value;
use serde::{Deserialize, Serialize};

/// Result of a Mann-Whitney U test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MannWhitneyResult {
    /// First group name
    pub name_a: String,
    /// Second group name
    pub name_b: String,
    /// Size of the first group
    pub n_a: usize,
    /// Size of the second group
    pub n_b: usize,
    /// Sum of pooled ranks in the first group
    pub rank_sum_a: f64,
    /// Sum of pooled ranks in the second group
    pub rank_sum_b: f64,
    /// Mean pooled rank of the first group
    pub mean_rank_a: f64,
    /// Mean pooled rank of the second group
    pub mean_rank_b: f64,
    /// Median of the first group
    pub median_a: f64,
    /// Median of the second group
    pub median_b: f64,
    /// R₁ − n₁(n₁ + 1)/2
    pub u_a: f64,
    /// n₁n₂ − U₁
    pub u_b: f64,
    /// min(U₁, U₂)
    pub u_statistic: f64,
    /// n₁n₂ / 2
    pub mean_u: f64,
    /// Tie-corrected standard deviation of U
    pub std_dev_u: f64,
    /// Σ(c³ − c) over tied groups in the pooled sample
    pub tie_correction: f64,
    /// (U − mean) / sd
    pub z: f64,
    /// Two-sided p-value
    pub p_value: f64,
    /// p < 0.05
    pub is_significant: bool,
    /// |z| / √N
    pub effect_size_r: f64,
}

/// Mann-Whitney U test on two independent samples
pub fn mann_whitney_u(
    a: &[f64],
    b: &[f64],
    name_a: &str,
    name_b: &str,
) -> Result<MannWhitneyResult, StatsError> {
    for sample in [a, b] {
        if sample.is_empty() {
            return Err(StatsError::insufficient(1, 0));
        }
    }

    let (n_a, n_b) = (a.len(), b.len());
    let (n1, n2) = (n_a as f64, n_b as f64);
    let n = n1 + n2;

    let pooled: Vec<f64> = a.iter().chain(b).copied().collect();
    let ranked = rank(&pooled);
    let rank_sum_a: f64 = ranked.ranks[..n_a].iter().sum();
    let rank_sum_b: f64 = ranked.ranks[n_a..].iter().sum();

    let u_a = rank_sum_a - n1 * (n1 + 1.0) / 2.0;
    let u_b = n1 * n2 - u_a;
    let u_statistic = u_a.min(u_b);

    let mean_u = n1 * n2 / 2.0;
    let variance = n1 * n2 / 12.0 * ((n + 1.0) - ranked.tie_correction / (n * (n - 1.0)));
    if variance <= 0.0 {
        return Err(StatsError::DegenerateVariance);
    }
    let std_dev_u = variance.sqrt();

    let z = (u_statistic - mean_u) / std_dev_u;
    let p_value = z_p_value(z);

    Ok(MannWhitneyResult {
        name_a: name_a.to_string(),
        name_b: name_b.to_string(),
        n_a,
        n_b,
        rank_sum_a,
        rank_sum_b,
        mean_rank_a: rank_sum_a / n1,
        mean_rank_b: rank_sum_b / n2,
        median_a: median(a).unwrap_or(0.0),
        median_b: median(b).unwrap_or(0.0),
        u_a,
        u_b,
        u_statistic,
        mean_u,
        std_dev_u,
        tie_correction: ranked.tie_correction,
        z,
        p_value,
        is_significant: is_significant(p_value),
        effect_size_r: z.abs() / n.sqrt(),
    })
}
