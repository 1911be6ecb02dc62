//! Kruskal-Wallis H Test
//!
//! Rank-based one-way analysis: H = [12/(N(N+1))]·Σ(Rᵢ²/nᵢ) − 3(N+1),
//! divided by the tie correction 1 − Σ(c³ − c)/(N³ − N) and referred to
//! chi-square on k − 1 df.

use super::{Group, groups_with_data};
use crate::boxplot::median;
use crate::error::StatsError;
use crate::is_significant;
use crate::ranking::rank;
use crate::significance::chi_square_p_value;
use serde::{Deserialize, Serialize};

/// Rank summary of one group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankGroupSummary {
    /// Group label
    pub name: String,
    /// Number of observations
    pub n: usize,
    /// Sum of pooled ranks
    pub rank_sum: f64,
    /// Mean pooled rank
    pub mean_rank: f64,
    /// Group median
    pub median: f64,
}

/// Result of a Kruskal-Wallis H test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KruskalWallisResult {
    /// Per-group rank summaries, in input order
    pub groups: Vec<RankGroupSummary>,
    /// Total number of observations
    pub n_total: usize,
    /// H before the tie correction
    pub h_uncorrected: f64,
    /// Σ(c³ − c) over tied groups in the pooled sample
    pub tie_correction: f64,
    /// 1 − Σ(c³ − c)/(N³ − N)
    pub correction_factor: f64,
    /// Tie-corrected H
    pub h_statistic: f64,
    /// k − 1
    pub df: usize,
    /// Upper-tail chi-square p-value
    pub p_value: f64,
    /// p < 0.05
    pub is_significant: bool,
    /// H / (N − 1)
    pub epsilon_squared: f64,
}

/// Minimum number of groups with data
const MIN_GROUPS: usize = 3;

/// Kruskal-Wallis H test; empty groups are ignored
pub fn kruskal_wallis(groups: &[Group]) -> Result<KruskalWallisResult, StatsError> {
    let groups = groups_with_data(groups);
    if groups.len() < MIN_GROUPS {
        return Err(StatsError::insufficient(MIN_GROUPS, groups.len()));
    }

    let pooled: Vec<f64> = groups.iter().flat_map(|g| g.values.iter().copied()).collect();
    let ranked = rank(&pooled);
    let n_total = pooled.len();
    let n = n_total as f64;

    let mut offset = 0;
    let summaries: Vec<RankGroupSummary> = groups
        .iter()
        .map(|g| {
            let len = g.values.len();
            let rank_sum: f64 = ranked.ranks[offset..offset + len].iter().sum();
            offset += len;
            RankGroupSummary {
                name: g.name.clone(),
                n: len,
                rank_sum,
                mean_rank: rank_sum / len as f64,
                median: median(&g.values).unwrap_or(0.0),
            }
        })
        .collect();

    let weighted: f64 = summaries
        .iter()
        .map(|s| s.rank_sum * s.rank_sum / s.n as f64)
        .sum();
    let h_uncorrected = 12.0 / (n * (n + 1.0)) * weighted - 3.0 * (n + 1.0);

    let correction_factor = 1.0 - ranked.tie_correction / (n * n * n - n);
    if correction_factor <= 0.0 {
        return Err(StatsError::DegenerateVariance);
    }
    let h_statistic = h_uncorrected / correction_factor;

    let df = summaries.len() - 1;
    let p_value = chi_square_p_value(h_statistic, df as f64);

    Ok(KruskalWallisResult {
        groups: summaries,
        n_total,
        h_uncorrected,
        tie_correction: ranked.tie_correction,
        correction_factor,
        h_statistic,
        df,
        p_value,
        is_significant: is_significant(p_value),
        epsilon_squared: h_statistic / (n - 1.0),
    })
}
