//! Scale Reliability (Cronbach's alpha)
//!
//! α = k/(k−1) · (1 − Σs²ᵢ / s²total) over a participants × items matrix.
//! Item diagnostics rebuild the total without the item for each of the k
//! items, which costs O(k²·n); scales are expected to have few items.

use super::check_paired;
use crate::error::StatsError;
use crate::summary::{SummaryStats, sum_of_products};
use serde::{Deserialize, Serialize};

/// Conventional reading of an alpha coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReliabilityLevel {
    /// α >= 0.9
    Excellent,
    /// 0.8 <= α < 0.9
    Good,
    /// 0.7 <= α < 0.8
    Acceptable,
    /// 0.6 <= α < 0.7
    Questionable,
    /// 0.5 <= α < 0.6
    Poor,
    /// α < 0.5
    Unacceptable,
}

impl ReliabilityLevel {
    /// Classify an alpha coefficient
    pub fn from_alpha(alpha: f64) -> Self {
        if alpha >= 0.9 {
            ReliabilityLevel::Excellent
        } else if alpha >= 0.8 {
            ReliabilityLevel::Good
        } else if alpha >= 0.7 {
            ReliabilityLevel::Acceptable
        } else if alpha >= 0.6 {
            ReliabilityLevel::Questionable
        } else if alpha >= 0.5 {
            ReliabilityLevel::Poor
        } else {
            ReliabilityLevel::Unacceptable
        }
    }
}

impl std::fmt::Display for ReliabilityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ReliabilityLevel::Excellent => "excellent",
            ReliabilityLevel::Good => "good",
            ReliabilityLevel::Acceptable => "acceptable",
            ReliabilityLevel::Questionable => "questionable",
            ReliabilityLevel::Poor => "poor",
            ReliabilityLevel::Unacceptable => "unacceptable",
        };
        write!(f, "{}", label)
    }
}

/// Diagnostics for one item of the scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStatistics {
    /// Item label
    pub name: String,
    /// Item mean
    pub mean: f64,
    /// Item sample variance
    pub variance: f64,
    /// Correlation of the item with the total of the other items
    pub corrected_item_total_correlation: Option<f64>,
    /// Alpha of the scale without this item (needs at least three items)
    pub alpha_if_deleted: Option<f64>,
}

/// Result of a reliability analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReliabilityResult {
    /// Number of participants (rows)
    pub n_participants: usize,
    /// Number of items (columns)
    pub n_items: usize,
    /// Cronbach's alpha
    pub alpha: f64,
    /// Conventional reading of alpha
    pub level: ReliabilityLevel,
    /// Σ item variances
    pub sum_item_variances: f64,
    /// Variance of the participants' total scores
    pub total_variance: f64,
    /// Total score of each participant
    pub total_scores: Vec<f64>,
    /// Per-item diagnostics
    pub items: Vec<ItemStatistics>,
}

/// α from the number of items, Σ item variances and the total variance
fn alpha_from(k: usize, sum_item_variances: f64, total_variance: f64) -> f64 {
    let k = k as f64;
    k / (k - 1.0) * (1.0 - sum_item_variances / total_variance)
}

/// Sample variance of a column that has at least two entries
fn variance(values: &[f64]) -> f64 {
    SummaryStats::from_sample(values).variance().unwrap_or(0.0)
}

/// Cronbach's alpha of a participants × items matrix.
///
/// Item labels default to "Item 1", "Item 2", … where `item_names` is
/// missing or shorter than the number of items.
pub fn cronbach_alpha(
    matrix: &[Vec<f64>],
    item_names: Option<&[String]>,
) -> Result<ReliabilityResult, StatsError> {
    let n_participants = matrix.len();
    if n_participants < 2 {
        return Err(StatsError::insufficient(2, n_participants));
    }
    let n_items = matrix[0].len();
    for row in matrix {
        check_paired(&matrix[0], row)?;
    }
    if n_items < 2 {
        return Err(StatsError::insufficient(2, n_items));
    }

    let columns: Vec<Vec<f64>> = (0..n_items)
        .map(|j| matrix.iter().map(|row| row[j]).collect())
        .collect();
    let item_stats: Vec<SummaryStats> = columns
        .iter()
        .map(|c| SummaryStats::from_sample(c))
        .collect();
    let item_variances: Vec<f64> = item_stats
        .iter()
        .map(|s| s.variance().unwrap_or(0.0))
        .collect();

    let total_scores: Vec<f64> = matrix.iter().map(|row| row.iter().sum()).collect();
    let total_variance = variance(&total_scores);
    if total_variance == 0.0 {
        return Err(StatsError::DegenerateVariance);
    }

    let sum_item_variances: f64 = item_variances.iter().sum();
    let alpha = alpha_from(n_items, sum_item_variances, total_variance);

    let items = (0..n_items)
        .map(|j| {
            let rest: Vec<f64> = total_scores
                .iter()
                .zip(&columns[j])
                .map(|(total, item)| total - item)
                .collect();
            let rest_stats = SummaryStats::from_sample(&rest);

            let corrected_item_total_correlation =
                (!item_stats[j].is_constant() && !rest_stats.is_constant()).then(|| {
                    (sum_of_products(&columns[j], &rest)
                        / (item_stats[j].ss * rest_stats.ss).sqrt())
                    .clamp(-1.0, 1.0)
                });

            let rest_variance = rest_stats.variance().unwrap_or(0.0);
            let alpha_if_deleted = (n_items >= 3 && rest_variance > 0.0).then(|| {
                alpha_from(
                    n_items - 1,
                    sum_item_variances - item_variances[j],
                    rest_variance,
                )
            });

            ItemStatistics {
                name: item_names
                    .and_then(|names| names.get(j))
                    .cloned()
                    .unwrap_or_else(|| format!("Item {}", j + 1)),
                mean: item_stats[j].mean,
                variance: item_variances[j],
                corrected_item_total_correlation,
                alpha_if_deleted,
            }
        })
        .collect();

    Ok(ReliabilityResult {
        n_participants,
        n_items,
        alpha,
        level: ReliabilityLevel::from_alpha(alpha),
        sum_item_variances,
        total_variance,
        total_scores,
        items,
    })
}
