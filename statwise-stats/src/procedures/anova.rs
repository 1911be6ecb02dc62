//! One-Way ANOVA
//!
//! Partitions the total sum of squares into between-group and within-group
//! parts. Every SS is taken from two-pass sums:
//! - SSW = Σ SSᵢ over the groups
//! - SSB = Σ nᵢ(x̄ᵢ − x̄)²
//! - SST = SS of the pooled observations

use super::{Group, GroupSummary, groups_with_data};
use crate::error::StatsError;
use crate::is_significant;
use crate::significance::f_p_value;
use crate::summary::SummaryStats;
use serde::{Deserialize, Serialize};

/// Result of a one-way analysis of variance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnovaResult {
    /// Per-group descriptives, in input order
    pub groups: Vec<GroupSummary>,
    /// Total number of observations
    pub n_total: usize,
    /// Mean of all observations
    pub grand_mean: f64,
    /// Between-group sum of squares
    pub ss_between: f64,
    /// Within-group sum of squares
    pub ss_within: f64,
    /// Total sum of squares
    pub ss_total: f64,
    /// k − 1
    pub df_between: usize,
    /// N − k
    pub df_within: usize,
    /// N − 1
    pub df_total: usize,
    /// SSB / dfB
    pub ms_between: f64,
    /// SSW / dfW
    pub ms_within: f64,
    /// MSB / MSW
    pub f_statistic: f64,
    /// Upper-tail p-value of F
    pub p_value: f64,
    /// p < 0.05
    pub is_significant: bool,
    /// SSB / SST
    pub eta_squared: f64,
}

/// One-way ANOVA over groups; empty groups are ignored
pub fn one_way_anova(groups: &[Group]) -> Result<AnovaResult, StatsError> {
    let groups = groups_with_data(groups);
    if groups.len() < 2 {
        return Err(StatsError::insufficient(2, groups.len()));
    }
    if let Some(small) = groups.iter().find(|g| g.values.len() < 2) {
        return Err(StatsError::insufficient(2, small.values.len()));
    }

    let stats: Vec<SummaryStats> = groups
        .iter()
        .map(|g| SummaryStats::from_sample(&g.values))
        .collect();

    let pooled: Vec<f64> = groups.iter().flat_map(|g| g.values.iter().copied()).collect();
    let total = SummaryStats::from_sample(&pooled);

    let k = groups.len();
    let n_total = total.n;

    let ss_within: f64 = stats.iter().map(|s| s.ss).sum();
    let ss_between: f64 = stats
        .iter()
        .map(|s| s.n as f64 * (s.mean - total.mean).powi(2))
        .sum();

    let df_between = k - 1;
    let df_within = n_total - k;

    let ms_between = ss_between / df_between as f64;
    let ms_within = ss_within / df_within as f64;
    if ms_within == 0.0 {
        return Err(StatsError::DegenerateVariance);
    }

    let f_statistic = ms_between / ms_within;
    let p_value = f_p_value(f_statistic, df_between as f64, df_within as f64);

    Ok(AnovaResult {
        groups: groups
            .iter()
            .zip(&stats)
            .map(|(g, s)| GroupSummary::new(&g.name, s))
            .collect(),
        n_total,
        grand_mean: total.mean,
        ss_between,
        ss_within,
        ss_total: total.ss,
        df_between,
        df_within,
        df_total: n_total - 1,
        ms_between,
        ms_within,
        f_statistic,
        p_value,
        is_significant: is_significant(p_value),
        eta_squared: if total.ss > 0.0 {
            ss_between / total.ss
        } else {
            0.0
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Vec<Group> {
        vec![
            Group::new("Control", vec![5.0, 6.0, 5.0, 4.0, 7.0, 6.0]),
            Group::new("A", vec![7.0, 8.0, 9.0, 8.0, 7.0, 9.0]),
            Group::new("B", vec![9.0, 10.0, 8.0, 9.0, 10.0, 11.0]),
        ]
    }

    #[test]
    fn test_three_group_fixture() {
        let result = one_way_anova(&fixture()).unwrap();

        assert_eq!(result.df_between, 2);
        assert_eq!(result.df_within, 15);
        assert_eq!(result.df_total, 17);
        assert_eq!(result.n_total, 18);
        assert!(result.is_significant);
        assert!(result.p_value < 0.001);
        assert!((result.grand_mean - 7.666_666_666_666_667).abs() < 1e-12);
        assert_eq!(result.groups[0].name, "Control");
        assert!((result.groups[2].mean - 9.5).abs() < 1e-12);
    }

    #[test]
    fn test_ss_partition() {
        let result = one_way_anova(&fixture()).unwrap();
        assert!((result.ss_between + result.ss_within - result.ss_total).abs() < 1e-9);
        assert!((0.0..=1.0).contains(&result.eta_squared));
    }

    #[test]
    fn test_identical_means_not_significant() {
        let groups = vec![
            Group::new("a", vec![1.0, 2.0, 3.0]),
            Group::new("b", vec![3.0, 2.0, 1.0]),
        ];
        let result = one_way_anova(&groups).unwrap();
        assert!(result.f_statistic.abs() < 1e-12);
        assert!((result.p_value - 1.0).abs() < 1e-12);
        assert!(!result.is_significant);
    }

    #[test]
    fn test_empty_groups_ignored() {
        let mut groups = fixture();
        groups.push(Group::new("unused", Vec::new()));
        let result = one_way_anova(&groups).unwrap();
        assert_eq!(result.groups.len(), 3);
        assert_eq!(result.df_between, 2);
    }

    #[test]
    fn test_failures() {
        let one = vec![Group::new("only", vec![1.0, 2.0])];
        assert!(matches!(
            one_way_anova(&one),
            Err(StatsError::InsufficientData { .. })
        ));

        let tiny = vec![Group::new("a", vec![1.0, 2.0]), Group::new("b", vec![3.0])];
        assert!(matches!(
            one_way_anova(&tiny),
            Err(StatsError::InsufficientData { .. })
        ));

        let flat = vec![
            Group::new("a", vec![2.0, 2.0]),
            Group::new("b", vec![5.0, 5.0]),
        ];
        assert_eq!(one_way_anova(&flat).unwrap_err(), StatsError::DegenerateVariance);
    }
}
