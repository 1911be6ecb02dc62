//! Integration tests for Statwise
//!
//! These tests verify the end-to-end behavior of the engine, the report
//! envelope and plan execution.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statwise::special::inv_normal_cdf;
use statwise::{
    Analysis, AnalysisPlan, AnalysisStatus, Group, Report, StatsError, SummaryStats,
    chi_square_independence, correlation, cronbach_alpha, execute_plan, generate_json_report,
    independent_t_test, linear_regression, normality_test, one_way_anova, rank,
};

const ANSCOMBE_X: [f64; 11] = [10.0, 8.0, 13.0, 9.0, 11.0, 14.0, 6.0, 4.0, 12.0, 7.0, 5.0];
const ANSCOMBE_Y: [f64; 11] = [
    8.04, 6.95, 7.58, 8.81, 8.33, 9.96, 7.24, 4.26, 10.84, 4.82, 5.68,
];

fn three_groups() -> Vec<Group> {
    vec![
        Group::new("Control", vec![5.0, 6.0, 5.0, 4.0, 7.0, 6.0]),
        Group::new("A", vec![7.0, 8.0, 9.0, 8.0, 7.0, 9.0]),
        Group::new("B", vec![9.0, 10.0, 8.0, 9.0, 10.0, 11.0]),
    ]
}

/// Two-pass sums survive a large offset
#[test]
fn test_sum_of_squares_shift_invariant() {
    let x = [4.0, 7.0, 13.0, 16.0];
    let naive: f64 = {
        let mean = x.iter().sum::<f64>() / 4.0;
        x.iter().map(|v| (v - mean).powi(2)).sum()
    };
    let shifted: Vec<f64> = x.iter().map(|v| v + 1e9).collect();

    let base = SummaryStats::from_sample(&x);
    let moved = SummaryStats::from_sample(&shifted);
    assert!((base.ss - naive).abs() < 1e-12);
    assert!((moved.ss - base.ss).abs() / base.ss < 1e-9);
}

#[test]
fn test_correlation_bounds() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..20 {
        let x: Vec<f64> = (0..30).map(|_| rng.gen_range(-50.0..50.0)).collect();
        let y: Vec<f64> = (0..30).map(|_| rng.gen_range(-50.0..50.0)).collect();
        let result = correlation(&x, &y).unwrap();
        assert!((-1.0..=1.0).contains(&result.pearson_r));
        assert!((-1.0..=1.0).contains(&result.spearman_rho));
        assert!((0.0..=1.0).contains(&result.p_value));
    }

    let x: Vec<f64> = (0..10).map(f64::from).collect();
    let up: Vec<f64> = x.iter().map(|v| 3.0 * v + 1.0).collect();
    let down: Vec<f64> = x.iter().map(|v| -0.5 * v).collect();
    let rising = correlation(&x, &up).unwrap();
    let falling = correlation(&x, &down).unwrap();
    assert!((rising.pearson_r - 1.0).abs() < 1e-12);
    assert!((rising.spearman_rho - 1.0).abs() < 1e-12);
    assert!((falling.pearson_r + 1.0).abs() < 1e-12);
    assert!(rising.p_value < 1e-10);
}

#[test]
fn test_rank_ties() {
    assert_eq!(rank(&[5.0, 5.0, 5.0]).ranks, vec![2.0, 2.0, 2.0]);
    assert_eq!(rank(&[1.0, 2.0, 3.0]).ranks, vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_anscombe_correlation() {
    let result = correlation(&ANSCOMBE_X, &ANSCOMBE_Y).unwrap();
    assert_eq!(result.n, 11);
    assert!((result.pearson_r - 0.8164).abs() < 1e-3);
    assert!(result.is_significant);
}

#[test]
fn test_regression_recovers_line() {
    let (a, b) = (12.0, -0.75);
    let x: Vec<f64> = (1..=20).map(f64::from).collect();
    let y: Vec<f64> = x.iter().map(|v| a + b * v).collect();

    let fit = linear_regression(&x, &y, "hours", "score").unwrap();
    assert!((fit.intercept - a).abs() < 1e-9);
    assert!((fit.slope - b).abs() < 1e-9);
    assert!((fit.r_squared - 1.0).abs() < 1e-9);
}

#[test]
fn test_anova_fixture() {
    let result = one_way_anova(&three_groups()).unwrap();
    assert_eq!(result.df_between, 2);
    assert_eq!(result.df_within, 15);
    assert!((result.f_statistic - 24.5).abs() < 1e-9);
    assert!(result.is_significant);
}

/// With two groups, ANOVA and the pooled t-test are the same test
#[test]
fn test_anova_matches_t_squared() {
    let a = [12.1, 14.3, 11.8, 15.0, 13.2, 12.7];
    let b = [15.9, 16.4, 14.8, 17.2, 16.0];
    let anova = one_way_anova(&[Group::new("a", a), Group::new("b", b)]).unwrap();
    let t = independent_t_test(&a, &b, "a", "b").unwrap();

    assert!((anova.f_statistic - t.t_statistic.powi(2)).abs() < 1e-9);
    assert!((anova.p_value - t.p_value).abs() < 1e-9);
}

#[test]
fn test_chi_square_independent_table() {
    let mut x = Vec::new();
    let mut y = Vec::new();
    for (row, col, count) in [("u", "p", 6), ("u", "q", 9), ("v", "p", 4), ("v", "q", 6)] {
        for _ in 0..count {
            x.push(row);
            y.push(col);
        }
    }
    // Margins 15/10 by 10/15 with counts 6/9/4/6 match expectation exactly
    let result = chi_square_independence(&x, &y, "x", "y").unwrap();
    assert!(result.chi_square.abs() < 1e-12);
    assert!((result.p_value - 1.0).abs() < 1e-9);
}

#[test]
fn test_normality_detects_departure() {
    let normal: Vec<f64> = (0..200)
        .map(|i| 100.0 + 15.0 * inv_normal_cdf((i as f64 + 0.5) / 200.0))
        .collect();
    let passed = normality_test(&normal, "iq").unwrap();
    assert!(passed.p_value > 0.05);
    assert!(passed.is_normal);

    let skewed = normality_test(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 100.0], "skewed").unwrap();
    assert!(skewed.p_value < 0.05);
    assert!(!skewed.is_normal);
}

#[test]
fn test_cronbach_latent_and_noise() {
    let mut rng = StdRng::seed_from_u64(11);
    let coherent: Vec<Vec<f64>> = (0..60)
        .map(|_| {
            let latent: f64 = rng.gen_range(1.0..7.0);
            (0..4).map(|_| latent + rng.gen_range(-0.3..0.3)).collect()
        })
        .collect();
    let noise: Vec<Vec<f64>> = (0..500)
        .map(|_| (0..4).map(|_| rng.gen_range(1.0..7.0)).collect())
        .collect();

    assert!(cronbach_alpha(&coherent, None).unwrap().alpha > 0.95);
    assert!(cronbach_alpha(&noise, None).unwrap().alpha.abs() < 0.35);
}

#[test]
fn test_degenerate_inputs_fail() {
    assert_eq!(
        correlation(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]).unwrap_err(),
        StatsError::DegenerateVariance
    );
    assert!(matches!(
        normality_test(&[1.0, 2.0], "x"),
        Err(StatsError::InsufficientData { .. })
    ));
}

/// One bad analysis leaves the rest of the batch intact
#[test]
fn test_plan_batch_isolates_failures() {
    let plan = AnalysisPlan::parse(
        r#"
        [[analysis]]
        id = "anscombe"
        procedure = "correlation"
        x = "10 8 13 9 11 14 6 4 12 7 5"
        y = "8.04 6.95 7.58 8.81 8.33 9.96 7.24 4.26 10.84 4.82 5.68"

        [[analysis]]
        id = "flat"
        procedure = "normality"
        data = "3 3 3 3 3 3"

        [[analysis]]
        id = "groups"
        procedure = "anova"
        groups = [
            { name = "Control", data = "5 6 5 4 7 6" },
            { name = "A", data = "7 8 9 8 7 9" },
            { name = "B", data = "9 10 8 9 10 11" },
        ]
        "#,
        ".",
    )
    .unwrap();

    let report = Report::new("inline", execute_plan(&plan));
    assert_eq!(report.summary.total, 3);
    assert_eq!(report.summary.failed, 1);
    assert_eq!(report.summary.significant, 2);
    assert_eq!(report.entries[1].status, AnalysisStatus::Failed);

    match &report.entries[2].analysis {
        Some(Analysis::Anova(anova)) => assert!((anova.f_statistic - 24.5).abs() < 1e-9),
        other => panic!("unexpected analysis: {:?}", other),
    }

    let json = generate_json_report(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["entries"][0]["analysis"]["n"], 11);
    assert_eq!(value["entries"][1]["failure"]["kind"], "degenerate_variance");
}
