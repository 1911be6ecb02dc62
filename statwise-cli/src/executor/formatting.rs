//! Output Formatting
//!
//! Human-readable output formatting for analysis reports.
//!
//! Generates terminal-friendly output with:
//! - One block per analysis with a status icon (✓/✗)
//! - Headline statistic, degrees of freedom, p-value and significance
//! - Effect sizes and their conventional reading
//! - Step-by-step sums (SS, df, rank sums, expected counts) when enabled

use statwise_report::{Analysis, AnalysisStatus, Report};
use statwise_stats::{
    AnovaResult, ChiSquareResult, CorrelationResult, DescriptiveResult, KruskalWallisResult,
    MannWhitneyResult, NormalityResult, RegressionResult, ReliabilityResult, TTestResult,
};

/// Options for human output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Decimal places
    pub precision: usize,
    /// Show step-by-step sums
    pub include_intermediates: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            precision: 4,
            include_intermediates: true,
        }
    }
}

/// Writes indented lines with a fixed precision
struct Block<'a> {
    out: &'a mut String,
    precision: usize,
}

impl Block<'_> {
    fn line(&mut self, text: impl AsRef<str>) {
        self.out.push_str("      ");
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn num(&self, value: f64) -> String {
        format!("{:.*}", self.precision, value)
    }

    fn opt(&self, value: Option<f64>) -> String {
        value.map_or_else(|| "n/a".to_string(), |v| self.num(v))
    }

    /// p-values below the printable precision show as "< 0.0001"
    fn p(&self, p: f64) -> String {
        let floor = 10f64.powi(-(self.precision as i32));
        if p < floor {
            format!("< {}", self.num(floor))
        } else {
            self.num(p)
        }
    }

    fn verdict(significant: bool) -> &'static str {
        if significant {
            "significant at 0.05"
        } else {
            "not significant at 0.05"
        }
    }
}

/// Format a report for human-readable terminal display
///
/// # Arguments
/// * `report` - Complete analysis report
/// * `options` - Precision and detail level
///
/// # Returns
/// Formatted string suitable for terminal output
pub fn format_human_output(report: &Report, options: &FormatOptions) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("Statwise Results\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    for entry in &report.entries {
        let status_icon = match entry.status {
            AnalysisStatus::Succeeded => "✓",
            AnalysisStatus::Failed => "✗",
        };
        output.push_str(&format!(
            "  {} {} ({})\n",
            status_icon, entry.id, entry.procedure
        ));

        let mut block = Block {
            out: &mut output,
            precision: options.precision,
        };
        if let Some(analysis) = &entry.analysis {
            format_analysis(&mut block, analysis, options.include_intermediates);
        }
        if let Some(failure) = &entry.failure {
            block.line(format!("error [{}]: {}", failure.kind, failure.message));
        }

        output.push('\n');
    }

    // Summary
    output.push_str("Summary\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  Total: {}  Succeeded: {}  Failed: {}  Significant: {}\n",
        report.summary.total,
        report.summary.succeeded,
        report.summary.failed,
        report.summary.significant
    ));

    output
}

fn format_analysis(b: &mut Block<'_>, analysis: &Analysis, detail: bool) {
    match analysis {
        Analysis::Describe(r) => format_describe(b, r, detail),
        Analysis::Correlation(r) => format_correlation(b, r, detail),
        Analysis::Anova(r) => format_anova(b, r, detail),
        Analysis::TTest(r) => format_t_test(b, r, detail),
        Analysis::Regression(r) => format_regression(b, r, detail),
        Analysis::ChiSquare(r) => format_chi_square(b, r, detail),
        Analysis::MannWhitney(r) => format_mann_whitney(b, r, detail),
        Analysis::KruskalWallis(r) => format_kruskal_wallis(b, r, detail),
        Analysis::Reliability(r) => format_reliability(b, r, detail),
        Analysis::Normality(r) => format_normality(b, r, detail),
    }
}

fn format_describe(b: &mut Block<'_>, r: &DescriptiveResult, detail: bool) {
    b.line(format!(
        "{}: n = {}  mean = {}  median = {}  sd = {}",
        r.name,
        r.n,
        b.num(r.mean),
        b.num(r.median),
        b.opt(r.std_dev)
    ));
    b.line(format!(
        "min = {}  max = {}  range = {}  se = {}  cv = {}%",
        b.num(r.min),
        b.num(r.max),
        b.num(r.range),
        b.opt(r.standard_error),
        b.num(r.coefficient_of_variation())
    ));
    b.line(format!(
        "skewness = {}  excess kurtosis = {}",
        b.opt(r.skewness),
        b.opt(r.excess_kurtosis)
    ));
    let bp = &r.box_plot;
    b.line(format!(
        "box plot: [{}, {}, {}, {}, {}]  outliers: {}",
        b.num(bp.min),
        b.num(bp.q1),
        b.num(bp.median),
        b.num(bp.q3),
        b.num(bp.max),
        bp.outlier_count()
    ));
    if detail {
        b.line(format!(
            "Σx = {}  Σx² = {}  SS = {}",
            b.num(r.summary.sum),
            b.num(r.summary.sum_of_squares),
            b.num(r.summary.ss)
        ));
    }
}

fn format_correlation(b: &mut Block<'_>, r: &CorrelationResult, detail: bool) {
    b.line(format!(
        "Pearson r = {}  r² = {}  t({}) = {}  p = {}  ({})",
        b.num(r.pearson_r),
        b.num(r.r_squared),
        r.df,
        b.opt(r.t_statistic),
        b.p(r.p_value),
        Block::verdict(r.is_significant)
    ));
    b.line(format!(
        "Spearman ρ = {}  p = {}  strength: {}",
        b.num(r.spearman_rho),
        b.p(r.spearman_p_value),
        r.strength
    ));
    if detail {
        b.line(format!(
            "n = {}  Σx = {}  Σy = {}  Σx² = {}  Σy² = {}  Σxy = {}",
            r.n,
            b.num(r.sum_x),
            b.num(r.sum_y),
            b.num(r.sum_x2),
            b.num(r.sum_y2),
            b.num(r.sum_xy)
        ));
        b.line(format!(
            "SSx = {}  SSy = {}  SPxy = {}",
            b.num(r.ss_x),
            b.num(r.ss_y),
            b.num(r.sp_xy)
        ));
    }
}

fn format_anova(b: &mut Block<'_>, r: &AnovaResult, detail: bool) {
    b.line(format!(
        "F({}, {}) = {}  p = {}  η² = {}  ({})",
        r.df_between,
        r.df_within,
        b.num(r.f_statistic),
        b.p(r.p_value),
        b.num(r.eta_squared),
        Block::verdict(r.is_significant)
    ));
    for g in &r.groups {
        b.line(format!(
            "  {}: n = {}  mean = {}  sd = {}",
            g.name,
            g.n,
            b.num(g.mean),
            b.num(g.std_dev)
        ));
    }
    if detail {
        b.line(format!(
            "SSB = {}  SSW = {}  SST = {}  MSB = {}  MSW = {}",
            b.num(r.ss_between),
            b.num(r.ss_within),
            b.num(r.ss_total),
            b.num(r.ms_between),
            b.num(r.ms_within)
        ));
    }
}

fn format_t_test(b: &mut Block<'_>, r: &TTestResult, detail: bool) {
    b.line(format!(
        "{} t({}) = {}  p = {}  ({})",
        r.kind,
        r.df,
        b.num(r.t_statistic),
        b.p(r.p_value),
        Block::verdict(r.is_significant)
    ));
    b.line(format!(
        "mean difference = {}  se = {}  Cohen's d = {} ({})",
        b.num(r.mean_difference),
        b.num(r.standard_error),
        b.num(r.cohens_d),
        r.effect
    ));
    for g in [&r.group_a, &r.group_b] {
        b.line(format!(
            "  {}: n = {}  mean = {}  sd = {}",
            g.name,
            g.n,
            b.num(g.mean),
            b.num(g.std_dev)
        ));
    }
    if detail {
        if let Some(pooled) = r.pooled_variance {
            b.line(format!("pooled variance = {}", b.num(pooled)));
        }
        if let Some(sd) = r.std_dev_difference {
            b.line(format!("sd of differences = {}", b.num(sd)));
        }
    }
}

fn format_regression(b: &mut Block<'_>, r: &RegressionResult, detail: bool) {
    b.line(format!(
        "{} = {} + {}·{}",
        r.label_y,
        b.num(r.intercept),
        b.num(r.slope),
        r.label_x
    ));
    b.line(format!(
        "r² = {}  adjusted r² = {}  F(1, {}) = {}  p = {}  ({})",
        b.num(r.r_squared),
        b.num(r.adjusted_r_squared),
        r.df_residual,
        b.opt(r.f_statistic),
        b.p(r.p_value),
        Block::verdict(r.is_significant)
    ));
    b.line(format!(
        "slope se = {}  t = {}  p = {}  se of estimate = {}",
        b.num(r.slope_standard_error),
        b.opt(r.slope_t),
        b.p(r.slope_p_value),
        b.num(r.standard_error_of_estimate)
    ));
    if detail {
        b.line(format!(
            "SSx = {}  SPxy = {}  SSreg = {}  SSres = {}  SStotal = {}",
            b.num(r.ss_x),
            b.num(r.sp_xy),
            b.num(r.ss_regression),
            b.num(r.ss_residual),
            b.num(r.ss_total)
        ));
    }
}

fn format_chi_square(b: &mut Block<'_>, r: &ChiSquareResult, detail: bool) {
    b.line(format!(
        "χ²({}) = {}  p = {}  Cramér's V = {}  ({})",
        r.df,
        b.num(r.chi_square),
        b.p(r.p_value),
        b.num(r.cramers_v),
        Block::verdict(r.is_significant)
    ));
    b.line(format!(
        "{} × {}: {} × {} table, N = {}",
        r.label_x,
        r.label_y,
        r.row_categories.len(),
        r.column_categories.len(),
        r.grand_total
    ));
    if r.cells_expected_below_five > 0 {
        b.line(format!(
            "warning: {} cell(s) expect fewer than 5 (min {})",
            r.cells_expected_below_five,
            b.num(r.min_expected)
        ));
    }
    if detail {
        for (row, label) in r.row_categories.iter().enumerate() {
            let cells: Vec<String> = r.observed[row]
                .iter()
                .zip(&r.expected[row])
                .map(|(o, e)| format!("{} ({})", o, b.num(*e)))
                .collect();
            b.line(format!("  {}: {}", label, cells.join("  ")));
        }
    }
}

fn format_mann_whitney(b: &mut Block<'_>, r: &MannWhitneyResult, detail: bool) {
    b.line(format!(
        "U = {}  z = {}  p = {}  r = {}  ({})",
        b.num(r.u_statistic),
        b.num(r.z),
        b.p(r.p_value),
        b.num(r.effect_size_r),
        Block::verdict(r.is_significant)
    ));
    b.line(format!(
        "  {}: n = {}  median = {}  mean rank = {}",
        r.name_a,
        r.n_a,
        b.num(r.median_a),
        b.num(r.mean_rank_a)
    ));
    b.line(format!(
        "  {}: n = {}  median = {}  mean rank = {}",
        r.name_b,
        r.n_b,
        b.num(r.median_b),
        b.num(r.mean_rank_b)
    ));
    if detail {
        b.line(format!(
            "R₁ = {}  R₂ = {}  U₁ = {}  U₂ = {}  Σ(t³−t) = {}",
            b.num(r.rank_sum_a),
            b.num(r.rank_sum_b),
            b.num(r.u_a),
            b.num(r.u_b),
            b.num(r.tie_correction)
        ));
    }
}

fn format_kruskal_wallis(b: &mut Block<'_>, r: &KruskalWallisResult, detail: bool) {
    b.line(format!(
        "H({}) = {}  p = {}  ε² = {}  ({})",
        r.df,
        b.num(r.h_statistic),
        b.p(r.p_value),
        b.num(r.epsilon_squared),
        Block::verdict(r.is_significant)
    ));
    for g in &r.groups {
        let rank_sum = if detail {
            format!("  rank sum = {}", b.num(g.rank_sum))
        } else {
            String::new()
        };
        b.line(format!(
            "  {}: n = {}  median = {}  mean rank = {}{}",
            g.name,
            g.n,
            b.num(g.median),
            b.num(g.mean_rank),
            rank_sum
        ));
    }
    if detail {
        b.line(format!(
            "H uncorrected = {}  tie correction = {}",
            b.num(r.h_uncorrected),
            b.num(r.correction_factor)
        ));
    }
}

fn format_reliability(b: &mut Block<'_>, r: &ReliabilityResult, detail: bool) {
    b.line(format!(
        "Cronbach's α = {} ({})  {} items, {} participants",
        b.num(r.alpha),
        r.level,
        r.n_items,
        r.n_participants
    ));
    for item in &r.items {
        b.line(format!(
            "  {}: mean = {}  r(item, rest) = {}  α if deleted = {}",
            item.name,
            b.num(item.mean),
            b.opt(item.corrected_item_total_correlation),
            b.opt(item.alpha_if_deleted)
        ));
    }
    if detail {
        b.line(format!(
            "Σ item variances = {}  total variance = {}",
            b.num(r.sum_item_variances),
            b.num(r.total_variance)
        ));
    }
}

fn format_normality(b: &mut Block<'_>, r: &NormalityResult, detail: bool) {
    let reading = if r.is_normal {
        "consistent with normal"
    } else {
        "departs from normal"
    };
    b.line(format!(
        "{}: D = {}  p = {}  ({})",
        r.variable_name,
        b.num(r.d_statistic),
        b.p(r.p_value),
        reading
    ));
    b.line(format!(
        "n = {}  mean = {}  sd = {}  skewness = {}  excess kurtosis = {}",
        r.n,
        b.num(r.mean),
        b.num(r.std_dev),
        b.opt(r.skewness),
        b.opt(r.excess_kurtosis)
    ));
    if detail {
        b.line(format!(
            "D⁺ = {}  D⁻ = {}  λ = {}",
            b.num(r.d_plus),
            b.num(r.d_minus),
            b.num(r.lambda)
        ));
        for bin in &r.histogram {
            b.line(format!(
                "  [{}, {}]: {} (expected {})",
                b.num(bin.lower),
                b.num(bin.upper),
                bin.count,
                b.num(bin.expected_count)
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statwise_report::{AnalysisEntry, FailureInfo};
    use statwise_stats::{Group, correlation, one_way_anova};

    fn report() -> Report {
        let groups = vec![
            Group::new("Control", vec![5.0, 6.0, 5.0, 4.0, 7.0, 6.0]),
            Group::new("A", vec![7.0, 8.0, 9.0, 8.0, 7.0, 9.0]),
            Group::new("B", vec![9.0, 10.0, 8.0, 9.0, 10.0, 11.0]),
        ];
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [1.0, 3.0, 2.0, 5.0, 4.0];
        Report::new(
            "test",
            vec![
                AnalysisEntry::succeeded("anova", Analysis::Anova(one_way_anova(&groups).unwrap())),
                AnalysisEntry::succeeded(
                    "corr",
                    Analysis::Correlation(correlation(&x, &y).unwrap()),
                ),
                AnalysisEntry::failed(
                    "broken",
                    "normality",
                    FailureInfo::new("insufficient_data", "Not enough data"),
                ),
            ],
        )
    }

    #[test]
    fn test_human_output() {
        let output = format_human_output(&report(), &FormatOptions::default());

        assert!(output.contains("✓ anova (anova)"));
        assert!(output.contains("F(2, 15) = 24.5000"));
        assert!(output.contains("Control: n = 6"));
        assert!(output.contains("✗ broken (normality)"));
        assert!(output.contains("error [insufficient_data]"));
        assert!(output.contains("Total: 3  Succeeded: 2  Failed: 1  Significant: 1"));
        assert!(output.contains("SSB = "));
    }

    #[test]
    fn test_options_control_detail_and_precision() {
        let options = FormatOptions {
            precision: 2,
            include_intermediates: false,
        };
        let output = format_human_output(&report(), &options);

        assert!(output.contains("F(2, 15) = 24.50 "));
        assert!(!output.contains("SSB = "));
        assert!(!output.contains("Σxy"));
        // p of the ANOVA is far below 0.01
        assert!(output.contains("p = < 0.01"));
    }
}
