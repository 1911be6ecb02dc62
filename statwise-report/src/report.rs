//! Report Data Structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use statwise_stats::{
    AnovaResult, ChiSquareResult, CorrelationResult, DescriptiveResult, KruskalWallisResult,
    MannWhitneyResult, NormalityResult, RegressionResult, ReliabilityResult, StatsError,
    TTestResult,
};

/// Version of the JSON layout below
pub const SCHEMA_VERSION: u32 = 1;

/// Complete analysis report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report metadata
    pub meta: ReportMeta,
    /// One entry per planned analysis, in plan order
    pub entries: Vec<AnalysisEntry>,
    /// Counts over the entries
    pub summary: ReportSummary,
}

impl Report {
    /// Build a report over `entries` produced from `source` (usually a plan path)
    pub fn new(source: impl Into<String>, entries: Vec<AnalysisEntry>) -> Self {
        let summary = ReportSummary::from_entries(&entries);
        Self {
            meta: ReportMeta {
                schema_version: SCHEMA_VERSION,
                version: env!("CARGO_PKG_VERSION").to_string(),
                timestamp: Utc::now(),
                source: source.into(),
            },
            entries,
            summary,
        }
    }
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Layout version of the report
    pub schema_version: u32,
    /// Version of the producing crate
    pub version: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// Where the analyses came from
    pub source: String,
}

/// Result record of any procedure, tagged by procedure name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "procedure", rename_all = "kebab-case")]
pub enum Analysis {
    /// Descriptive statistics of one sample
    Describe(DescriptiveResult),
    /// Pearson and Spearman correlation
    Correlation(CorrelationResult),
    /// One-way ANOVA
    Anova(AnovaResult),
    /// Independent or paired t-test
    TTest(TTestResult),
    /// Simple linear regression
    Regression(RegressionResult),
    /// Chi-square test of independence
    ChiSquare(ChiSquareResult),
    /// Mann-Whitney U
    MannWhitney(MannWhitneyResult),
    /// Kruskal-Wallis H
    KruskalWallis(KruskalWallisResult),
    /// Cronbach's alpha
    Reliability(ReliabilityResult),
    /// Kolmogorov–Smirnov normality
    Normality(NormalityResult),
}

impl Analysis {
    /// Procedure name as used in plans and in the JSON tag
    pub fn procedure(&self) -> &'static str {
        match self {
            Analysis::Describe(_) => "describe",
            Analysis::Correlation(_) => "correlation",
            Analysis::Anova(_) => "anova",
            Analysis::TTest(_) => "t-test",
            Analysis::Regression(_) => "regression",
            Analysis::ChiSquare(_) => "chi-square",
            Analysis::MannWhitney(_) => "mann-whitney",
            Analysis::KruskalWallis(_) => "kruskal-wallis",
            Analysis::Reliability(_) => "reliability",
            Analysis::Normality(_) => "normality",
        }
    }

    /// Headline p-value; `None` for procedures without a test
    pub fn p_value(&self) -> Option<f64> {
        match self {
            Analysis::Describe(_) | Analysis::Reliability(_) => None,
            Analysis::Correlation(r) => Some(r.p_value),
            Analysis::Anova(r) => Some(r.p_value),
            Analysis::TTest(r) => Some(r.p_value),
            Analysis::Regression(r) => Some(r.p_value),
            Analysis::ChiSquare(r) => Some(r.p_value),
            Analysis::MannWhitney(r) => Some(r.p_value),
            Analysis::KruskalWallis(r) => Some(r.p_value),
            Analysis::Normality(r) => Some(r.p_value),
        }
    }

    /// Headline significance flag; `None` for procedures without a test
    pub fn is_significant(&self) -> Option<bool> {
        match self {
            Analysis::Describe(_) | Analysis::Reliability(_) => None,
            Analysis::Correlation(r) => Some(r.is_significant),
            Analysis::Anova(r) => Some(r.is_significant),
            Analysis::TTest(r) => Some(r.is_significant),
            Analysis::Regression(r) => Some(r.is_significant),
            Analysis::ChiSquare(r) => Some(r.is_significant),
            Analysis::MannWhitney(r) => Some(r.is_significant),
            Analysis::KruskalWallis(r) => Some(r.is_significant),
            Analysis::Normality(r) => Some(r.is_significant),
        }
    }
}

/// Outcome of one planned analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisEntry {
    /// Analysis identifier from the plan
    pub id: String,
    /// Procedure name
    pub procedure: String,
    /// Whether a result was produced
    pub status: AnalysisStatus,
    /// Result record on success
    pub analysis: Option<Analysis>,
    /// Reason on failure
    pub failure: Option<FailureInfo>,
}

impl AnalysisEntry {
    /// Entry for a successful analysis
    pub fn succeeded(id: impl Into<String>, analysis: Analysis) -> Self {
        Self {
            id: id.into(),
            procedure: analysis.procedure().to_string(),
            status: AnalysisStatus::Succeeded,
            analysis: Some(analysis),
            failure: None,
        }
    }

    /// Entry for an analysis that could not be computed
    pub fn failed(
        id: impl Into<String>,
        procedure: impl Into<String>,
        failure: FailureInfo,
    ) -> Self {
        Self {
            id: id.into(),
            procedure: procedure.into(),
            status: AnalysisStatus::Failed,
            analysis: None,
            failure: Some(failure),
        }
    }

    /// Significance of the result, if it has one
    pub fn is_significant(&self) -> bool {
        self.analysis
            .as_ref()
            .and_then(Analysis::is_significant)
            .unwrap_or(false)
    }
}

/// Analysis execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    /// A result record was produced
    Succeeded,
    /// The input could not be analysed
    Failed,
}

/// Failure information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureInfo {
    /// Stable machine-readable kind
    pub kind: String,
    /// Human-readable message
    pub message: String,
}

impl FailureInfo {
    /// Failure with an explicit kind
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl From<&StatsError> for FailureInfo {
    fn from(err: &StatsError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

/// Report summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Number of entries
    pub total: usize,
    /// Entries with a result
    pub succeeded: usize,
    /// Entries without a result
    pub failed: usize,
    /// Successful entries whose headline test is significant
    pub significant: usize,
}

impl ReportSummary {
    fn from_entries(entries: &[AnalysisEntry]) -> Self {
        let succeeded = entries
            .iter()
            .filter(|e| e.status == AnalysisStatus::Succeeded)
            .count();
        Self {
            total: entries.len(),
            succeeded,
            failed: entries.len() - succeeded,
            significant: entries.iter().filter(|e| e.is_significant()).count(),
        }
    }
}
