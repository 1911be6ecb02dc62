//! Analysis Execution
//!
//! Turns each planned analysis into an [`AnalysisEntry`]:
//!
//! ```text
//! AnalysisSpec (from the plan)
//!        │
//!        ▼
//!   DataSource::read   inline text or file next to the plan
//!        │
//!        ▼
//!   parse_*            Sample / categories / item matrix
//!        │
//!        ▼
//!   procedure          statwise_stats::{correlation, one_way_anova, ...}
//!        │
//!        ▼
//!  AnalysisEntry (Succeeded with the record, or Failed with the reason)
//! ```
//!
//! A failing analysis never stops the batch.

use crate::plan::{AnalysisPlan, AnalysisRequest, AnalysisSpec, DataSource, GroupSpec};
use statwise_report::{Analysis, AnalysisEntry, FailureInfo};
use statwise_stats::{
    Group, StatsError, TTestKind, chi_square_independence, correlation, cronbach_alpha, describe,
    kruskal_wallis, linear_regression, mann_whitney_u, normality_test, one_way_anova,
    parse_categories, parse_item_matrix, parse_sample, t_test,
};
use std::path::Path;
use tracing::{debug, info, warn};

/// Why an analysis produced no record
#[derive(Debug)]
enum Failure {
    /// A data file could not be read
    DataSource(String),
    /// The plan asks for something the procedure does not accept
    InvalidRequest(String),
    /// The engine rejected the data
    Stats(StatsError),
}

impl From<StatsError> for Failure {
    fn from(err: StatsError) -> Self {
        Failure::Stats(err)
    }
}

impl Failure {
    fn info(&self) -> FailureInfo {
        match self {
            Failure::DataSource(message) => FailureInfo::new("data_source", message.clone()),
            Failure::InvalidRequest(message) => {
                FailureInfo::new("invalid_request", message.clone())
            }
            Failure::Stats(err) => FailureInfo::from(err),
        }
    }
}

/// Run every analysis of a plan, in plan order
pub fn execute_plan(plan: &AnalysisPlan) -> Vec<AnalysisEntry> {
    info!("Running {} analyses", plan.analyses.len());
    let entries: Vec<AnalysisEntry> = plan
        .analyses
        .iter()
        .map(|spec| execute_analysis(spec, &plan.base_dir))
        .collect();

    let failed = entries.iter().filter(|e| e.failure.is_some()).count();
    info!("Finished {} analyses ({} failed)", entries.len(), failed);
    entries
}

/// Run one analysis; data files resolve against `base_dir`
pub fn execute_analysis(spec: &AnalysisSpec, base_dir: &Path) -> AnalysisEntry {
    let procedure = spec.request.procedure();
    debug!("Analysis '{}' ({})", spec.id, procedure);

    match run_request(&spec.id, &spec.request, base_dir) {
        Ok(analysis) => AnalysisEntry::succeeded(spec.id.clone(), analysis),
        Err(failure) => {
            let info = failure.info();
            warn!("Analysis '{}' failed: {}", spec.id, info.message);
            AnalysisEntry::failed(spec.id.clone(), procedure, info)
        }
    }
}

fn read_text(source: &DataSource, base_dir: &Path) -> Result<String, Failure> {
    debug!("Reading {}", source.describe());
    source
        .read(base_dir)
        .map_err(|e| Failure::DataSource(format!("cannot read {}: {}", source.describe(), e)))
}

fn read_sample(source: &DataSource, base_dir: &Path) -> Result<Vec<f64>, Failure> {
    Ok(parse_sample(&read_text(source, base_dir)?))
}

fn read_groups(groups: &[GroupSpec], base_dir: &Path) -> Result<Vec<Group>, Failure> {
    groups
        .iter()
        .map(|g| -> Result<Group, Failure> {
            Ok(Group::new(g.name.clone(), read_sample(&g.data, base_dir)?))
        })
        .collect()
}

fn name_or(name: &Option<String>, fallback: &str) -> String {
    name.clone().unwrap_or_else(|| fallback.to_string())
}

fn run_request(id: &str, request: &AnalysisRequest, base_dir: &Path) -> Result<Analysis, Failure> {
    let analysis = match request {
        AnalysisRequest::Describe { data, name } => {
            let values = read_sample(data, base_dir)?;
            Analysis::Describe(describe(&values, &name_or(name, id))?)
        }
        AnalysisRequest::Correlation { x, y } => {
            let x = read_sample(x, base_dir)?;
            let y = read_sample(y, base_dir)?;
            Analysis::Correlation(correlation(&x, &y)?)
        }
        AnalysisRequest::Anova { groups } => {
            Analysis::Anova(one_way_anova(&read_groups(groups, base_dir)?)?)
        }
        AnalysisRequest::TTest {
            a,
            b,
            kind,
            name_a,
            name_b,
        } => {
            let kind: TTestKind = match kind {
                Some(kind) => kind.parse().map_err(Failure::InvalidRequest)?,
                None => TTestKind::Independent,
            };
            let a = read_sample(a, base_dir)?;
            let b = read_sample(b, base_dir)?;
            Analysis::TTest(t_test(
                &a,
                &b,
                kind,
                &name_or(name_a, "A"),
                &name_or(name_b, "B"),
            )?)
        }
        AnalysisRequest::Regression {
            x,
            y,
            label_x,
            label_y,
        } => {
            let x = read_sample(x, base_dir)?;
            let y = read_sample(y, base_dir)?;
            Analysis::Regression(linear_regression(
                &x,
                &y,
                &name_or(label_x, "x"),
                &name_or(label_y, "y"),
            )?)
        }
        AnalysisRequest::ChiSquare {
            x,
            y,
            label_x,
            label_y,
        } => {
            let x = parse_categories(&read_text(x, base_dir)?);
            let y = parse_categories(&read_text(y, base_dir)?);
            Analysis::ChiSquare(chi_square_independence(
                &x,
                &y,
                &name_or(label_x, "x"),
                &name_or(label_y, "y"),
            )?)
        }
        AnalysisRequest::MannWhitney {
            a,
            b,
            name_a,
            name_b,
        } => {
            let a = read_sample(a, base_dir)?;
            let b = read_sample(b, base_dir)?;
            Analysis::MannWhitney(mann_whitney_u(
                &a,
                &b,
                &name_or(name_a, "A"),
                &name_or(name_b, "B"),
            )?)
        }
        AnalysisRequest::KruskalWallis { groups } => {
            Analysis::KruskalWallis(kruskal_wallis(&read_groups(groups, base_dir)?)?)
        }
        AnalysisRequest::Reliability { items, item_names } => {
            let matrix = parse_item_matrix(&read_text(items, base_dir)?)?;
            Analysis::Reliability(cronbach_alpha(&matrix, item_names.as_deref())?)
        }
        AnalysisRequest::Normality { data, name } => {
            let values = read_sample(data, base_dir)?;
            Analysis::Normality(normality_test(&values, &name_or(name, id))?)
        }
    };
    Ok(analysis)
}
