#![warn(missing_docs)]
//! Statwise Report - Result Envelope and Output
//!
//! Wraps engine result records into a serializable report:
//! - [`Analysis`] tags each record with the procedure that produced it
//! - [`AnalysisEntry`] records success or failure of one planned analysis
//! - [`Report`] adds metadata and a summary over a batch
//!
//! JSON output goes through [`generate_json_report`].

mod json;
mod report;

pub use json::generate_json_report;
pub use report::{
    Analysis, AnalysisEntry, AnalysisStatus, FailureInfo, Report, ReportMeta, ReportSummary,
    SCHEMA_VERSION,
};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable terminal output
    Human,
    /// JSON with full result records
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
