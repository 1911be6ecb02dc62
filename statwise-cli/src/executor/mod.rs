//! Analysis Executor
//!
//! Runs the analyses of a plan and renders the resulting report.
//!
//! ## Pipeline Overview
//!
//! ```text
//! AnalysisPlan (from TOML)
//!       │
//!       ▼
//! ┌─────────────┐
//! │  execution  │  Read data, run procedures, record failures
//! └──────┬──────┘
//!        │
//!        ▼
//!   statwise_report::Report
//!        │
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  Human-readable output
//! └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`execution`] - Per-analysis execution with failure isolation
//! - [`formatting`] - Human-readable output formatting

mod execution;
mod formatting;

// Re-export public API
pub use execution::{execute_analysis, execute_plan};
pub use formatting::{FormatOptions, format_human_output};
