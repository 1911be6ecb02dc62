#![warn(missing_docs)]
//! Statwise CLI Library
//!
//! Runs analysis plans from the command line. A plan is a TOML file listing
//! analyses; each one is executed by the engine and collected into a report
//! printed as human-readable text or JSON.
//!
//! # Example
//!
//! ```text
//! statwise study.toml --format json -o report.json
//! statwise list study.toml
//! statwise init > statwise.toml
//! ```

mod config;
mod executor;
mod plan;

pub use config::*;
pub use executor::{FormatOptions, execute_analysis, execute_plan, format_human_output};
pub use plan::{AnalysisPlan, AnalysisRequest, AnalysisSpec, DataSource, GroupSpec};

use clap::{Parser, Subcommand};
use statwise_report::{OutputFormat, Report, generate_json_report};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Statwise CLI arguments
#[derive(Parser, Debug)]
#[command(name = "statwise")]
#[command(author, version, about = "Statwise - classical inferential statistics from raw data")]
pub struct Cli {
    /// Optional subcommand (Run, List, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Analysis plan to run when no subcommand is given
    pub plan: Option<PathBuf>,

    /// Output format: human, json (defaults to statwise.toml, then human)
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Decimal places in human output
    #[arg(long, global = true)]
    pub precision: Option<usize>,

    /// Configuration file (skips statwise.toml discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run every analysis in a plan (default)
    Run {
        /// Analysis plan (TOML)
        plan: PathBuf,
    },
    /// List the analyses in a plan without running them
    List {
        /// Analysis plan (TOML)
        plan: PathBuf,
    },
    /// Print a default statwise.toml
    Init,
}

/// Run the Statwise CLI with the process arguments.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if something goes wrong.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the Statwise CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    // Explicit --config wins over discovery; CLI flags override both
    let config = match &cli.config {
        Some(path) => StatwiseConfig::load(path)?,
        None => StatwiseConfig::discover().unwrap_or_default(),
    };

    match &cli.command {
        Some(Commands::Run { plan }) => run_plan(&cli, &config, plan),
        Some(Commands::List { plan }) => list_analyses(plan),
        Some(Commands::Init) => {
            print!("{}", StatwiseConfig::default_toml());
            Ok(())
        }
        None => match &cli.plan {
            Some(plan) => run_plan(&cli, &config, plan),
            None => Err(anyhow::anyhow!(
                "No analysis plan given; try `statwise run <PLAN>` or `statwise init`"
            )),
        },
    }
}

/// Logs go to stderr so they never mix with a report on stdout
fn init_logging(verbose: bool) {
    let filter = if verbose {
        "statwise=debug"
    } else {
        "statwise=info"
    };
    // A second initialisation (repeated runs in one process) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Resolve the output format: CLI flag, then config, then human
fn resolve_format(cli: &Cli, config: &StatwiseConfig) -> OutputFormat {
    let requested = cli.format.as_deref().unwrap_or(&config.output.format);
    requested.parse().unwrap_or_else(|e| {
        warn!("{}; falling back to human output", e);
        OutputFormat::Human
    })
}

/// Layer format options: statwise.toml defaults, then CLI overrides
fn format_options(cli: &Cli, config: &StatwiseConfig) -> FormatOptions {
    FormatOptions {
        precision: cli.precision.unwrap_or(config.output.precision),
        include_intermediates: config.report.include_intermediates,
    }
}

/// Render a report in the requested format
pub fn render_report(
    report: &Report,
    format: OutputFormat,
    options: &FormatOptions,
) -> anyhow::Result<String> {
    let output = match format {
        OutputFormat::Json => generate_json_report(report)?,
        OutputFormat::Human => format_human_output(report, options),
    };
    Ok(output)
}

fn run_plan(cli: &Cli, config: &StatwiseConfig, plan_path: &Path) -> anyhow::Result<()> {
    let plan = AnalysisPlan::load(plan_path)?;
    info!("Loaded plan {}", plan_path.display());

    let entries = execute_plan(&plan);
    let report = Report::new(plan_path.display().to_string(), entries);

    let format = resolve_format(cli, config);
    let output = render_report(&report, format, &format_options(cli, config))?;

    if let Some(ref path) = cli.output {
        let mut file = std::fs::File::create(path)?;
        file.write_all(output.as_bytes())?;
        println!("Report written to: {}", path.display());
    } else {
        print!("{}", output);
    }

    if report.summary.failed > 0 {
        warn!(
            "{} of {} analyses failed",
            report.summary.failed, report.summary.total
        );
    }

    Ok(())
}

fn list_analyses(plan_path: &Path) -> anyhow::Result<()> {
    let plan = AnalysisPlan::load(plan_path)?;
    println!("Statwise Plan: {}", plan_path.display());

    let mut procedures: BTreeMap<&str, Vec<&AnalysisSpec>> = BTreeMap::new();
    for spec in &plan.analyses {
        procedures
            .entry(spec.request.procedure())
            .or_default()
            .push(spec);
    }

    for (procedure, specs) in &procedures {
        println!("├── procedure: {}", procedure);
        for spec in specs {
            println!("│   ├── {}", spec.id);
        }
    }

    println!("{} analyses found.", plan.analyses.len());
    Ok(())
}
