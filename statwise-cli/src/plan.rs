//! Analysis Plans
//!
//! A plan is a TOML file with one `[[analysis]]` table per analysis:
//!
//! ```toml
//! [[analysis]]
//! id = "height-weight"
//! procedure = "correlation"
//! x = "170 165 180 175"
//! y = { file = "weight.txt" }
//! ```
//!
//! Data fields hold pasted text inline or point at a file relative to the
//! plan. The text is parsed by the engine's `parse` helpers at run time.

use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Parsed analysis plan
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisPlan {
    /// Analyses in file order
    #[serde(default, rename = "analysis")]
    pub analyses: Vec<AnalysisSpec>,
    /// Directory that `file` data sources are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl AnalysisPlan {
    /// Load a plan from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read plan {}: {}", path.display(), e))?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::parse(&content, base_dir)
            .map_err(|e| anyhow::anyhow!("Invalid plan {}: {}", path.display(), e))
    }

    /// Parse plan text; `file` sources resolve against `base_dir`
    pub fn parse(content: &str, base_dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let mut plan: Self = toml::from_str(content)?;
        plan.base_dir = base_dir.into();

        let mut seen = BTreeSet::new();
        for spec in &plan.analyses {
            if !seen.insert(spec.id.as_str()) {
                anyhow::bail!("duplicate analysis id '{}'", spec.id);
            }
        }
        Ok(plan)
    }
}

/// One planned analysis
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisSpec {
    /// Identifier, unique within the plan
    pub id: String,
    /// Procedure and its inputs
    #[serde(flatten)]
    pub request: AnalysisRequest,
}

/// Procedure-specific inputs, selected by the `procedure` key
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "procedure", rename_all = "kebab-case")]
pub enum AnalysisRequest {
    /// Descriptive statistics of one sample
    Describe {
        /// Sample values
        data: DataSource,
        /// Variable name (defaults to the analysis id)
        #[serde(default)]
        name: Option<String>,
    },
    /// Pearson and Spearman correlation
    Correlation {
        /// First variable
        x: DataSource,
        /// Second variable
        y: DataSource,
    },
    /// One-way ANOVA
    Anova {
        /// Two or more groups
        groups: Vec<GroupSpec>,
    },
    /// Independent or paired t-test
    TTest {
        /// First sample
        a: DataSource,
        /// Second sample
        b: DataSource,
        /// "independent" (default) or "paired"
        #[serde(default)]
        kind: Option<String>,
        /// Name of the first sample
        #[serde(default)]
        name_a: Option<String>,
        /// Name of the second sample
        #[serde(default)]
        name_b: Option<String>,
    },
    /// Simple linear regression of y on x
    Regression {
        /// Predictor
        x: DataSource,
        /// Response
        y: DataSource,
        /// Predictor name
        #[serde(default)]
        label_x: Option<String>,
        /// Response name
        #[serde(default)]
        label_y: Option<String>,
    },
    /// Chi-square test of independence on two categorical samples
    ChiSquare {
        /// Row variable labels
        x: DataSource,
        /// Column variable labels
        y: DataSource,
        /// Row variable name
        #[serde(default)]
        label_x: Option<String>,
        /// Column variable name
        #[serde(default)]
        label_y: Option<String>,
    },
    /// Mann-Whitney U
    MannWhitney {
        /// First sample
        a: DataSource,
        /// Second sample
        b: DataSource,
        /// Name of the first sample
        #[serde(default)]
        name_a: Option<String>,
        /// Name of the second sample
        #[serde(default)]
        name_b: Option<String>,
    },
    /// Kruskal-Wallis H
    KruskalWallis {
        /// Three or more groups
        groups: Vec<GroupSpec>,
    },
    /// Cronbach's alpha of a participants × items matrix
    Reliability {
        /// One row per participant
        items: DataSource,
        /// Item labels
        #[serde(default)]
        item_names: Option<Vec<String>>,
    },
    /// Kolmogorov–Smirnov normality test
    Normality {
        /// Sample values
        data: DataSource,
        /// Variable name (defaults to the analysis id)
        #[serde(default)]
        name: Option<String>,
    },
}

impl AnalysisRequest {
    /// Procedure name as written in the plan
    pub fn procedure(&self) -> &'static str {
        match self {
            AnalysisRequest::Describe { .. } => "describe",
            AnalysisRequest::Correlation { .. } => "correlation",
            AnalysisRequest::Anova { .. } => "anova",
            AnalysisRequest::TTest { .. } => "t-test",
            AnalysisRequest::Regression { .. } => "regression",
            AnalysisRequest::ChiSquare { .. } => "chi-square",
            AnalysisRequest::MannWhitney { .. } => "mann-whitney",
            AnalysisRequest::KruskalWallis { .. } => "kruskal-wallis",
            AnalysisRequest::Reliability { .. } => "reliability",
            AnalysisRequest::Normality { .. } => "normality",
        }
    }
}

/// A named group of values
#[derive(Debug, Clone, Deserialize)]
pub struct GroupSpec {
    /// Group label
    pub name: String,
    /// Group values
    pub data: DataSource,
}

/// Where the text of a data field comes from
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DataSource {
    /// Pasted text
    Inline(String),
    /// Text file, relative to the plan directory
    File {
        /// Path of the file
        file: PathBuf,
    },
}

impl DataSource {
    /// Read the text, resolving relative files against `base_dir`
    pub fn read(&self, base_dir: &Path) -> std::io::Result<String> {
        match self {
            DataSource::Inline(text) => Ok(text.clone()),
            DataSource::File { file } => std::fs::read_to_string(base_dir.join(file)),
        }
    }

    /// Short description for logs and listings
    pub fn describe(&self) -> String {
        match self {
            DataSource::Inline(text) => format!("inline ({} chars)", text.len()),
            DataSource::File { file } => format!("file {}", file.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN: &str = r#"
        [[analysis]]
        id = "corr"
        procedure = "correlation"
        x = "1 2 3 4"
        y = { file = "y.txt" }

        [[analysis]]
        id = "groups"
        procedure = "kruskal-wallis"
        groups = [
            { name = "a", data = "1 2 3" },
            { name = "b", data = "4 5 6" },
            { name = "c", data = { file = "c.txt" } },
        ]

        [[analysis]]
        id = "paired"
        procedure = "t-test"
        kind = "paired"
        a = "1 2 3"
        b = "2 3 4"
    "#;

    #[test]
    fn test_parse_plan() {
        let plan = AnalysisPlan::parse(PLAN, "/data").unwrap();
        assert_eq!(plan.analyses.len(), 3);
        assert_eq!(plan.base_dir, PathBuf::from("/data"));

        let corr = &plan.analyses[0];
        assert_eq!(corr.id, "corr");
        assert_eq!(corr.request.procedure(), "correlation");
        match &corr.request {
            AnalysisRequest::Correlation { x, y } => {
                assert_eq!(x, &DataSource::Inline("1 2 3 4".to_string()));
                assert_eq!(
                    y,
                    &DataSource::File {
                        file: PathBuf::from("y.txt")
                    }
                );
            }
            other => panic!("unexpected request: {:?}", other),
        }

        match &plan.analyses[1].request {
            AnalysisRequest::KruskalWallis { groups } => {
                assert_eq!(groups.len(), 3);
                assert_eq!(groups[2].name, "c");
            }
            other => panic!("unexpected request: {:?}", other),
        }

        match &plan.analyses[2].request {
            AnalysisRequest::TTest { kind, name_a, .. } => {
                assert_eq!(kind.as_deref(), Some("paired"));
                assert!(name_a.is_none());
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_procedure_rejected() {
        let plan = r#"
            [[analysis]]
            id = "x"
            procedure = "anova-two-way"
            groups = []
        "#;
        assert!(AnalysisPlan::parse(plan, ".").is_err());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let plan = r#"
            [[analysis]]
            id = "same"
            procedure = "describe"
            data = "1 2 3"

            [[analysis]]
            id = "same"
            procedure = "normality"
            data = "1 2 3"
        "#;
        let err = AnalysisPlan::parse(plan, ".").unwrap_err();
        assert!(err.to_string().contains("same"));
    }

    #[test]
    fn test_empty_plan() {
        let plan = AnalysisPlan::parse("", ".").unwrap();
        assert!(plan.analyses.is_empty());
    }

    #[test]
    fn test_load_resolves_files_against_plan_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("values.txt"), "4 8 15 16 23 42").unwrap();
        let plan_path = dir.path().join("plan.toml");
        std::fs::write(
            &plan_path,
            "[[analysis]]\nid = \"d\"\nprocedure = \"describe\"\ndata = { file = \"values.txt\" }\n",
        )
        .unwrap();

        let plan = AnalysisPlan::load(&plan_path).unwrap();
        assert_eq!(plan.base_dir, dir.path());
        match &plan.analyses[0].request {
            AnalysisRequest::Describe { data, name } => {
                assert!(name.is_none());
                assert_eq!(data.read(&plan.base_dir).unwrap(), "4 8 15 16 23 42");
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }
}
