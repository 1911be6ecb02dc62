//! Effect size interpretation (Cohen's conventions)

use serde::{Deserialize, Serialize};

/// Interpretation of a standardized mean difference (Cohen's d)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectInterpretation {
    /// |d| < 0.2 - negligible difference
    Negligible,
    /// 0.2 <= |d| < 0.5 - small difference
    Small,
    /// 0.5 <= |d| < 0.8 - medium difference
    Medium,
    /// |d| >= 0.8 - large difference
    Large,
}

impl std::fmt::Display for EffectInterpretation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EffectInterpretation::Negligible => write!(f, "negligible"),
            EffectInterpretation::Small => write!(f, "small"),
            EffectInterpretation::Medium => write!(f, "medium"),
            EffectInterpretation::Large => write!(f, "large"),
        }
    }
}

/// Interpret effect size magnitude using Cohen's conventions
pub fn interpret_effect_size(d: f64) -> EffectInterpretation {
    let abs_d = d.abs();
    if abs_d < 0.2 {
        EffectInterpretation::Negligible
    } else if abs_d < 0.5 {
        EffectInterpretation::Small
    } else if abs_d < 0.8 {
        EffectInterpretation::Medium
    } else {
        EffectInterpretation::Large
    }
}

/// Strength of a correlation coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationStrength {
    /// |r| < 0.1
    Negligible,
    /// 0.1 <= |r| < 0.3
    Weak,
    /// 0.3 <= |r| < 0.5
    Moderate,
    /// |r| >= 0.5
    Strong,
}

impl std::fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorrelationStrength::Negligible => write!(f, "negligible"),
            CorrelationStrength::Weak => write!(f, "weak"),
            CorrelationStrength::Moderate => write!(f, "moderate"),
            CorrelationStrength::Strong => write!(f, "strong"),
        }
    }
}

/// Interpret |r| using Cohen's conventions
pub fn interpret_correlation(r: f64) -> CorrelationStrength {
    let abs_r = r.abs();
    if abs_r < 0.1 {
        CorrelationStrength::Negligible
    } else if abs_r < 0.3 {
        CorrelationStrength::Weak
    } else if abs_r < 0.5 {
        CorrelationStrength::Moderate
    } else {
        CorrelationStrength::Strong
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_size_interpretation() {
        assert_eq!(interpret_effect_size(0.1), EffectInterpretation::Negligible);
        assert_eq!(interpret_effect_size(0.3), EffectInterpretation::Small);
        assert_eq!(interpret_effect_size(0.6), EffectInterpretation::Medium);
        assert_eq!(interpret_effect_size(1.0), EffectInterpretation::Large);
        assert_eq!(interpret_effect_size(-0.5), EffectInterpretation::Medium);
    }

    #[test]
    fn test_correlation_strength() {
        assert_eq!(interpret_correlation(0.05), CorrelationStrength::Negligible);
        assert_eq!(interpret_correlation(-0.2), CorrelationStrength::Weak);
        assert_eq!(interpret_correlation(0.45), CorrelationStrength::Moderate);
        assert_eq!(interpret_correlation(-0.82), CorrelationStrength::Strong);
        assert_eq!(CorrelationStrength::Strong.to_string(), "strong");
    }
}
