use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::normalization::fields::{root_object, string_list, Object};
use crate::normalization::{parse_model_json, ParseError};

/// Model verdict on how a CV covers a job description's skills.
///
/// `matching` is taken as the model returns it; it is not cross-checked against
/// `required` or `possessed`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillAnalysisResult {
    pub required: Vec<String>,
    pub possessed: Vec<String>,
    pub matching: Vec<String>,
    pub missing: Vec<String>,
    /// Always within `0.0..=100.0`.
    pub match_percentage: f64,
}

/// Parses raw model output into a `SkillAnalysisResult`.
pub fn parse_skill_analysis(raw: &str) -> Result<SkillAnalysisResult, ParseError> {
    let document = parse_model_json(raw)?;
    let root = root_object(&document)?;

    Ok(SkillAnalysisResult {
        required: skill_list(root, "competences_requises")?,
        possessed: skill_list(root, "competences_candidat")?,
        matching: skill_list(root, "competences_matching")?,
        missing: skill_list(root, "competences_manquantes")?,
        match_percentage: match_percentage(root.get("pourcentage_matching")),
    })
}

/// Normalized skill names with blank entries dropped.
///
/// A `competences_manquantes` holding only blanks therefore reads as no missing skill, and
/// `reconcile` treats the analysis as a full match.
fn skill_list(root: &Object, key: &str) -> Result<Vec<String>, ParseError> {
    let mut skills = string_list(root, key)?;
    skills.retain(|s| !s.is_empty());
    Ok(skills)
}

fn match_percentage(value: Option<&Value>) -> f64 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };

    match raw {
        Some(p) if p.is_finite() => p.clamp(0.0, 100.0),
        Some(_) | None => {
            if value.is_some_and(|v| !v.is_null()) {
                warn!("Unreadable match percentage {value:?}, using 0");
            }
            0.0
        }
    }
}
