//! Skill Reconciliation: builds the user-facing report from a skill analysis, with formation
//! recommendations per missing skill, section-by-section improvements and an overall verdict.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::formations::{
    collect_formations, FormationCategory, FormationDetail, FormationSearch,
};
use crate::analysis::skills::SkillAnalysisResult;
use crate::errors::AppError;

pub const FULL_MATCH_FEEDBACK: &str = "Excellent ! Votre profil correspond parfaitement au poste.";

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub cv_text: String,
    pub job_description: String,
    #[serde(default)]
    pub job_url: Option<String>,
    #[serde(default)]
    pub current_skills: Option<Vec<String>>,
    #[serde(default)]
    pub experiences: Option<Vec<String>>,
    #[serde(default)]
    pub educations: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationRecommendation {
    pub id: Uuid,
    pub title: String,
    pub duration: String,
    pub certified: bool,
    pub free: bool,
    pub relevance_reason: String,
    pub url: String,
    pub platform: String,
    pub category: FormationCategory,
    pub certificate_type: String,
    pub modality: String,
    pub targeted_skills: Vec<String>,
}

impl FormationRecommendation {
    pub fn for_skill(skill: &str, formation: FormationDetail) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: formation.title,
            duration: NOT_AVAILABLE.to_string(),
            certified: false,
            free: formation.category.is_free(),
            relevance_reason: format!("Formation pour maîtriser {skill}"),
            url: formation.url,
            platform: formation.platform,
            category: formation.category,
            certificate_type: NOT_AVAILABLE.to_string(),
            modality: NOT_AVAILABLE.to_string(),
            targeted_skills: vec![skill.to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub job_description: String,
    pub missing_skills: Vec<String>,
    pub matching_skills: Vec<String>,
    pub recommended_formations: Vec<FormationRecommendation>,
    pub match_percentage: f64,
    pub improvements: BTreeMap<String, String>,
    pub overall_feedback: String,
}

/// Builds the final response for `request` from the model's `analysis`.
///
/// With no missing skills the percentage is forced to 100 and nothing is searched.
/// Otherwise every missing skill is searched in order; the first search failure aborts.
pub async fn reconcile(
    request: &AnalysisRequest,
    analysis: SkillAnalysisResult,
    search: &dyn FormationSearch,
) -> Result<AnalysisResponse, AppError> {
    if analysis.missing.is_empty() {
        info!("No missing skills, full match");
        return Ok(AnalysisResponse {
            job_description: request.job_description.clone(),
            missing_skills: Vec::new(),
            matching_skills: analysis.matching,
            recommended_formations: Vec::new(),
            match_percentage: 100.0,
            improvements: BTreeMap::new(),
            overall_feedback: FULL_MATCH_FEEDBACK.to_string(),
        });
    }

    let mut recommended_formations = Vec::new();
    for skill in &analysis.missing {
        let items = search.search_formations(skill).await?;
        let formations = collect_formations(&items);
        if formations.is_empty() {
            warn!("No formation found for {skill}");
        } else {
            info!("{} formations kept for {skill}", formations.len());
        }

        recommended_formations.extend(
            formations
                .iter()
                .cloned()
                .map(|formation| FormationRecommendation::for_skill(skill, formation)),
        );
    }

    let improvements = generate_improvements(request, &analysis.missing);
    let overall_feedback = overall_feedback(analysis.match_percentage, analysis.missing.len());

    Ok(AnalysisResponse {
        job_description: request.job_description.clone(),
        missing_skills: analysis.missing,
        matching_skills: analysis.matching,
        recommended_formations,
        match_percentage: analysis.match_percentage,
        improvements,
        overall_feedback,
    })
}

/// Advice per CV section, keyed by section name.
pub fn generate_improvements(
    request: &AnalysisRequest,
    missing_skills: &[String],
) -> BTreeMap<String, String> {
    let mut improvements = BTreeMap::new();

    if !missing_skills.is_empty() {
        improvements.insert(
            "Compétences".to_string(),
            format!(
                "Ajoutez ces compétences manquantes : {}",
                missing_skills.join(", ")
            ),
        );
    }

    if request.experiences.as_ref().map_or(true, Vec::is_empty) {
        improvements.insert(
            "Expérience".to_string(),
            "Détaillez davantage vos expériences professionnelles pertinentes".to_string(),
        );
    }

    if request.educations.as_ref().map_or(true, Vec::is_empty) {
        improvements.insert(
            "Formation".to_string(),
            "Incluez vos formations académiques et certifications".to_string(),
        );
    }

    improvements.insert(
        "Format".to_string(),
        "Utilisez des mots-clés du poste dans votre CV pour passer les ATS (Applicant Tracking Systems)"
            .to_string(),
    );

    improvements
}

/// Verdict by match band: `[80, 100]`, `[60, 80)`, `[40, 60)`, `[0, 40)`.
pub fn overall_feedback(match_percentage: f64, missing_count: usize) -> String {
    if match_percentage >= 80.0 {
        "Excellent ! Votre CV correspond très bien au poste visé. \
         Quelques ajustements mineurs et vous êtes prêt à postuler."
            .to_string()
    } else if match_percentage >= 60.0 {
        format!(
            "Bon profil ! Il vous manque quelques compétences clés ({missing_count}). \
             Suivez les formations recommandées pour renforcer votre candidature."
        )
    } else if match_percentage >= 40.0 {
        format!(
            "Profil prometteur mais nécessite du travail. \
             Concentrez-vous sur l'acquisition des {missing_count} compétences manquantes identifiées."
        )
    } else {
        "Votre profil nécessite une mise à niveau importante pour ce poste. \
         Nous vous recommandons de suivre les formations proposées et d'acquérir de l'expérience pratique."
            .to_string()
    }
}
