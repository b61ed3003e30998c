use tracing::{debug, info};

use crate::analysis::formations::FormationSearch;
use crate::analysis::prompts::{skill_analysis_prompt, SKILL_ANALYSIS_SYSTEM};
use crate::analysis::reconcile::{reconcile, AnalysisRequest, AnalysisResponse};
use crate::analysis::skills::parse_skill_analysis;
use crate::errors::AppError;
use crate::llm_client::{CallOptions, LlmClient};

/// Full analysis pipeline: model skill analysis, then formation search and reconciliation.
pub async fn analyze_cv(
    llm: &LlmClient,
    search: &dyn FormationSearch,
    request: &AnalysisRequest,
) -> Result<AnalysisResponse, AppError> {
    info!("Starting CV analysis");

    let prompt = skill_analysis_prompt(&request.job_description, &request.cv_text);
    let raw = llm
        .call_text(&prompt, Some(SKILL_ANALYSIS_SYSTEM), CallOptions::default())
        .await?;
    debug!("Skill analysis output: {} bytes", raw.len());

    let analysis = parse_skill_analysis(&raw)?;
    info!(
        "Skill analysis: {} required, {} matching, {} missing, {:.1}%",
        analysis.required.len(),
        analysis.matching.len(),
        analysis.missing.len(),
        analysis.match_percentage
    );

    let response = reconcile(request, analysis, search).await?;
    info!(
        "Analysis complete: {} formations recommended",
        response.recommended_formations.len()
    );
    Ok(response)
}
