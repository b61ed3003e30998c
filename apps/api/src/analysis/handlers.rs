use axum::{extract::State, Json};

use crate::analysis::reconcile::{AnalysisRequest, AnalysisResponse};
use crate::analysis::service::analyze_cv;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/analysis
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    validate_request(&req)?;
    let response = analyze_cv(&state.llm, state.formation_search.as_ref(), &req).await?;
    Ok(Json(response))
}

fn validate_request(req: &AnalysisRequest) -> Result<(), AppError> {
    if req.cv_text.trim().is_empty() {
        return Err(AppError::Validation("cv_text cannot be empty".into()));
    }
    if req.job_description.trim().is_empty() {
        return Err(AppError::Validation("job_description cannot be empty".into()));
    }
    Ok(())
}
