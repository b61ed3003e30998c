use axum::extract::{Multipart, State};
use axum::Json;

use crate::errors::AppError;
use crate::extraction::cv::StructuredCv;
use crate::extraction::service::extract_cv;
use crate::extraction::upload::{multipart_error, UploadedFile};
use crate::state::AppState;

const FILE_FIELD: &str = "file";

/// POST /api/v1/cv/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<StructuredCv>, AppError> {
    let file = read_file_field(multipart).await?;
    let cv = extract_cv(&state.vision, &file).await?;
    Ok(Json(cv))
}

/// POST /api/v1/cv/extract-text
pub async fn handle_extract_text(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<String, AppError> {
    let file = read_file_field(multipart).await?;
    let cv = extract_cv(&state.vision, &file).await?;
    Ok(cv.to_plain_text())
}

async fn read_file_field(mut multipart: Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some(FILE_FIELD) {
            return UploadedFile::from_field(field).await;
        }
    }
    Err(AppError::Validation(format!("Missing `{FILE_FIELD}` field")))
}
