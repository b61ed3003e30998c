use std::path::Path;

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::cv::{parse_cv_text, StructuredCv};
use crate::extraction::prompts::cv_extraction_prompt;
use crate::extraction::upload::UploadedFile;
use crate::llm_client::gemini::VisionClient;

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

const MIME_BY_EXTENSION: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("txt", "text/plain"),
];

/// Declared content type when present, else a guess from the file extension.
pub fn resolve_mime_type(content_type: Option<&str>, filename: Option<&str>) -> String {
    if let Some(content_type) = content_type.map(str::trim).filter(|c| !c.is_empty()) {
        return content_type.to_string();
    }

    filename
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .and_then(|ext| {
            MIME_BY_EXTENSION
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, mime)| mime.to_string())
        })
        .unwrap_or_else(|| FALLBACK_MIME_TYPE.to_string())
}

/// Sends the uploaded CV to the vision model and parses its answer.
pub async fn extract_cv(vision: &VisionClient, file: &UploadedFile) -> Result<StructuredCv, AppError> {
    let mime_type = resolve_mime_type(file.content_type.as_deref(), file.filename.as_deref());
    info!(
        "Extracting CV {:?} ({} bytes, {mime_type})",
        file.filename.as_deref().unwrap_or("<unnamed>"),
        file.bytes.len()
    );

    let encoded = BASE64_STANDARD.encode(&file.bytes);
    let raw = vision
        .generate_from_document(&cv_extraction_prompt(), &encoded, &mime_type)
        .await?;

    let cv = parse_cv_text(&raw)?;
    info!(
        "CV extracted: {} experiences, {} education entries, {} skill categories",
        cv.experiences.len(),
        cv.education.len(),
        cv.skills.len()
    );
    Ok(cv)
}
