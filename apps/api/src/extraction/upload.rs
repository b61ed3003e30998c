use axum::extract::multipart::{Field, MultipartError};

use crate::errors::AppError;

/// Largest accepted upload; the router's body limit is set to match.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// A file received in a multipart form.
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub filename: Option<String>,
}

impl UploadedFile {
    /// Reads a multipart field to the end. An empty or oversized body is a validation error.
    pub async fn from_field(field: Field<'_>) -> Result<Self, AppError> {
        let name = field.name().unwrap_or("file").to_string();
        let content_type = field.content_type().map(str::to_string);
        let filename = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        if bytes.is_empty() {
            return Err(AppError::Validation(format!("`{name}` is empty")));
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::Validation(format!(
                "`{name}` exceeds the {} MB limit",
                MAX_UPLOAD_BYTES / (1024 * 1024)
            )));
        }

        Ok(Self {
            bytes: bytes.to_vec(),
            content_type,
            filename,
        })
    }
}

pub fn multipart_error(e: MultipartError) -> AppError {
    AppError::Validation(format!("Invalid multipart body: {e}"))
}
