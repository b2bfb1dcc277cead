//! File upload HTTP handler.
//!
//! Accepts a multipart `file` field and returns its metadata plus the
//! base64-encoded content, ready to be passed to `/api/documents/analyze`
//! or `/api/chat/message`.

use axum::extract::Multipart;
use axum::Json;
use serde::Serialize;

use sada_core::attachment::AttachmentCodec;
use sada_infra::attachment::Base64Codec;

use crate::http::error::AppError;

/// Response payload for an uploaded file.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub size: usize,
    /// Base64-encoded file bytes.
    pub file_content: String,
}

/// POST /api/upload - Read a multipart file and return it base64-encoded.
pub async fn upload_file(mut multipart: Multipart) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Internal(format!("Upload failed: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Internal(format!("Upload failed: {e}")))?;

        return Ok(Json(UploadResponse {
            filename,
            content_type,
            size: bytes.len(),
            file_content: Base64Codec.encode(&bytes),
        }));
    }

    Err(AppError::Validation("missing 'file' field".to_string()))
}
