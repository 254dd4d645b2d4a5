//! Image text extraction handler.

use axum::extract::State;
use axum::response::{IntoResponse, Response};

use crate::api::extractors::ImageUpload;
use crate::api::response::{ErrorBody, ExtractedText};
use crate::api::AppState;
use crate::error::{MorseError, Result};
use crate::ocr::validate_image;

/// Multipart form accepted by `POST /ocr/image`. Documentation only.
#[derive(utoipa::ToSchema)]
#[allow(dead_code)]
pub struct ImageUploadForm {
    /// Image to process (JPEG or PNG).
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// `POST /ocr/image`
///
/// Validates the uploaded image, then forwards it to the model for text
/// extraction. Validation decodes the full image, so it runs on the blocking
/// pool.
#[utoipa::path(
    post,
    path = "/ocr/image",
    tag = "ocr",
    operation_id = "ocr.image",
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Text extracted from the image", body = ExtractedText),
        (status = 204, description = "No text detected in the image"),
        (status = 400, description = "Unsupported type, corrupt image or malformed upload", body = ErrorBody),
        (status = 401, description = "Missing or invalid API key", body = ErrorBody),
        (status = 500, description = "Server misconfigured or internal error", body = ErrorBody),
        (status = 503, description = "OCR service unreachable or returned an error", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn extract_image_text(
    State(state): State<AppState>,
    upload: ImageUpload,
) -> Result<Response> {
    let ImageUpload {
        file_name,
        content_type,
        bytes,
    } = upload;

    tracing::debug!(
        file_name = file_name.as_deref().unwrap_or("-"),
        content_type = content_type.as_deref().unwrap_or("-"),
        size = bytes.len(),
        "Received image upload"
    );

    let request = tokio::task::spawn_blocking(move || validate_image(bytes, content_type.as_deref()))
        .await
        .map_err(|e| MorseError::Internal(format!("Image validation task failed: {e}")))?
        .map_err(|e| {
            tracing::info!("Rejected upload: {}", e);
            e
        })?;

    Ok(state.ocr.extract(&request).await.into_response())
}
