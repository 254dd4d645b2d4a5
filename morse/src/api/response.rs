//! # Response mapping
//!
//! Turns an [`ExtractionResult`] into the wire response of `POST /ocr/image`:
//!
//! | Outcome                          | Status | Body                         |
//! |----------------------------------|--------|------------------------------|
//! | `Success`                        | 200    | `{"extracted_text": "..."}`  |
//! | `NoTextDetected`                 | 204    | empty                        |
//! | `NetworkError` / `UpstreamError` | 503    | `{"error": "..."}`           |
//! | `ServiceUnavailable`             | 500    | `{"error": "..."}`           |
//! | `InternalError`                  | 500    | `{"error": "..."}`           |
//!
//! Classification uses the [`ErrorKind`] carried on the result, never the
//! message text.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::ocr::{ErrorKind, ExtractionResult};

/// Successful extraction payload.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ExtractedText {
    /// Text fragments returned by the model, joined by newlines.
    pub extracted_text: String,
}

/// Error payload returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Human-readable description of the failure.
    pub error: String,
}

/// HTTP status for a failed extraction.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::ServiceUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::NoTextDetected => StatusCode::NO_CONTENT,
        ErrorKind::NetworkError | ErrorKind::UpstreamError => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ExtractionResult {
    fn into_response(self) -> Response {
        match self {
            ExtractionResult::Success { text } => (
                StatusCode::OK,
                Json(ExtractedText {
                    extracted_text: text,
                }),
            )
                .into_response(),
            // 204 responses cannot carry a body on the wire.
            ExtractionResult::Failure {
                kind: ErrorKind::NoTextDetected,
                ..
            } => StatusCode::NO_CONTENT.into_response(),
            ExtractionResult::Failure { kind, message } => {
                (status_for(kind), Json(ErrorBody { error: message })).into_response()
            }
        }
    }
}
