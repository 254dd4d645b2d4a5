use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::StatusCode;

use crate::error::MorseError;

/// Multipart form field carrying the image.
pub const FILE_FIELD: &str = "file";

/// The `file` field of a `multipart/form-data` upload.
///
/// Other fields are ignored. Only the first `file` field is read; the rest of
/// the body is left unconsumed.
#[derive(Debug)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl<S> FromRequest<S> for ImageUpload
where
    S: Send + Sync,
{
    type Rejection = MorseError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state).await?;

        while let Some(field) = multipart.next_field().await.map_err(map_multipart_error)? {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }

            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(map_multipart_error)?;

            return Ok(Self {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
        }

        Err(MorseError::InvalidRequest(format!(
            "Missing required '{FILE_FIELD}' field"
        )))
    }
}

impl From<MultipartRejection> for MorseError {
    fn from(rejection: MultipartRejection) -> Self {
        MorseError::InvalidRequest(format!("Invalid multipart upload: {}", rejection.body_text()))
    }
}

fn map_multipart_error(error: MultipartError) -> MorseError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        MorseError::InvalidRequest(format!("File too large: {}", error.body_text()))
    } else {
        MorseError::InvalidRequest(format!("Failed to read file: {}", error.body_text()))
    }
}
