use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MorseError {
    #[error("Server configuration error: {0}")]
    Config(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl MorseError {
    pub fn status(&self) -> StatusCode {
        match self {
            MorseError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            MorseError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            MorseError::UnsupportedType(_) => StatusCode::BAD_REQUEST,
            MorseError::InvalidImage(_) => StatusCode::BAD_REQUEST,
            MorseError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            MorseError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the caller.
    pub fn message(&self) -> &str {
        match self {
            MorseError::Config(msg)
            | MorseError::Unauthorized(msg)
            | MorseError::UnsupportedType(msg)
            | MorseError::InvalidImage(msg)
            | MorseError::InvalidRequest(msg)
            | MorseError::Internal(msg) => msg,
        }
    }
}

impl IntoResponse for MorseError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.message() }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, MorseError>;
