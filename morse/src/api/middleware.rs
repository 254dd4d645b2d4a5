//! # API Key Authentication Middleware
//!
//! Protects the OCR routes with Bearer token authentication. Public routes
//! (`/`, `/openapi.json`, `/redoc`) are mounted outside this layer.

use axum::{
    body::Body,
    extract::State,
    http::{
        header::{AUTHORIZATION, WWW_AUTHENTICATE},
        HeaderValue, Request,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::state::AppState;
use crate::error::MorseError;

/// Axum middleware that enforces `Authorization: Bearer <MORSE_API_KEY>`.
///
/// # Behavior
///
/// - `MORSE_API_KEY` unset → 500, the server is misconfigured.
/// - Header missing, scheme other than `Bearer`, or wrong token → 401 with a
///   `WWW-Authenticate: Bearer` challenge.
/// - Valid token → the request continues to the handler.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match state.authenticator.authorize(auth_header) {
        Ok(()) => next.run(request).await,
        Err(err @ MorseError::Unauthorized(_)) => {
            tracing::debug!("Rejected request: {}", err);
            let mut response = err.into_response();
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
            response
        }
        Err(err) => {
            tracing::error!("{}", err);
            err.into_response()
        }
    }
}
