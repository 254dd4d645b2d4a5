//! Bearer token authentication for the OCR endpoints.
//!
//! The [`Authenticator`] holds the inbound API key taken from [`ServerConfig`]
//! and checks `Authorization` header values against it. The axum middleware in
//! `api::middleware` is a thin wrapper that turns its outcome into a response.

use crate::config::ServerConfig;
use crate::error::{MorseError, Result};

const BEARER_SCHEME: &str = "Bearer";

#[derive(Debug, Clone)]
pub struct Authenticator {
    api_key: Option<String>,
}

impl Authenticator {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Validates a raw `Authorization` header value.
    ///
    /// # Errors
    ///
    /// - [`MorseError::Config`] when no inbound key is configured. This is
    ///   checked before the header so a misconfigured server never looks like
    ///   a caller mistake.
    /// - [`MorseError::Unauthorized`] when the header is missing, the scheme is
    ///   not exactly `Bearer`, or the token differs from the configured key.
    pub fn authorize(&self, header: Option<&str>) -> Result<()> {
        let Some(expected) = self.api_key.as_deref() else {
            return Err(MorseError::Config(
                "MORSE_API_KEY is not configured on the server.".to_string(),
            ));
        };

        let Some(header) = header else {
            return Err(MorseError::Unauthorized(
                "Missing authorization header".to_string(),
            ));
        };

        let header = header.trim();
        let (scheme, token) = header.split_once(' ').unwrap_or((header, ""));
        if scheme != BEARER_SCHEME {
            return Err(MorseError::Unauthorized(
                "Invalid authentication scheme. Use 'Bearer'.".to_string(),
            ));
        }

        if token != expected {
            return Err(MorseError::Unauthorized(
                "Invalid or missing API key.".to_string(),
            ));
        }

        Ok(())
    }
}
