use tracing::{info, warn};

use crate::config::OcrConfig;
use crate::error::Result;

use super::api::GeminiClient;
use super::types::{ErrorKind, ExtractionRequest, ExtractionResult};

const UNAVAILABLE_MESSAGE: &str = "service temporarily unavailable";

#[derive(Clone)]
enum OcrBackend {
    Gemini { client: GeminiClient },
    Unavailable { reason: String },
}

#[derive(Clone)]
pub struct OcrProvider {
    backend: OcrBackend,
}

impl OcrProvider {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let backend = if config.api_key.is_some() {
            let client = GeminiClient::new(config)?;
            info!(model = %config.model, "Gemini OCR backend initialized");
            OcrBackend::Gemini { client }
        } else {
            let reason = "GEMINI_API_KEY is not configured".to_string();
            warn!("OCR backend unavailable: {}", reason);
            OcrBackend::Unavailable { reason }
        };

        Ok(Self { backend })
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, OcrBackend::Unavailable { .. })
    }

    /// Extract text from a validated image.
    ///
    /// Short-circuits with [`ErrorKind::ServiceUnavailable`] and no network
    /// call when the backend is unavailable.
    pub async fn extract(&self, request: &ExtractionRequest) -> ExtractionResult {
        let client = match &self.backend {
            OcrBackend::Gemini { client } => client,
            OcrBackend::Unavailable { reason } => {
                warn!("Rejecting OCR request: {}", reason);
                return ExtractionResult::failure(
                    ErrorKind::ServiceUnavailable,
                    UNAVAILABLE_MESSAGE,
                );
            }
        };

        info!(
            mime_type = %request.mime_type(),
            size = request.image_bytes().len(),
            "Forwarding image to Gemini"
        );

        let result = client.extract_text(request).await;
        match &result {
            ExtractionResult::Success { text } => {
                info!(chars = text.chars().count(), "Text extracted");
            }
            ExtractionResult::Failure { kind, message } => {
                warn!(kind = %kind, "OCR extraction failed: {}", message);
            }
        }

        result
    }
}
