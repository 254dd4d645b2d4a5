use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::types::{ErrorKind, ExtractionRequest, ExtractionResult, ImageMimeType};
use crate::config::OcrConfig;
use crate::error::{MorseError, Result};

pub const EXTRACTION_PROMPT: &str = "Extract all text from this image, regardless of language.";

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone, Debug)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout_secs: u64,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Text { text: &'a str },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: ImageMimeType,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentRequest<'static> {
    fn for_image(request: &ExtractionRequest) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart::Text {
                        text: EXTRACTION_PROMPT,
                    },
                    RequestPart::InlineData {
                        inline_data: InlineData {
                            mime_type: request.mime_type(),
                            data: STANDARD.encode(request.image_bytes()),
                        },
                    },
                ],
            }],
        }
    }
}

impl GenerateContentResponse {
    /// Every text fragment across all candidates and parts, in upstream order.
    fn text_fragments(self) -> Vec<String> {
        self.candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|content| content.parts)
            .filter_map(|part| part.text)
            .collect()
    }
}

impl GeminiClient {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| MorseError::Config("API key required for Gemini OCR".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MorseError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Sends one `generateContent` call. Never retries.
    pub async fn extract_text(&self, request: &ExtractionRequest) -> ExtractionResult {
        let payload = GenerateContentRequest::for_image(request);

        let response = match self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&payload)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => return self.network_failure(e),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return ExtractionResult::failure(
                ErrorKind::UpstreamError,
                format!(
                    "OCR service error - status: {}, response: {}",
                    status.as_u16(),
                    body
                ),
            );
        }

        let body = match response.bytes().await {
            Ok(b) => b,
            Err(e) => return self.network_failure(e),
        };

        parse_response(&body)
    }

    fn network_failure(&self, error: reqwest::Error) -> ExtractionResult {
        let message = if error.is_timeout() {
            format!(
                "Network or connection error while calling the OCR service: request timed out after {} seconds",
                self.timeout_secs
            )
        } else {
            format!("Network or connection error while calling the OCR service: {error}")
        };
        ExtractionResult::failure(ErrorKind::NetworkError, message)
    }
}

fn parse_response(body: &[u8]) -> ExtractionResult {
    let parsed: GenerateContentResponse = match serde_json::from_slice(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            return ExtractionResult::failure(
                ErrorKind::InternalError,
                format!("Unexpected error while processing the OCR response: {e}"),
            )
        }
    };

    let fragments = parsed.text_fragments();
    if fragments.is_empty() {
        return ExtractionResult::failure(ErrorKind::NoTextDetected, "no text detected");
    }

    ExtractionResult::success(fragments.join("\n"))
}
