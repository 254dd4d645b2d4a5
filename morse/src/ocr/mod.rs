//! OCR (Optical Character Recognition) Module
//!
//! Text extraction for uploaded images. Recognition itself is delegated to the
//! Google Gemini `generateContent` API; this module owns the pieces around it.
//!
//! # Architecture
//!
//! - [`validate_image`] checks the declared MIME type and fully decodes the
//!   upload, producing an [`ExtractionRequest`]
//! - `GeminiClient` encodes the request, performs the single outbound call and
//!   parses the candidates into an [`ExtractionResult`]
//! - [`OcrProvider`] selects between the Gemini backend and an unavailable
//!   backend when no model key is configured
//!
//! # Usage
//!
//! ```rust,ignore
//! let ocr = OcrProvider::new(&config.ocr)?;
//! let request = validate_image(bytes, Some("image/png"))?;
//! let result = ocr.extract(&request).await;
//! ```

mod api;
mod provider;
mod types;
mod validation;

pub use api::{GeminiClient, EXTRACTION_PROMPT};
pub use provider::OcrProvider;
pub use types::{ErrorKind, ExtractionRequest, ExtractionResult, ImageMimeType};
pub use validation::validate_image;
