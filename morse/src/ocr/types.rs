use image::ImageFormat;
use serde::Serialize;

/// MIME types accepted for extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImageMimeType {
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/png")]
    Png,
}

impl ImageMimeType {
    pub const ALL: [ImageMimeType; 2] = [ImageMimeType::Jpeg, ImageMimeType::Png];

    /// Parses a declared `Content-Type`, ignoring parameters and case.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            _ => None,
        }
    }

    pub fn from_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Png => Some(Self::Png),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// Comma-separated list used in rejection messages.
    pub fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for ImageMimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated image ready to be sent upstream.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    image_bytes: Vec<u8>,
    mime_type: ImageMimeType,
}

impl ExtractionRequest {
    pub fn new(image_bytes: Vec<u8>, mime_type: ImageMimeType) -> Self {
        Self {
            image_bytes,
            mime_type,
        }
    }

    pub fn image_bytes(&self) -> &[u8] {
        &self.image_bytes
    }

    pub fn mime_type(&self) -> ImageMimeType {
        self.mime_type
    }
}

/// Classification of a failed extraction. Drives the HTTP status only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No outbound model key is configured.
    ServiceUnavailable,
    /// The call never produced an HTTP response (connect, DNS, timeout).
    NetworkError,
    /// The upstream answered with a non-2xx status.
    UpstreamError,
    /// The upstream answered successfully but returned no text.
    NoTextDetected,
    InternalError,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::NetworkError => write!(f, "network_error"),
            Self::UpstreamError => write!(f, "upstream_error"),
            Self::NoTextDetected => write!(f, "no_text_detected"),
            Self::InternalError => write!(f, "internal_error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionResult {
    Success { text: String },
    Failure { kind: ErrorKind, message: String },
}

impl ExtractionResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self::Success { text: text.into() }
    }

    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_essence_is_matched() {
        assert_eq!(
            ImageMimeType::from_content_type("image/png"),
            Some(ImageMimeType::Png)
        );
        assert_eq!(
            ImageMimeType::from_content_type(" IMAGE/JPEG ; charset=binary"),
            Some(ImageMimeType::Jpeg)
        );
        assert_eq!(ImageMimeType::from_content_type("image/jpg"), None);
        assert_eq!(ImageMimeType::from_content_type("image/gif"), None);
        assert_eq!(ImageMimeType::from_content_type(""), None);
    }

    #[test]
    fn test_mime_serializes_as_wire_string() {
        let json = serde_json::to_value(ImageMimeType::Png).unwrap();
        assert_eq!(json, "image/png");
    }

    #[test]
    fn test_allowed_list() {
        assert_eq!(ImageMimeType::allowed_list(), "image/jpeg, image/png");
    }

    #[test]
    fn test_result_accessors() {
        let ok = ExtractionResult::success("hello");
        assert!(ok.is_success());
        assert_eq!(ok.error_kind(), None);

        let failed = ExtractionResult::failure(ErrorKind::NoTextDetected, "no text detected");
        assert!(!failed.is_success());
        assert_eq!(failed.error_kind(), Some(ErrorKind::NoTextDetected));
    }
}
