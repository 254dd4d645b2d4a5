use std::io::Cursor;

use image::{ImageFormat, ImageReader};

use super::types::{ExtractionRequest, ImageMimeType};
use crate::error::{MorseError, Result};

const NOT_AN_IMAGE: &str = "The provided file is not a valid image or is corrupted.";

const JPEG_EOI: [u8; 2] = [0xFF, 0xD9];

/// Validate an uploaded image and wrap it in an [`ExtractionRequest`].
///
/// The declared type must be `image/jpeg` or `image/png`. The bytes then go
/// through two passes:
/// 1. Verify: sniff the format and parse the header (dimensions). The sniffed
///    format must itself be JPEG or PNG.
/// 2. Decode: a full pixel decode, which catches truncated or corrupted data
///    that a header check accepts. JPEGs must also end in an EOI marker,
///    since the decoder pads a short scan instead of failing.
///
/// The declared type is what gets forwarded upstream.
pub fn validate_image(bytes: Vec<u8>, content_type: Option<&str>) -> Result<ExtractionRequest> {
    let declared = content_type.unwrap_or("unknown");
    let mime_type = ImageMimeType::from_content_type(declared).ok_or_else(|| {
        MorseError::UnsupportedType(format!(
            "Unsupported file format. Only JPEG and PNG images are accepted ({}). Received type: {}",
            ImageMimeType::allowed_list(),
            declared
        ))
    })?;

    verify_image(&bytes)?;

    Ok(ExtractionRequest::new(bytes, mime_type))
}

fn verify_image(bytes: &[u8]) -> Result<()> {
    if bytes.is_empty() {
        return Err(MorseError::InvalidImage(NOT_AN_IMAGE.to_string()));
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| MorseError::InvalidImage(format!("Failed to read image: {e}")))?;

    let format = reader
        .format()
        .filter(|f| ImageMimeType::from_format(*f).is_some())
        .ok_or_else(|| MorseError::InvalidImage(NOT_AN_IMAGE.to_string()))?;

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| MorseError::InvalidImage(format!("Failed to validate image: {e}")))?;

    if format == ImageFormat::Jpeg && !ends_with_jpeg_eoi(bytes) {
        return Err(MorseError::InvalidImage(
            "Failed to validate image: JPEG data is truncated".to_string(),
        ));
    }

    let mut reader = ImageReader::new(Cursor::new(bytes));
    reader.set_format(format);
    let decoded = reader
        .decode()
        .map_err(|e| MorseError::InvalidImage(format!("Failed to validate image: {e}")))?;

    tracing::debug!(
        format = ?format,
        width,
        height,
        color = ?decoded.color(),
        "Image validated"
    );

    Ok(())
}

/// Trailing NUL or whitespace padding after the marker is tolerated.
fn ends_with_jpeg_eoi(bytes: &[u8]) -> bool {
    let end = bytes
        .iter()
        .rposition(|b| !matches!(b, 0x00 | b' ' | b'\t' | b'\r' | b'\n'))
        .map_or(0, |i| i + 1);
    bytes[..end].ends_with(&JPEG_EOI)
}
