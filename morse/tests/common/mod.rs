#![allow(dead_code)]

use std::io::Cursor;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use image::{DynamicImage, ImageFormat, RgbImage};
use serde_json::{json, Value};
use tower::ServiceExt;

use morse::api::{create_router, AppState};
use morse::config::{Config, OcrConfig, ServerConfig};
use morse::ocr::OcrProvider;

pub const INBOUND_KEY: &str = "test-morse-key";
pub const GEMINI_KEY: &str = "test-gemini-key";
pub const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

const BOUNDARY: &str = "----morse-test-boundary";

/// Encode a small gradient image in the given format.
pub fn encode_image(format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_fn(48, 24, |x, y| {
        image::Rgb([(x * 5) as u8, (y * 10) as u8, 128])
    });
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), format)
        .unwrap_or_else(|e| panic!("Failed to encode test image as {format:?}: {e}"));
    bytes
}

pub fn png() -> Vec<u8> {
    encode_image(ImageFormat::Png)
}

pub fn jpeg() -> Vec<u8> {
    encode_image(ImageFormat::Jpeg)
}

/// A noisy 256x256 JPEG whose bulk is entropy-coded scan data.
pub fn large_jpeg() -> Vec<u8> {
    let img = RgbImage::from_fn(256, 256, |x, y| {
        let n = x.wrapping_mul(7919) ^ y.wrapping_mul(104_729);
        image::Rgb([n as u8, (n >> 8) as u8, (x ^ y) as u8])
    });
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
        .unwrap_or_else(|e| panic!("Failed to encode large test JPEG: {e}"));
    bytes
}

pub fn ocr_config(api_key: Option<&str>, base_url: String, timeout_secs: u64) -> OcrConfig {
    OcrConfig {
        api_key: api_key.map(String::from),
        base_url,
        model: "gemini-2.0-flash".to_string(),
        timeout_secs,
    }
}

pub fn test_config(api_key: Option<&str>, ocr: OcrConfig) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            api_key: api_key.map(String::from),
            allowed_origins: vec!["http://localhost:8000".to_string()],
            max_upload_bytes: 1024 * 1024,
        },
        ocr,
    }
}

pub fn build_app(config: Config) -> Router {
    let ocr = OcrProvider::new(&config.ocr).expect("OCR provider should build");
    create_router(AppState::new(config, ocr))
}

/// App with both keys set and Gemini pointed at `base_uri` (a mock server).
pub fn app_for(base_uri: &str) -> Router {
    build_app(test_config(
        Some(INBOUND_KEY),
        ocr_config(Some(GEMINI_KEY), format!("{base_uri}/v1beta"), 5),
    ))
}

/// A `multipart/form-data` body with a single file field.
pub fn multipart_body(
    field_name: &str,
    file_name: &str,
    content_type: Option<&str>,
    bytes: &[u8],
) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    if let Some(content_type) = content_type {
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
    }
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

pub async fn post_image(
    app: Router,
    auth: Option<&str>,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Response {
    let (multipart_type, body) = multipart_body("file", "upload", content_type, bytes);
    let mut builder = Request::builder()
        .method("POST")
        .uri("/ocr/image")
        .header("content-type", multipart_type);
    if let Some(value) = auth {
        builder = builder.header("authorization", value);
    }

    app.oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

pub fn bearer() -> String {
    format!("Bearer {INBOUND_KEY}")
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        panic!(
            "Response body is not JSON ({e}): {}",
            String::from_utf8_lossy(&bytes)
        )
    })
}

/// A `generateContent` response with one candidate per inner slice.
pub fn gemini_response(candidates: &[&[&str]]) -> Value {
    let candidates: Vec<Value> = candidates
        .iter()
        .map(|parts| {
            let parts: Vec<Value> = parts.iter().map(|t| json!({ "text": t })).collect();
            json!({
                "content": { "role": "model", "parts": parts },
                "finishReason": "STOP"
            })
        })
        .collect();

    json!({
        "candidates": candidates,
        "modelVersion": "gemini-2.0-flash"
    })
}
