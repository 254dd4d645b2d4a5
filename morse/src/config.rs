use serde::Deserialize;
use std::env;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost",
    "http://localhost:8000",
    "http://127.0.0.1:8000",
];

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// Reads a secret, treating an empty or whitespace-only value as unset.
fn parse_env_secret(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse `MORSE_ALLOWED_ORIGINS`.
/// Format: comma-separated origins, e.g. `https://app.example.com,http://localhost:3000`
fn parse_allowed_origins() -> Vec<String> {
    match env::var("MORSE_ALLOWED_ORIGINS") {
        Ok(val) if !val.trim().is_empty() => val
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        _ => DEFAULT_ALLOWED_ORIGINS
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Key expected in `Authorization: Bearer <key>` on protected routes.
    pub api_key: Option<String>,
    pub allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

/// Outbound Gemini settings.
#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            timeout_secs: 60,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("MORSE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("MORSE_PORT", 8000),
                api_key: parse_env_secret("MORSE_API_KEY"),
                allowed_origins: parse_allowed_origins(),
                max_upload_bytes: parse_env_or("MORSE_MAX_UPLOAD_BYTES", 20 * 1024 * 1024),
            },
            ocr: OcrConfig {
                api_key: parse_env_secret("GEMINI_API_KEY"),
                base_url: env::var("GEMINI_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
                model: env::var("GEMINI_MODEL")
                    .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
                timeout_secs: parse_env_or("OCR_TIMEOUT", 60),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
