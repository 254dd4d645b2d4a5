//! MorseOCR: an HTTP gateway that extracts text from uploaded images with
//! Google Gemini.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod ocr;
