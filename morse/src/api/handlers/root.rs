use axum::Json;
use serde_json::{json, Value};

/// `GET /`
pub async fn welcome() -> Json<Value> {
    Json(json!({
        "message": "Welcome to MorseOCR. See /redoc for the interactive documentation."
    }))
}
