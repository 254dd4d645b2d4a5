use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::handlers;
use super::response;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MorseOCR API",
        version = "1.0.0",
        description = "Extract text from images using Google Gemini.",
    ),
    paths(handlers::ocr::extract_image_text),
    components(schemas(
        response::ExtractedText,
        response::ErrorBody,
        handlers::ocr::ImageUploadForm,
    )),
    tags(
        (name = "ocr", description = "Image text extraction (auth required)"),
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            utoipa::openapi::security::SecurityScheme::Http(utoipa::openapi::security::Http::new(
                utoipa::openapi::security::HttpAuthScheme::Bearer,
            )),
        );
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/redoc", ApiDoc::openapi()).into()
}
