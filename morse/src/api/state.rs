use std::sync::Arc;

use crate::auth::Authenticator;
use crate::config::Config;
use crate::ocr::OcrProvider;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub authenticator: Authenticator,
    pub ocr: OcrProvider,
}

impl AppState {
    pub fn new(config: Config, ocr: OcrProvider) -> Self {
        let authenticator = Authenticator::new(&config.server);

        Self {
            config: Arc::new(config),
            authenticator,
            ocr,
        }
    }
}
