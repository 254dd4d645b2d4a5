pub mod extractors;
pub mod handlers;
mod middleware;
pub mod openapi;
pub mod response;
mod routes;
mod state;

pub use routes::{create_router, SECURITY_HEADERS};
pub use state::AppState;
