pub mod auth_context;
pub mod request_context;

pub use auth_context::AuthContext;
pub use request_context::RequestContext;

use tower_http::cors::{Any, CorsLayer};

/// CORS layer for the API surface
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
