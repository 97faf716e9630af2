use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

use crate::config::Settings;

pub mod error;
pub mod permissions;

pub use permissions::permission_routes;

/// CORS for the browser frontends. Credentials are allowed, so the origin
/// list is explicit and request headers are mirrored instead of wildcarded.
pub fn cors_layer(settings: &Settings) -> anyhow::Result<CorsLayer> {
    let mut origins = Vec::new();
    for origin in settings.origins() {
        origins.push(origin.parse::<HeaderValue>()?);
    }

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600)))
}
