//! CORS policy for browser clients (e.g. the blog frontend).
//!
//! Policy:
//! - Development: permissive (Allow-Origin: *), WITHOUT credentials.
//! - Production: allowlist origins from Config (comma-separated env var), WITHOUT credentials.

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;
use crate::middleware::http::REQUEST_ID_HEADER;

fn layer(config: &Config) -> CorsLayer {
    let cors = if config.app_env.is_production() {
        // An empty allowlist allows nothing.
        let allowed: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        let allow_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _req| {
            allowed.iter().any(|v| v == origin)
        });

        CorsLayer::new().allow_origin(allow_origin)
    } else {
        CorsLayer::new().allow_origin(Any)
    };

    cors.allow_methods([
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ])
    .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
    .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
    .max_age(std::time::Duration::from_secs(60 * 10))
}

/// Apply CORS policy to the given Router.
pub fn apply(router: Router, config: &Config) -> Router {
    router.layer(layer(config))
}
