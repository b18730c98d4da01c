//! CORS policy for the browser client.
//!
//! Policy:
//! - Development: any origin, WITHOUT credentials.
//! - Production: exact-match allowlist from `CORS_ALLOWED_ORIGINS`, WITH credentials.
//!   An empty allowlist allows no origin.
//!
//! Tokens travel in headers, so `Authorization`, `Refresh` and `Location` are exposed
//! to scripts.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;

pub const REFRESH_HEADER: &str = "refresh";

/// Do not combine a wildcard origin (`Any`) with `allow_credentials(true)`.
pub fn apply(router: Router, config: &Config) -> Router {
    router.layer(layer(config))
}

fn layer(config: &Config) -> CorsLayer {
    let cors = if config.app_env.is_production() {
        let allowed: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_credentials(true)
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
    .allow_headers([
        header::AUTHORIZATION,
        header::CONTENT_TYPE,
        header::ACCEPT,
        HeaderName::from_static(REFRESH_HEADER),
        HeaderName::from_static("x-request-id"),
    ])
    .expose_headers([
        header::AUTHORIZATION,
        header::LOCATION,
        HeaderName::from_static(REFRESH_HEADER),
    ])
    .max_age(Duration::from_secs(60 * 10))
}
