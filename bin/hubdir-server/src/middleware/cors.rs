use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, warn};

use crate::config::Config;

/// CORS layer for the configured origin list. `*` allows any origin; a list
/// with no valid origin allows none.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let raw = config.cors_allowed_origins.trim();
    let base = CorsLayer::new().allow_headers(Any).allow_methods(Any);
    if raw == "*" {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = s, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        error!(
            configured = raw,
            "no valid CORS origin configured; cross-origin requests will be refused"
        );
        base
    } else {
        base.allow_origin(origins)
    }
}
