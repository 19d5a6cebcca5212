use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::debug;

use crate::application::AppConfig;
use crate::primitives::ConfigError;

/// CORS policy for the editor frontend.
///
/// Credentials are allowed, so methods and headers mirror the preflight
/// request instead of answering with a wildcard. A `*` origin mirrors the
/// caller's origin for the same reason.
pub fn cors_layer(config: &AppConfig) -> Result<CorsLayer, ConfigError> {
    let allow_origin = if config.allows_any_origin() {
        AllowOrigin::mirror_request()
    } else {
        let origins = config
            .allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidOrigin {
                    origin: origin.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(origins)
    };

    debug!(origins = ?config.allowed_origins, "CORS policy configured");

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}
