use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

/// Any origin unless one is configured. An unparseable origin falls back to any.
pub fn cors_layer(allowed_origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match allowed_origin.map(HeaderValue::from_str) {
        Some(Ok(origin)) => layer.allow_origin(origin),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "Ignoring invalid CORS_ALLOWED_ORIGIN");
            layer.allow_origin(Any)
        }
        None => layer.allow_origin(Any),
    }
}
