//! Static asset routes
//!
//! Stylesheet and the small script that forwards browser events (image load
//! and error, lightbox keys) to the server-rendered views. Pages link them
//! with `?v=<ASSET_VERSION>`, so they can be cached for a long time.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// Fingerprint of the embedded assets, computed by build.rs
pub const ASSET_VERSION: &str = env!("ASSET_VERSION");

const SITE_CSS: &str = include_str!("../../ui/site.css");
const SITE_JS: &str = include_str!("../../ui/site.js");

const CACHE_CONTROL: &str = "public, max-age=604800";

/// GET /static/site.css
pub async fn serve_site_css() -> Response {
    asset("text/css", SITE_CSS)
}

/// GET /static/site.js
pub async fn serve_site_js() -> Response {
    asset("application/javascript", SITE_JS)
}

fn asset(content_type: &'static str, body: &'static str) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type), (header::CACHE_CONTROL, CACHE_CONTROL)],
        body,
    )
        .into_response()
}
