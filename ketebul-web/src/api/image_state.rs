//! Image slot transitions
//!
//! `GET /api/image-state?src=&alt=&state=&event=` rebuilds the view a page
//! rendered, applies the browser's load or error event and answers with the
//! markup the slot should switch to. The fallback always comes from the
//! site's configuration, never from the request.

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;

use crate::view::{ImageEvent, ImageMarkup, ImagePhase, ResilientImageView};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ImageStateQuery {
    /// Source the page requested (`data-src`), before any fallback swap
    pub src: String,
    #[serde(default)]
    pub alt: String,
    /// Phase the slot is currently in
    #[serde(default)]
    pub state: ImagePhase,
    pub event: ImageEvent,
}

/// GET /api/image-state
pub async fn image_state(
    State(state): State<AppState>,
    Query(query): Query<ImageStateQuery>,
) -> Json<ImageMarkup> {
    let mut view = ResilientImageView::restore(query.src, query.alt, state.images.fallback_url(), query.state);
    view.apply(query.event);
    Json(view.markup())
}
