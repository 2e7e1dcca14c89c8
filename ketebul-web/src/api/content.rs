//! Raw content API
//!
//! `GET /api/content/:kind` returns the records of one kind as JSON, for
//! clients that render on their own. Collections maintained in the config
//! file are answered locally; everything else comes from the store in store
//! order.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use ketebul_common::{ContentRecord, RecordKind};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ContentResponse {
    pub kind: RecordKind,
    pub count: usize,
    pub records: Vec<ContentRecord>,
}

/// GET /api/content/:kind
pub async fn get_content(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<ContentResponse>, ContentError> {
    let kind: RecordKind = kind
        .parse()
        .map_err(|_| ContentError::UnknownKind(kind.clone()))?;

    let records = match state.local.records(kind) {
        Some(records) => records.to_vec(),
        None => state
            .client
            .fetch(&state.client.query_for(kind))
            .await
            .map_err(|e| {
                error!(%kind, error = %e, "Content API fetch failed");
                ContentError::Upstream(e.to_string())
            })?,
    };

    Ok(Json(ContentResponse {
        kind,
        count: records.len(),
        records,
    }))
}

/// Content API errors
#[derive(Debug)]
pub enum ContentError {
    UnknownKind(String),
    Upstream(String),
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ContentError::UnknownKind(kind) => {
                (StatusCode::NOT_FOUND, format!("Unknown content kind: {}", kind))
            }
            ContentError::Upstream(msg) => {
                (StatusCode::BAD_GATEWAY, format!("Content store error: {}", msg))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
