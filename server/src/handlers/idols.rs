//! Handlers for the idol asset resource.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct IdolSummary {
    pub id: u32,
    pub name: String,
    pub size: String,
}

/// GET /idols, listing the catalog as `{id, name, size}` entries.
pub async fn list(State(state): State<AppState>) -> Json<Vec<IdolSummary>> {
    let idols = state
        .catalog
        .iter()
        .map(|asset| IdolSummary {
            id: asset.id,
            name: asset.name.clone(),
            size: asset.size_label.clone(),
        })
        .collect();
    Json(idols)
}

/// GET /idols/{id}/image, serving the raw idol image bytes.
pub async fn image(State(state): State<AppState>, Path(id): Path<u32>) -> AppResult<Response> {
    let asset = state.catalog.get(id).ok_or(AppError::IdolNotFound(id))?;
    Ok((
        [(header::CONTENT_TYPE, asset.content_type)],
        asset.bytes().to_vec(),
    )
        .into_response())
}
