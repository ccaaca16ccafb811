//! Gallery endpoints: diversified photos for a taxon name

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use hexquiz_common::models::DiversifiedResult;

use crate::error::ApiResult;
use crate::services::diversifier::DEFAULT_LIMIT;
use crate::AppState;

/// GET /api/family/:name
pub async fn get_taxon_images(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<DiversifiedResult>> {
    let result = state.gallery.lookup(&name, DEFAULT_LIMIT as i64).await?;
    Ok(Json(result))
}

/// GET /api/family/:name/count/:count
///
/// `count` is clamped to 1..=20.
pub async fn get_taxon_images_with_count(
    State(state): State<AppState>,
    Path((name, count)): Path<(String, i64)>,
) -> ApiResult<Json<DiversifiedResult>> {
    let result = state.gallery.lookup(&name, count).await?;
    Ok(Json(result))
}

/// Build gallery routes
pub fn gallery_routes() -> Router<AppState> {
    Router::new()
        .route("/api/family/:name", get(get_taxon_images))
        .route("/api/family/:name/count/:count", get(get_taxon_images_with_count))
}
