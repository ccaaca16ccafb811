//! Validation endpoints used while composing a custom quiz
//!
//! Both always answer 200 with their own structured body; failures are
//! reported inside it rather than as HTTP errors.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use hexquiz_common::models::{OverlapVerdict, Rank, TaxonDescriptor, TaxonId};
use hexquiz_common::Error;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::services::overlap_detector;
use crate::AppState;

/// Outcome of validating a typed taxon name
#[derive(Debug, Serialize)]
pub struct TaxonValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxon_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxon_id: Option<TaxonId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<Rank>,
    /// Ancestor ids as a `/`-separated path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ancestry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TaxonValidation {
    fn invalid(error: String) -> Self {
        Self {
            valid: false,
            taxon_name: None,
            taxon_id: None,
            rank: None,
            ancestry: None,
            common_name: None,
            error: Some(error),
        }
    }
}

/// GET /api/validate/taxon/:name
pub async fn validate_taxon_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<TaxonValidation> {
    let response = match state.resolver.validate(&name).await {
        Ok(taxon) => TaxonValidation {
            valid: true,
            ancestry: Some(taxon.ancestry_path()),
            taxon_name: Some(taxon.scientific_name),
            taxon_id: Some(taxon.id),
            rank: Some(taxon.rank),
            common_name: taxon.common_name,
            error: None,
        },
        Err(Error::NotFound(message)) => TaxonValidation::invalid(message),
        Err(e) => {
            warn!(taxon = %name, "Taxon validation failed: {}", e);
            TaxonValidation::invalid(format!("Error validating taxon name: {}", e))
        }
    };
    Json(response)
}

/// Body of an overlap check
#[derive(Debug, Default, Deserialize)]
pub struct OverlapRequest {
    #[serde(default)]
    pub new_taxon: TaxonDescriptor,
    #[serde(default)]
    pub existing_taxa: Vec<TaxonDescriptor>,
}

/// POST /api/validate/overlap
///
/// An unparseable body is itself reported as an overlapping verdict.
pub async fn check_taxonomic_overlap(
    payload: Result<Json<OverlapRequest>, JsonRejection>,
) -> Json<OverlapVerdict> {
    let verdict = match payload {
        Ok(Json(request)) => overlap_detector::check_descriptors(&request.new_taxon, &request.existing_taxa),
        Err(rejection) => {
            warn!("Rejected overlap request body: {}", rejection.body_text());
            OverlapVerdict::malformed(rejection.body_text())
        }
    };
    Json(verdict)
}

/// Build validation routes
pub fn validation_routes() -> Router<AppState> {
    Router::new()
        .route("/api/validate/taxon/:name", get(validate_taxon_name))
        .route("/api/validate/overlap", post(check_taxonomic_overlap))
}
