//! hexquiz-server library
//!
//! Photo gallery and quiz backend for hexapod taxa, backed by the
//! iNaturalist API. Exposed as a library so integration tests can build the
//! router around in-memory search sources.

pub mod api;
pub mod error;
pub mod inat;
pub mod services;
pub mod store;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::inat::{ObservationSearch, TaxonSearch};
use crate::services::{Gallery, ObservationDiversifier, QuizQuestionPicker, RandomSource, TaxonResolver};
use crate::store::QuizStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<TaxonResolver>,
    pub gallery: Arc<Gallery>,
    pub picker: Arc<QuizQuestionPicker>,
    pub store: Arc<QuizStore>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Wire the core components around one upstream source
    pub fn new<S>(source: Arc<S>, random: Arc<RandomSource>, store: QuizStore) -> Self
    where
        S: TaxonSearch + ObservationSearch + 'static,
    {
        let resolver = Arc::new(TaxonResolver::new(source.clone()));
        let diversifier = Arc::new(ObservationDiversifier::new(source, random.clone()));

        Self {
            gallery: Arc::new(Gallery::new(resolver.clone(), diversifier.clone())),
            picker: Arc::new(QuizQuestionPicker::new(resolver.clone(), diversifier, random)),
            resolver,
            store: Arc::new(store),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::gallery_routes())
        .merge(api::validation_routes())
        .merge(api::quiz_routes())
        .merge(api::health_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
