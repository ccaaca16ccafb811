//! iNaturalist integration
//!
//! The core components depend on the two search traits, not on the HTTP
//! client, so tests can substitute in-memory sources.

pub mod client;
pub mod query;
pub mod wire;

use async_trait::async_trait;
use hexquiz_common::Result;

pub use client::INaturalistClient;
pub use query::{ObservationQuery, SortDirection, SortField, TaxaQuery};
pub use wire::{RawObservation, RawObservationTaxon, RawPhoto, RawTaxon};

/// External taxonomy search
#[async_trait]
pub trait TaxonSearch: Send + Sync {
    /// Ranked taxon candidates, best match first
    async fn search_taxa(&self, query: &TaxaQuery) -> Result<Vec<RawTaxon>>;
}

/// External observation search
#[async_trait]
pub trait ObservationSearch: Send + Sync {
    /// Observations in server order
    async fn search_observations(&self, query: &ObservationQuery) -> Result<Vec<RawObservation>>;
}
