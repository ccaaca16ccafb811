//! iNaturalist v1 response payloads
//!
//! Only the fields the core reads are modeled. Anything optional upstream is
//! optional here so one odd record cannot fail a whole batch.

use serde::Deserialize;

/// `GET /taxa` response
#[derive(Debug, Clone, Deserialize)]
pub struct TaxaResponse {
    pub results: Vec<RawTaxon>,
}

/// Taxon candidate from the taxonomy search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTaxon {
    pub id: u64,
    pub name: String,
    pub rank: String,
    /// `/`-separated ancestor ids, root first
    #[serde(default)]
    pub ancestry: Option<String>,
    #[serde(default)]
    pub preferred_common_name: Option<String>,
}

/// `GET /observations` response
#[derive(Debug, Clone, Deserialize)]
pub struct ObservationsResponse {
    pub results: Vec<RawObservation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawObservation {
    pub id: u64,
    #[serde(default)]
    pub photos: Option<Vec<RawPhoto>>,
    #[serde(default)]
    pub taxon: Option<RawObservationTaxon>,
}

/// Taxon nested inside an observation (usually species level)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawObservationTaxon {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub preferred_common_name: Option<String>,
}

/// Photo nested inside an observation
///
/// Search results usually carry only the square thumbnail `url`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPhoto {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub large_url: Option<String>,
    #[serde(default)]
    pub medium_url: Option<String>,
    #[serde(default)]
    pub original_url: Option<String>,
    #[serde(default)]
    pub attribution: Option<String>,
}
