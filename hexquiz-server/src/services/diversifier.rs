//! Diverse observation selection
//!
//! Fetches a randomized batch of research-grade photographed observations
//! for a taxon and keeps a deduplicated subset that favours distinct genera.
//!
//! Selection walks the batch in server order:
//! 1. Candidates without a usable photo or a taxon sub-record are ignored.
//! 2. A species already accepted is skipped.
//! 3. A genus already accepted is deferred.
//! 4. Anything else is accepted (first photo only) until `limit` is reached.
//!
//! If the batch runs out before `limit`, deferred same-genus candidates fill
//! the remaining slots in server order, still one per species.

use hexquiz_common::models::{DiversifiedResult, ObservationRecord, PhotoRef, TaxonId, TaxonRecord};
use hexquiz_common::{Error, Result};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use crate::inat::{ObservationQuery, ObservationSearch, RawObservation, RawPhoto, SortDirection, SortField};
use crate::services::random::RandomSource;

/// Observations requested when the caller does not say
pub const DEFAULT_LIMIT: usize = 5;

/// Upper bound on the raw batch pulled from upstream
pub const MAX_BATCH_SIZE: usize = 50;

/// Raw candidates fetched per requested observation
pub const BATCH_MULTIPLIER: usize = 10;

/// Result pages the randomized query may land on
pub const MAX_PAGE: u32 = 3;

const UNKNOWN: &str = "Unknown";

pub struct ObservationDiversifier {
    search: Arc<dyn ObservationSearch>,
    random: Arc<RandomSource>,
}

impl ObservationDiversifier {
    pub fn new(search: Arc<dyn ObservationSearch>, random: Arc<RandomSource>) -> Self {
        Self { search, random }
    }

    /// Raw batch size for a requested result size
    pub fn batch_size(limit: usize) -> usize {
        limit.saturating_mul(BATCH_MULTIPLIER).min(MAX_BATCH_SIZE)
    }

    /// Query with sort field, direction and page drawn fresh on every call
    pub fn randomized_query(&self, taxon_id: TaxonId, limit: usize) -> ObservationQuery {
        let order_by = *self
            .random
            .choose(&SortField::ALL)
            .unwrap_or(&SortField::Votes);
        let order = *self
            .random
            .choose(&SortDirection::ALL)
            .unwrap_or(&SortDirection::Descending);

        ObservationQuery {
            taxon_id,
            per_page: Self::batch_size(limit),
            order_by,
            order,
            page: self.random.between(1, MAX_PAGE),
        }
    }

    /// Up to `limit` diverse observations of an already-resolved taxon
    ///
    /// Fewer than `limit` results is not an error.
    pub async fn diversify(&self, taxon: &TaxonRecord, limit: usize) -> Result<DiversifiedResult> {
        if limit == 0 {
            return Err(Error::Validation("Observation count must be at least 1".to_string()));
        }

        let query = self.randomized_query(taxon.id, limit);
        debug!(
            taxon_id = taxon.id,
            per_page = query.per_page,
            order_by = query.order_by.as_str(),
            order = query.order.as_str(),
            page = query.page,
            "Fetching observation batch"
        );

        let batch = self.search.search_observations(&query).await?;
        let observations = select_diverse(&batch, limit);

        info!(
            taxon = %taxon.scientific_name,
            batch = batch.len(),
            accepted = observations.len(),
            requested = limit,
            "Diversified observations"
        );

        Ok(DiversifiedResult::new(taxon.clone(), limit, observations))
    }
}

/// Observation reduced to what selection needs
struct Candidate {
    id: u64,
    species: String,
    genus: String,
    common_name: String,
    photo: PhotoRef,
}

impl Candidate {
    fn from_raw(raw: &RawObservation) -> Option<Self> {
        let taxon = raw.taxon.as_ref()?;
        let photo = raw.photos.as_deref()?.first().and_then(derive_photo_ref)?;

        let species = taxon
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN)
            .to_string();
        let genus = genus_of(&species).to_string();

        Some(Self {
            id: raw.id,
            species,
            genus,
            common_name: taxon
                .preferred_common_name
                .clone()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            photo,
        })
    }

    fn into_record(self) -> ObservationRecord {
        ObservationRecord {
            id: self.id,
            scientific_name: self.species,
            common_name: self.common_name,
            photos: vec![self.photo],
            permalink: ObservationRecord::permalink_for(self.id),
        }
    }
}

/// First whitespace-delimited token of a scientific name
pub fn genus_of(scientific_name: &str) -> &str {
    scientific_name.split_whitespace().next().unwrap_or(UNKNOWN)
}

/// Pick at most `limit` observations, one per species, preferring new genera
pub fn select_diverse(batch: &[RawObservation], limit: usize) -> Vec<ObservationRecord> {
    let mut accepted = Vec::with_capacity(limit);
    let mut seen_species: HashSet<String> = HashSet::new();
    let mut seen_genera: HashSet<String> = HashSet::new();
    let mut deferred: Vec<Candidate> = Vec::new();

    for raw in batch {
        if accepted.len() >= limit {
            break;
        }
        let Some(candidate) = Candidate::from_raw(raw) else {
            continue;
        };
        if seen_species.contains(&candidate.species) {
            continue;
        }
        // The result cannot be full here, so a repeated genus waits for fill-in
        if seen_genera.contains(&candidate.genus) {
            deferred.push(candidate);
            continue;
        }

        seen_species.insert(candidate.species.clone());
        seen_genera.insert(candidate.genus.clone());
        accepted.push(candidate.into_record());
    }

    for candidate in deferred {
        if accepted.len() >= limit {
            break;
        }
        if !seen_species.insert(candidate.species.clone()) {
            continue;
        }
        accepted.push(candidate.into_record());
    }

    accepted
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn substitute_size(url: &str, size: &str) -> String {
    url.replace("square.jpeg", &format!("{}.jpeg", size))
        .replace("square.jpg", &format!("{}.jpg", size))
}

/// Derive full/medium/thumbnail URLs from one upstream photo
///
/// Square thumbnails are upsized by filename substitution. Otherwise the
/// explicit size URLs are used, falling back to the raw URL. `None` when the
/// photo carries no URL at all.
pub fn derive_photo_ref(photo: &RawPhoto) -> Option<PhotoRef> {
    let source = non_empty(&photo.url);
    let attribution = non_empty(&photo.attribution).unwrap_or(UNKNOWN).to_string();

    if let Some(url) = source {
        if url.contains("square.jpeg") || url.contains("square.jpg") {
            return Some(PhotoRef {
                full_url: substitute_size(url, "large"),
                medium_url: substitute_size(url, "medium"),
                thumbnail_url: url.to_string(),
                attribution,
            });
        }
    }

    let large = non_empty(&photo.large_url);
    let medium = non_empty(&photo.medium_url);
    let original = non_empty(&photo.original_url);

    let full_url = large.or(medium).or(original).or(source)?;
    let medium_url = medium.or(large).or(source).unwrap_or(full_url);

    Some(PhotoRef {
        full_url: full_url.to_string(),
        medium_url: medium_url.to_string(),
        thumbnail_url: source.unwrap_or(full_url).to_string(),
        attribution,
    })
}
