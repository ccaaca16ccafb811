//! Free-text taxon name resolution
//!
//! Two deliberately different selection policies share one search:
//! - [`TaxonResolver::resolve`] (gallery, quiz questions) asks for a single
//!   candidate and takes it as-is.
//! - [`TaxonResolver::validate`] (adding a taxon to a quiz) asks for a small
//!   window of candidates and prefers an exact, case-insensitive name match.

use hexquiz_common::models::{parse_ancestry, Rank, TaxonRecord};
use hexquiz_common::{Error, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::inat::{RawTaxon, TaxaQuery, TaxonSearch};

/// Candidates requested for simple resolution
pub const RESOLVE_WINDOW: u32 = 1;

/// Candidates requested when validating a user-typed name
pub const VALIDATE_WINDOW: u32 = 5;

pub struct TaxonResolver {
    search: Arc<dyn TaxonSearch>,
}

impl TaxonResolver {
    pub fn new(search: Arc<dyn TaxonSearch>) -> Self {
        Self { search }
    }

    /// Best-effort resolution: the first candidate wins unconditionally
    pub async fn resolve(&self, name: &str) -> Result<TaxonRecord> {
        let taxon = self
            .candidates(name, RESOLVE_WINDOW)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| not_found(name))?;

        info!(
            query = %name.trim(),
            taxon_id = taxon.id,
            taxon = %taxon.scientific_name,
            rank = %taxon.rank,
            "Resolved taxon"
        );
        Ok(taxon)
    }

    /// Exact-match-preferred resolution over a window of candidates
    ///
    /// Falls back to the first candidate when no scientific name matches the
    /// input exactly (ignoring case).
    pub async fn validate(&self, name: &str) -> Result<TaxonRecord> {
        let mut candidates = self.candidates(name, VALIDATE_WINDOW).await?;
        if candidates.is_empty() {
            return Err(not_found(name));
        }

        let wanted = name.trim().to_lowercase();
        let exact = candidates
            .iter()
            .position(|taxon| taxon.scientific_name.to_lowercase() == wanted);
        let taxon = candidates.swap_remove(exact.unwrap_or(0));

        info!(
            query = %name.trim(),
            taxon_id = taxon.id,
            taxon = %taxon.scientific_name,
            exact = exact.is_some(),
            "Validated taxon"
        );
        Ok(taxon)
    }

    async fn candidates(&self, name: &str, window: u32) -> Result<Vec<TaxonRecord>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("Taxon name is required".to_string()));
        }

        let raw = self
            .search
            .search_taxa(&TaxaQuery::hexapods(name, window))
            .await?;

        let mut records = Vec::with_capacity(raw.len());
        for candidate in raw {
            if let Some(record) = to_record(candidate)? {
                records.push(record);
            }
        }
        Ok(records)
    }
}

fn not_found(name: &str) -> Error {
    Error::NotFound(format!(
        "\"{}\" is not a valid hexapod family, superfamily, or order",
        name.trim()
    ))
}

/// Convert an upstream candidate, dropping ranks outside the quiz ranks
fn to_record(raw: RawTaxon) -> Result<Option<TaxonRecord>> {
    let rank = match raw.rank.parse::<Rank>() {
        Ok(rank) => rank,
        Err(_) => {
            debug!(taxon_id = raw.id, rank = %raw.rank, "Skipping candidate with unsupported rank");
            return Ok(None);
        }
    };

    let path = raw.ancestry.as_deref().unwrap_or("");
    let ancestry = parse_ancestry(path).map_err(|e| {
        Error::ExternalService(format!(
            "Malformed ancestry '{}' for taxon {}: {}",
            path, raw.id, e
        ))
    })?;

    Ok(Some(TaxonRecord::new(
        raw.id,
        raw.name,
        raw.preferred_common_name,
        rank,
        ancestry,
    )))
}
