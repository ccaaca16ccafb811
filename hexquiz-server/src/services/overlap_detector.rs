//! Taxonomic overlap detection
//!
//! Two quiz taxa overlap when one is an ancestor of the other, which would
//! make every photo of the descendant a correct answer for both. Each taxon's
//! lineage is its ancestry path plus its own id; overlap is a membership test
//! of one id in the other's lineage, in both directions.
//!
//! Only the candidate is compared against each existing taxon. Overlaps among
//! the existing taxa themselves are not looked for.

use hexquiz_common::models::{OverlapVerdict, TaxonDescriptor, TaxonRecord};
use tracing::{debug, warn};

/// Compare a candidate against already-chosen taxa, stopping at the first hit
pub fn check(candidate: &TaxonRecord, existing: &[TaxonRecord]) -> OverlapVerdict {
    let candidate_lineage = candidate.lineage();

    for other in existing {
        if other.lineage().contains(&candidate.id) {
            debug!(candidate = candidate.id, existing = other.id, "Candidate is an ancestor");
            return OverlapVerdict::conflict(
                &other.scientific_name,
                format!(
                    "{} ({}) is a parent/ancestor of {}",
                    candidate.scientific_name, candidate.rank, other.scientific_name
                ),
            );
        }

        if candidate_lineage.contains(&other.id) {
            debug!(candidate = candidate.id, existing = other.id, "Existing taxon is an ancestor");
            return OverlapVerdict::conflict(
                &other.scientific_name,
                format!(
                    "{} is a parent/ancestor of {} ({})",
                    other.scientific_name, candidate.scientific_name, candidate.rank
                ),
            );
        }
    }

    OverlapVerdict::clear()
}

/// [`check`] over client-supplied descriptors
///
/// Anything that cannot be normalized into a [`TaxonRecord`] produces an
/// overlapping verdict carrying the diagnostic, never a clean one.
pub fn check_descriptors(candidate: &TaxonDescriptor, existing: &[TaxonDescriptor]) -> OverlapVerdict {
    let candidate = match TaxonRecord::try_from(candidate) {
        Ok(record) => record,
        Err(e) => {
            warn!("Overlap check on malformed candidate: {}", e);
            return OverlapVerdict::malformed(e.to_string());
        }
    };

    let mut records = Vec::with_capacity(existing.len());
    for descriptor in existing {
        match TaxonRecord::try_from(descriptor) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("Overlap check on malformed existing taxon: {}", e);
                return OverlapVerdict::malformed(e.to_string());
            }
        }
    }

    check(&candidate, &records)
}
