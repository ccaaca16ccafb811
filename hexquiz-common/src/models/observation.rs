//! Photographed observations and diversified result sets

use serde::{Deserialize, Serialize};

use super::taxon::TaxonRecord;

/// Base URL for observation permalinks
pub const OBSERVATION_PERMALINK_BASE: &str = "https://www.inaturalist.org/observations";

/// One image at three resolutions
///
/// All three URLs point at the same underlying photo, or fall back to the
/// source URL when no size substitution applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRef {
    pub full_url: String,
    pub medium_url: String,
    pub thumbnail_url: String,
    pub attribution: String,
}

/// Observation selected for display or for a quiz prompt
///
/// Produced per request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub id: u64,
    pub scientific_name: String,
    pub common_name: String,
    /// Never empty
    pub photos: Vec<PhotoRef>,
    pub permalink: String,
}

impl ObservationRecord {
    pub fn permalink_for(id: u64) -> String {
        format!("{}/{}", OBSERVATION_PERMALINK_BASE, id)
    }

    /// Full-size URL of the primary photo
    pub fn primary_image_url(&self) -> Option<&str> {
        self.photos.first().map(|photo| photo.full_url.as_str())
    }
}

/// Diverse, deduplicated observations for one taxon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiversifiedResult {
    pub taxon: TaxonRecord,
    pub requested_count: usize,
    /// Number of observations actually accepted (may be below `requested_count`)
    pub total_found: usize,
    pub observations: Vec<ObservationRecord>,
}

impl DiversifiedResult {
    pub fn new(taxon: TaxonRecord, requested_count: usize, observations: Vec<ObservationRecord>) -> Self {
        Self {
            taxon,
            requested_count,
            total_found: observations.len(),
            observations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::taxon::Rank;

    fn photo(url: &str) -> PhotoRef {
        PhotoRef {
            full_url: url.to_string(),
            medium_url: url.to_string(),
            thumbnail_url: url.to_string(),
            attribution: "Unknown".to_string(),
        }
    }

    #[test]
    fn test_permalink() {
        assert_eq!(
            ObservationRecord::permalink_for(123),
            "https://www.inaturalist.org/observations/123"
        );
    }

    #[test]
    fn test_total_found_tracks_observations() {
        let taxon = TaxonRecord::new(47336, "Formicidae", None, Rank::Family, vec![1]);
        let observation = ObservationRecord {
            id: 9,
            scientific_name: "Lasius niger".into(),
            common_name: "Black Garden Ant".into(),
            photos: vec![photo("https://example.org/large.jpg")],
            permalink: ObservationRecord::permalink_for(9),
        };

        let result = DiversifiedResult::new(taxon, 5, vec![observation]);
        assert_eq!(result.requested_count, 5);
        assert_eq!(result.total_found, 1);
        assert_eq!(
            result.observations[0].primary_image_url(),
            Some("https://example.org/large.jpg")
        );
    }
}
