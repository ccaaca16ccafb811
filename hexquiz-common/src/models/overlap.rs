//! Result of a taxonomic overlap check

use serde::{Deserialize, Serialize};

/// Whether a candidate taxon is an ancestor or descendant of one already chosen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapVerdict {
    pub overlaps: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflicting_taxon_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Set only when the input could not be verified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OverlapVerdict {
    pub fn clear() -> Self {
        Self::default()
    }

    pub fn conflict(conflicting_taxon_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            overlaps: true,
            conflicting_taxon_name: Some(conflicting_taxon_name.into()),
            reason: Some(reason.into()),
            error: None,
        }
    }

    /// Unverifiable input is reported as overlapping so the caller must re-check it
    pub fn malformed(diagnostic: impl Into<String>) -> Self {
        let diagnostic = diagnostic.into();
        Self {
            overlaps: true,
            conflicting_taxon_name: None,
            reason: Some(format!("Could not verify taxonomic overlap: {}", diagnostic)),
            error: Some(diagnostic),
        }
    }
}
