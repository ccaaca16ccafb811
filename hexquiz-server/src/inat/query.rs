//! Query parameters for the taxa and observation searches

use hexquiz_common::models::{Rank, TaxonId};

/// Iconic taxon restricting searches to insects
pub const HEXAPOD_ICONIC_TAXON: &str = "Insecta";

/// Taxonomy search restricted to quiz ranks within the insect clade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxaQuery {
    pub q: String,
    pub ranks: Vec<Rank>,
    pub iconic_taxa: &'static str,
    pub per_page: u32,
}

impl TaxaQuery {
    pub fn hexapods(name: &str, per_page: u32) -> Self {
        Self {
            q: name.to_string(),
            ranks: Rank::ALL.to_vec(),
            iconic_taxa: HEXAPOD_ICONIC_TAXON,
            per_page,
        }
    }

    /// Query-string pairs; `rank` repeats once per permitted rank
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("q", self.q.clone())];
        params.extend(self.ranks.iter().map(|rank| ("rank", rank.as_str().to_string())));
        params.push(("iconic_taxa", self.iconic_taxa.to_string()));
        params.push(("per_page", self.per_page.to_string()));
        params
    }
}

/// Field observations are sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Votes,
    CreatedAt,
    ObservedOn,
}

impl SortField {
    pub const ALL: [SortField; 3] = [SortField::Votes, SortField::CreatedAt, SortField::ObservedOn];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Votes => "votes",
            SortField::CreatedAt => "created_at",
            SortField::ObservedOn => "observed_on",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub const ALL: [SortDirection; 2] = [SortDirection::Descending, SortDirection::Ascending];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Research-grade, photographed observations of one taxon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationQuery {
    pub taxon_id: TaxonId,
    pub per_page: usize,
    pub order_by: SortField,
    pub order: SortDirection,
    pub page: u32,
}

impl ObservationQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("taxon_id", self.taxon_id.to_string()),
            ("has", "photos".to_string()),
            ("quality_grade", "research".to_string()),
            ("per_page", self.per_page.to_string()),
            ("order_by", self.order_by.as_str().to_string()),
            ("order", self.order.as_str().to_string()),
            ("page", self.page.to_string()),
        ]
    }
}
