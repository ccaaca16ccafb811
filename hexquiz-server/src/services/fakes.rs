//! In-memory search sources for unit tests

use async_trait::async_trait;
use hexquiz_common::{Error, Result};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::inat::{
    ObservationQuery, ObservationSearch, RawObservation, RawObservationTaxon, RawPhoto, RawTaxon,
    TaxaQuery, TaxonSearch,
};

/// Canned taxa and observations, keyed by query name and taxon id
#[derive(Default)]
pub struct FakeInat {
    pub taxa: HashMap<String, Vec<RawTaxon>>,
    pub observations: HashMap<u64, Vec<RawObservation>>,
    pub fail_taxa: bool,
    pub fail_observations: bool,
    pub taxa_queries: Mutex<Vec<TaxaQuery>>,
    pub observation_queries: Mutex<Vec<ObservationQuery>>,
}

impl FakeInat {
    pub fn with_taxon(mut self, query: &str, taxa: Vec<RawTaxon>) -> Self {
        self.taxa.insert(query.to_string(), taxa);
        self
    }

    pub fn with_observations(mut self, taxon_id: u64, observations: Vec<RawObservation>) -> Self {
        self.observations.insert(taxon_id, observations);
        self
    }

    pub fn last_observation_query(&self) -> Option<ObservationQuery> {
        self.observation_queries.lock().unwrap().last().cloned()
    }

    pub fn last_taxa_query(&self) -> Option<TaxaQuery> {
        self.taxa_queries.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TaxonSearch for FakeInat {
    async fn search_taxa(&self, query: &TaxaQuery) -> Result<Vec<RawTaxon>> {
        self.taxa_queries.lock().unwrap().push(query.clone());
        if self.fail_taxa {
            return Err(Error::ExternalService("taxa search timed out".into()));
        }
        let mut results = self.taxa.get(&query.q).cloned().unwrap_or_default();
        results.truncate(query.per_page as usize);
        Ok(results)
    }
}

#[async_trait]
impl ObservationSearch for FakeInat {
    async fn search_observations(&self, query: &ObservationQuery) -> Result<Vec<RawObservation>> {
        self.observation_queries.lock().unwrap().push(query.clone());
        if self.fail_observations {
            return Err(Error::ExternalService("observation search returned HTTP 503".into()));
        }
        let mut results = self.observations.get(&query.taxon_id).cloned().unwrap_or_default();
        results.truncate(query.per_page);
        Ok(results)
    }
}

pub fn raw_taxon(id: u64, name: &str, rank: &str, ancestry: &str) -> RawTaxon {
    RawTaxon {
        id,
        name: name.to_string(),
        rank: rank.to_string(),
        ancestry: Some(ancestry.to_string()),
        preferred_common_name: None,
    }
}

/// Observation with one square thumbnail, as search results usually return
pub fn raw_observation(id: u64, species: &str) -> RawObservation {
    RawObservation {
        id,
        photos: Some(vec![RawPhoto {
            url: Some(format!("https://static.inaturalist.org/photos/{}/square.jpg", id)),
            attribution: Some(format!("(c) observer {}", id)),
            ..Default::default()
        }]),
        taxon: Some(RawObservationTaxon {
            name: Some(species.to_string()),
            preferred_common_name: None,
        }),
    }
}
