//! Random quiz question generation

use hexquiz_common::models::QuizQuestion;
use hexquiz_common::Error;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::services::diversifier::ObservationDiversifier;
use crate::services::random::RandomSource;
use crate::services::taxon_resolver::TaxonResolver;

/// Why a question could not be produced
#[derive(Debug, Error)]
pub enum PickError {
    #[error("No taxa provided")]
    NoCandidates,

    /// The randomly chosen taxon yielded no usable image
    #[error("Could not get image for {taxon}: {cause}")]
    Taxon {
        taxon: String,
        #[source]
        cause: Error,
    },
}

pub struct QuizQuestionPicker {
    resolver: Arc<TaxonResolver>,
    diversifier: Arc<ObservationDiversifier>,
    random: Arc<RandomSource>,
}

impl QuizQuestionPicker {
    pub fn new(
        resolver: Arc<TaxonResolver>,
        diversifier: Arc<ObservationDiversifier>,
        random: Arc<RandomSource>,
    ) -> Self {
        Self {
            resolver,
            diversifier,
            random,
        }
    }

    /// One image of a uniformly chosen taxon, labelled with that taxon's name
    ///
    /// A failing taxon is reported, not retried with another one.
    pub async fn pick(&self, candidates: &[String]) -> Result<QuizQuestion, PickError> {
        let chosen = self.random.choose(candidates).ok_or(PickError::NoCandidates)?;

        let fail = |cause: Error| {
            warn!(taxon = %chosen, "Quiz question failed: {}", cause);
            PickError::Taxon {
                taxon: chosen.clone(),
                cause,
            }
        };

        let taxon = self.resolver.resolve(chosen).await.map_err(fail)?;
        let result = self.diversifier.diversify(&taxon, 1).await.map_err(fail)?;

        let observation = result
            .observations
            .into_iter()
            .next()
            .ok_or_else(|| fail(Error::NotFound(format!("No photographed observations of {}", chosen))))?;
        let image_url = observation
            .primary_image_url()
            .map(str::to_string)
            .ok_or_else(|| fail(Error::NotFound(format!("Observation {} has no photo", observation.id))))?;

        info!(taxon = %chosen, observation = observation.id, "Picked quiz question");

        Ok(QuizQuestion {
            correct_answer: chosen.clone(),
            image_url,
            scientific_name: observation.scientific_name,
            observation_url: observation.permalink,
        })
    }
}
