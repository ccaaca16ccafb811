//! Gallery lookup: resolve a name, then diversify its observations

use hexquiz_common::models::DiversifiedResult;
use hexquiz_common::Result;
use std::sync::Arc;

use crate::services::diversifier::ObservationDiversifier;
use crate::services::taxon_resolver::TaxonResolver;

/// Smallest gallery size a caller may request
pub const MIN_COUNT: i64 = 1;

/// Largest gallery size a caller may request
pub const MAX_COUNT: i64 = 20;

/// Bound a requested gallery size to `MIN_COUNT..=MAX_COUNT`
pub fn clamp_count(count: i64) -> usize {
    count.clamp(MIN_COUNT, MAX_COUNT) as usize
}

pub struct Gallery {
    resolver: Arc<TaxonResolver>,
    diversifier: Arc<ObservationDiversifier>,
}

impl Gallery {
    pub fn new(resolver: Arc<TaxonResolver>, diversifier: Arc<ObservationDiversifier>) -> Self {
        Self { resolver, diversifier }
    }

    /// Best-effort resolution followed by diversified observations
    pub async fn lookup(&self, name: &str, count: i64) -> Result<DiversifiedResult> {
        let taxon = self.resolver.resolve(name).await?;
        self.diversifier.diversify(&taxon, clamp_count(count)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::{raw_observation, raw_taxon, FakeInat};
    use crate::services::random::RandomSource;
    use hexquiz_common::Error;

    fn gallery(fake: FakeInat) -> (Gallery, Arc<FakeInat>) {
        let fake = Arc::new(fake);
        let resolver = Arc::new(TaxonResolver::new(fake.clone()));
        let diversifier = Arc::new(ObservationDiversifier::new(
            fake.clone(),
            Arc::new(RandomSource::seeded(5)),
        ));
        (Gallery::new(resolver, diversifier), fake)
    }

    #[test]
    fn test_clamp_count() {
        assert_eq!(clamp_count(-3), 1);
        assert_eq!(clamp_count(0), 1);
        assert_eq!(clamp_count(7), 7);
        assert_eq!(clamp_count(500), 20);
    }

    #[tokio::test]
    async fn test_lookup_resolves_then_diversifies() {
        let (gallery, fake) = gallery(
            FakeInat::default()
                .with_taxon("Vespidae", vec![raw_taxon(52747, "Vespidae", "family", "1/47120")])
                .with_observations(
                    52747,
                    vec![
                        raw_observation(10, "Vespula vulgaris"),
                        raw_observation(11, "Polistes dominula"),
                        raw_observation(12, "Vespa crabro"),
                    ],
                ),
        );

        let result = gallery.lookup("Vespidae", 100).await.unwrap();
        assert_eq!(result.taxon.id, 52747);
        assert_eq!(result.requested_count, 20);
        assert_eq!(result.total_found, 3);
        assert_eq!(fake.last_observation_query().unwrap().taxon_id, 52747);
    }

    #[tokio::test]
    async fn test_lookup_unknown_taxon_skips_observation_search() {
        let (gallery, fake) = gallery(FakeInat::default());

        let err = gallery.lookup("Nonexistidae", 5).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(fake.last_observation_query().is_none());
    }
}
