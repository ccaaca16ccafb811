//! iNaturalist v1 API client

use async_trait::async_trait;
use hexquiz_common::config::InaturalistConfig;
use hexquiz_common::{Error, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::query::{ObservationQuery, TaxaQuery};
use super::wire::{ObservationsResponse, RawObservation, RawTaxon, TaxaResponse};
use super::{ObservationSearch, TaxonSearch};

/// HTTP client for the taxa and observation endpoints
pub struct INaturalistClient {
    http_client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl INaturalistClient {
    pub fn new(config: &InaturalistConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::ExternalService(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&'static str, String)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);

        tracing::debug!(url = %url, ?params, "Querying iNaturalist API");

        let response = self
            .http_client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::ExternalService(format!(
                        "iNaturalist {} request timed out after {:?}",
                        endpoint, self.timeout
                    ))
                } else {
                    Error::ExternalService(format!("iNaturalist {} request failed: {}", endpoint, e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::ExternalService(format!(
                "iNaturalist {} returned HTTP {}: {}",
                endpoint,
                status.as_u16(),
                error_text.chars().take(200).collect::<String>()
            )));
        }

        response.json::<T>().await.map_err(|e| {
            Error::ExternalService(format!("Malformed iNaturalist {} payload: {}", endpoint, e))
        })
    }
}

#[async_trait]
impl TaxonSearch for INaturalistClient {
    async fn search_taxa(&self, query: &TaxaQuery) -> Result<Vec<RawTaxon>> {
        let response: TaxaResponse = self.get_json("taxa", &query.to_params()).await?;
        Ok(response.results)
    }
}

#[async_trait]
impl ObservationSearch for INaturalistClient {
    async fn search_observations(&self, query: &ObservationQuery) -> Result<Vec<RawObservation>> {
        let response: ObservationsResponse = self.get_json("observations", &query.to_params()).await?;
        Ok(response.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = INaturalistClient::new(&InaturalistConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = InaturalistConfig {
            base_url: "http://localhost:9999/v1/".to_string(),
            ..Default::default()
        };
        let client = INaturalistClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9999/v1");
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_external_service_error() {
        // Port 9 (discard) is closed on test hosts; connection is refused fast
        let config = InaturalistConfig {
            base_url: "http://127.0.0.1:9/v1".to_string(),
            timeout_secs: 2,
            ..Default::default()
        };
        let client = INaturalistClient::new(&config).unwrap();

        let err = client
            .search_taxa(&TaxaQuery::hexapods("Formicidae", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ExternalService(_)));
    }
}
