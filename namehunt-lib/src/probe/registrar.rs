//! Registrar bulk-check prober.
//!
//! Alternative backend with the same contract as the DoH prober, preferred
//! when credentials are available: the registrar reports an explicit
//! availability flag per domain, so no heuristic is involved. One POST
//! covers a whole chunk.

use crate::error::NameHuntError;
use crate::probe::ProbeBackend;
use crate::types::{AvailabilityResult, AvailabilityStatus, RunConfig};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct BulkCheckResponse {
    domains: Vec<BulkCheckEntry>,
}

#[derive(Debug, Deserialize)]
struct BulkCheckEntry {
    domain: String,
    available: bool,
}

/// Prober backed by a registrar bulk-check API.
#[derive(Clone, Debug)]
pub struct RegistrarProber {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: String,
    /// Timeout for one bulk request (covers the whole chunk)
    timeout: Duration,
}

impl RegistrarProber {
    /// Create a prober for a registrar endpoint.
    ///
    /// Fails with a configuration error when the API key is empty.
    pub fn new(endpoint: String, api_key: String, timeout: Duration) -> Result<Self, NameHuntError> {
        if api_key.trim().is_empty() {
            return Err(NameHuntError::config(
                "registrar backend requires an API key (set NH_REGISTRAR_KEY or registrar_key)",
            ));
        }

        let http_client = reqwest::Client::builder()
            .timeout(timeout + Duration::from_secs(2))
            .build()
            .map_err(|e| {
                NameHuntError::network_with_source(
                    "Failed to create registrar HTTP client",
                    e.to_string(),
                )
            })?;

        Ok(Self {
            http_client,
            endpoint,
            api_key,
            timeout,
        })
    }

    /// Build from run configuration, requiring endpoint and key.
    pub fn from_config(config: &RunConfig) -> Result<Self, NameHuntError> {
        let endpoint = config.registrar_endpoint.clone().ok_or_else(|| {
            NameHuntError::config(
                "registrar backend requires an endpoint (set NH_REGISTRAR_URL or registrar_endpoint)",
            )
        })?;
        let api_key = config.registrar_key.clone().unwrap_or_default();
        Self::new(endpoint, api_key, config.probe_timeout)
    }

    /// POST the domain list and decode the per-domain flags.
    async fn bulk_check(&self, domains: &[String]) -> Result<BulkCheckResponse, NameHuntError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .json(&domains)
            .send()
            .await
            .map_err(|e| NameHuntError::network_with_source("bulk check failed", e.to_string()))?;

        if !response.status().is_success() {
            return Err(NameHuntError::network(format!(
                "registrar returned HTTP {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| NameHuntError::parse(format!("invalid registrar response: {}", e)))
    }
}

#[async_trait]
impl ProbeBackend for RegistrarProber {
    async fn probe(&self, domain: &str) -> AvailabilityResult {
        let chunk = vec![domain.to_string()];
        self.probe_chunk(&chunk)
            .await
            .pop()
            .unwrap_or_else(|| AvailabilityResult::new(domain, AvailabilityStatus::Error))
    }

    async fn probe_chunk(&self, domains: &[String]) -> Vec<AvailabilityResult> {
        match tokio::time::timeout(self.timeout, self.bulk_check(domains)).await {
            Ok(Ok(response)) => {
                let mut flags: HashMap<String, bool> = response
                    .domains
                    .into_iter()
                    .map(|entry| (entry.domain.to_lowercase(), entry.available))
                    .collect();

                domains
                    .iter()
                    .map(|domain| {
                        let status = match flags.remove(domain.as_str()) {
                            Some(true) => AvailabilityStatus::Available,
                            Some(false) => AvailabilityStatus::Unavailable,
                            // Missing from the bulk response: unknown, not unavailable
                            None => AvailabilityStatus::Error,
                        };
                        AvailabilityResult::new(domain.clone(), status)
                    })
                    .collect()
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, chunk = domains.len(), "bulk check failed");
                domains
                    .iter()
                    .map(|d| AvailabilityResult::new(d.clone(), AvailabilityStatus::Error))
                    .collect()
            }
            Err(_) => {
                tracing::debug!(chunk = domains.len(), "bulk check timed out");
                domains
                    .iter()
                    .map(|d| AvailabilityResult::new(d.clone(), AvailabilityStatus::Timeout))
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_api_key_is_a_config_error() {
        let err = RegistrarProber::new(
            "https://registrar.example/check".to_string(),
            "  ".to_string(),
            Duration::from_secs(3),
        )
        .unwrap_err();
        assert!(matches!(err, NameHuntError::Config { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn from_config_requires_endpoint() {
        let config = RunConfig {
            registrar_endpoint: None,
            registrar_key: Some("key".to_string()),
            ..RunConfig::default()
        };
        let err = RegistrarProber::from_config(&config).unwrap_err();
        assert!(matches!(err, NameHuntError::Config { .. }));
    }

    #[test]
    fn decodes_bulk_response_shape() {
        let body: BulkCheckResponse = serde_json::from_str(
            r#"{"domains":[{"domain":"a.com","available":true},{"domain":"b.com","available":false}]}"#,
        )
        .unwrap();
        assert_eq!(body.domains.len(), 2);
        assert!(body.domains[0].available);
        assert!(!body.domains[1].available);
    }
}
