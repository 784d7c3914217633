//! DNS-over-HTTPS prober.
//!
//! Issues an NS lookup for the domain against a DoH resolver and classifies
//! the response: NXDOMAIN means the name does not exist in the zone, which
//! this system treats as "available". That is a heuristic, not authoritative:
//! a name can be NXDOMAIN yet reserved, and some available names resolve
//! at the registry level. Downstream behavior assumes the heuristic.

use crate::error::NameHuntError;
use crate::probe::ProbeBackend;
use crate::types::{AvailabilityResult, AvailabilityStatus};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// DNS response code for "name does not exist".
const NXDOMAIN: u32 = 3;

/// Minimal view of an `application/dns-json` response.
#[derive(Debug, Deserialize)]
struct DnsJsonResponse {
    #[serde(rename = "Status")]
    status: u32,
}

/// Classify a resolver status code.
pub(crate) fn classify_dns_status(status: u32) -> AvailabilityStatus {
    if status == NXDOMAIN {
        AvailabilityStatus::Available
    } else {
        AvailabilityStatus::Unavailable
    }
}

/// Prober backed by a DNS-over-HTTPS resolver.
#[derive(Clone)]
pub struct DohProber {
    /// HTTP client for resolver requests
    http_client: reqwest::Client,
    /// Resolver endpoint, e.g. `https://cloudflare-dns.com/dns-query`
    endpoint: String,
    /// Per-probe timeout, applied to each domain independently
    timeout: Duration,
}

impl DohProber {
    /// Create a prober against the default public resolver with a 3 s timeout.
    pub fn new() -> Result<Self, NameHuntError> {
        Self::with_config(
            "https://cloudflare-dns.com/dns-query".to_string(),
            Duration::from_secs(3),
        )
    }

    /// Create a prober against a specific resolver endpoint.
    pub fn with_config(endpoint: String, timeout: Duration) -> Result<Self, NameHuntError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout + Duration::from_secs(2)) // Add buffer for HTTP timeout
            .build()
            .map_err(|e| {
                NameHuntError::network_with_source("Failed to create DoH HTTP client", e.to_string())
            })?;

        Ok(Self {
            http_client,
            endpoint,
            timeout,
        })
    }

    /// Query the resolver for NS records and return the response status code.
    async fn lookup_ns(&self, domain: &str) -> Result<u32, NameHuntError> {
        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&[("name", domain), ("type", "NS")])
            .header("accept", "application/dns-json")
            .send()
            .await
            .map_err(|e| NameHuntError::probe(domain, format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(NameHuntError::probe(
                domain,
                format!("resolver returned HTTP {}", response.status()),
            ));
        }

        let body: DnsJsonResponse = response
            .json()
            .await
            .map_err(|e| NameHuntError::probe(domain, format!("invalid resolver response: {}", e)))?;

        Ok(body.status)
    }
}

#[async_trait]
impl ProbeBackend for DohProber {
    async fn probe(&self, domain: &str) -> AvailabilityResult {
        let status = match tokio::time::timeout(self.timeout, self.lookup_ns(domain)).await {
            Ok(Ok(code)) => {
                let status = classify_dns_status(code);
                tracing::debug!(domain, dns_status = code, %status, "probe settled");
                status
            }
            Ok(Err(e)) => {
                tracing::debug!(domain, error = %e, "probe failed");
                AvailabilityStatus::Error
            }
            Err(_) => {
                tracing::debug!(domain, timeout = ?self.timeout, "probe timed out");
                AvailabilityStatus::Timeout
            }
        };

        AvailabilityResult::new(domain, status)
    }
}
