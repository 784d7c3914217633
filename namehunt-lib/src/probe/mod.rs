//! Prober backends.
//!
//! One domain in, one [`AvailabilityResult`] out, no raised errors: every
//! failure path resolves to a status value. Backends are swappable behind
//! [`ProbeBackend`] and selected by configuration.

mod doh;
mod registrar;

pub use doh::DohProber;
pub use registrar::RegistrarProber;

use crate::error::NameHuntError;
use crate::types::{AvailabilityResult, Backend, RunConfig};
use async_trait::async_trait;
use std::sync::Arc;

/// A pluggable availability probe backend.
#[async_trait]
pub trait ProbeBackend: Send + Sync {
    /// Probe one domain. Infallible by contract: timeouts and transport
    /// failures become `Timeout`/`Error` statuses.
    async fn probe(&self, domain: &str) -> AvailabilityResult;

    /// Probe one chunk with intra-chunk concurrency.
    ///
    /// The default launches every per-domain probe concurrently and waits
    /// for all of them to settle. Bulk backends override this with a single
    /// request. Results come back in input order.
    async fn probe_chunk(&self, domains: &[String]) -> Vec<AvailabilityResult> {
        futures::future::join_all(domains.iter().map(|domain| self.probe(domain))).await
    }
}

/// Build the configured backend.
///
/// Fails with a configuration error when the registrar backend is selected
/// without credentials; fatal for the whole run, surfaced once.
pub fn backend_from_config(config: &RunConfig) -> Result<Arc<dyn ProbeBackend>, NameHuntError> {
    match config.backend {
        Backend::Doh => Ok(Arc::new(DohProber::with_config(
            config.doh_endpoint.clone(),
            config.probe_timeout,
        )?)),
        Backend::Registrar => Ok(Arc::new(RegistrarProber::from_config(config)?)),
    }
}
