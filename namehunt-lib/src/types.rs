//! Core data types for the availability-checking pipeline.
//!
//! This module defines the main data structures used throughout the library:
//! probe results, progress snapshots, category groups, run outcomes, and
//! configuration options.

use crate::error::NameHuntError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Classification of a single availability probe.
///
/// A closed enumeration rather than a boolean: a probe can fail independently
/// of a real availability determination, and callers must distinguish "known
/// unavailable" from "unknown due to infrastructure failure".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    /// The name does not resolve; likely open for registration
    Available,

    /// The name resolves; registered or otherwise taken
    Unavailable,

    /// The probe exceeded its per-request timeout budget
    Timeout,

    /// Transport or parse failure; availability unknown
    Error,
}

impl AvailabilityStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Unavailable => write!(f, "unavailable"),
            Self::Timeout => write!(f, "timeout"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Result of probing one domain. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResult {
    /// The normalized domain that was probed
    pub domain: String,

    /// Probe classification
    pub status: AvailabilityStatus,
}

impl AvailabilityResult {
    pub fn new<D: Into<String>>(domain: D, status: AvailabilityStatus) -> Self {
        Self {
            domain: domain.into(),
            status,
        }
    }
}

/// Transient progress snapshot emitted after each chunk settles.
///
/// Each snapshot supersedes the previous one; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchProgress {
    /// Domains probed so far, capped at `total`
    pub checked: usize,

    /// Total domains in this run
    pub total: usize,

    /// Available domains accumulated so far, in first-discovered order
    pub available: Vec<String>,
}

/// A labeled bucket of available domains, produced by the categorizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    /// Human-readable category label
    pub category: String,

    /// Domains in this bucket, in input order
    pub domains: Vec<String>,
}

/// Terminal state of a batch run.
///
/// Cancellation is a normal terminal state, not an error.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// All chunks processed; carries the final available list
    Completed(Vec<String>),

    /// Cancelled at a chunk boundary; carries the partial available list
    Cancelled(Vec<String>),

    /// An unrecoverable error escaped chunk-level handling
    Failed(NameHuntError),
}

/// Event yielded by [`crate::BatchRunner::run_stream`].
///
/// A run produces zero or more `Progress` events followed by exactly one
/// `Done` event, always last.
#[derive(Debug, Clone)]
pub enum RunEvent {
    Progress(BatchProgress),
    Done(RunOutcome),
}

/// Which prober backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// DNS-over-HTTPS NS-lookup heuristic (no credentials required)
    #[default]
    Doh,

    /// Registrar bulk-check API (authoritative, requires credentials)
    Registrar,
}

impl std::str::FromStr for Backend {
    type Err = NameHuntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "doh" | "dns" => Ok(Self::Doh),
            "registrar" => Ok(Self::Registrar),
            other => Err(NameHuntError::config(format!(
                "unknown backend '{}', expected 'doh' or 'registrar'",
                other
            ))),
        }
    }
}

/// Settings for the generative text service used by the generator and
/// categorizer. Any OpenAI-compatible chat completion endpoint works.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Full chat-completions URL
    pub endpoint: String,

    /// Model identifier sent with each request
    pub model: String,

    /// Bearer token; optional for local or unauthenticated endpoints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// How many candidate names the generator asks for
    pub list_size: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            list_size: 25,
        }
    }
}

/// Configuration options for a batch run.
///
/// One instance is owned per run; there is no shared module state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Maximum domains per chunk in sequential-chunk mode
    /// Default: 10, Range: 1-100
    pub batch_size: usize,

    /// Overall concurrency cap for whole-list mode
    /// Default: 20, Range: 1-100
    pub concurrency: usize,

    /// Per-probe timeout, independent per domain
    /// Default: 3 seconds
    #[serde(skip)]
    pub probe_timeout: Duration,

    /// Which prober backend to use
    pub backend: Backend,

    /// DNS-over-HTTPS resolver endpoint
    pub doh_endpoint: String,

    /// Registrar bulk-check endpoint (registrar backend only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrar_endpoint: Option<String>,

    /// Registrar API key (registrar backend only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrar_key: Option<String>,

    /// Generative text service settings
    pub llm: LlmConfig,

    /// Whether to categorize available domains after the run
    pub categorize: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            concurrency: 20,
            probe_timeout: Duration::from_secs(3),
            backend: Backend::Doh,
            doh_endpoint: "https://cloudflare-dns.com/dns-query".to_string(),
            registrar_endpoint: None,
            registrar_key: None,
            llm: LlmConfig::default(),
            categorize: true,
        }
    }
}

impl RunConfig {
    /// Set the chunk size, clamped to 1-100.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.clamp(1, 100);
        self
    }

    /// Set the whole-list concurrency cap, clamped to 1-100.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, 100);
        self
    }

    /// Set the per-probe timeout.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Select the prober backend.
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Point at a different DNS-over-HTTPS resolver.
    pub fn with_doh_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.doh_endpoint = endpoint.into();
        self
    }

    /// Enable or disable post-run categorization.
    pub fn with_categorize(mut self, enabled: bool) -> Self {
        self.categorize = enabled;
        self
    }
}
