//! # Namehunt Library
//!
//! Batched domain availability checking with optional AI-assisted name
//! generation and categorization.
//!
//! The pipeline: raw input is normalized into domain tokens, an optional
//! generator proposes candidates from keywords, the batch runner probes each
//! token against a pluggable backend (DNS-over-HTTPS by default) in bounded
//! chunks while streaming progress snapshots, and an optional categorizer
//! groups the available names.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use namehunt_lib::{BatchRunner, CancelToken, RunConfig, RunEvent, RunOutcome};
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let runner = BatchRunner::new(RunConfig::default())?;
//!     let domains = vec!["example.com".to_string(), "surely-free.io".to_string()];
//!
//!     let mut stream = runner.run_stream(domains, CancelToken::new());
//!     while let Some(event) = stream.next().await {
//!         match event {
//!             RunEvent::Progress(p) => println!("{}/{} checked", p.checked, p.total),
//!             RunEvent::Done(RunOutcome::Completed(available)) => {
//!                 println!("available: {:?}", available)
//!             }
//!             RunEvent::Done(outcome) => println!("{:?}", outcome),
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **DoH Prober**: NS lookups against a DNS-over-HTTPS resolver, NXDOMAIN
//!   treated as available (a heuristic, deliberately kept as-is)
//! - **Registrar Prober**: bulk-check API backend with authoritative flags
//! - **Batch Runner**: fixed-size chunking, bounded concurrency, cooperative
//!   cancellation, streamed progress
//! - **Generator / Categorizer**: generative-text integrations with
//!   deterministic fallbacks

// Re-export main public API types and functions
pub use categorize::{fallback_grouping, Categorizer, FALLBACK_CATEGORY};
pub use config::{load_env_config, parse_duration, resolve_config, ConfigManager, EnvConfig, FileConfig};
pub use error::NameHuntError;
pub use generate::NameGenerator;
pub use normalize::{extract_domains, normalize, normalize_all};
pub use probe::{backend_from_config, DohProber, ProbeBackend, RegistrarProber};
pub use runner::{BatchRunner, CancelToken};
pub use types::{
    AvailabilityResult, AvailabilityStatus, Backend, BatchProgress, CategoryGroup, LlmConfig,
    RunConfig, RunEvent, RunOutcome,
};

// Internal modules - these are not part of the public API surface
mod categorize;
mod config;
mod error;
mod generate;
mod llm;
mod normalize;
mod probe;
mod runner;
mod types;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, NameHuntError>;

// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
