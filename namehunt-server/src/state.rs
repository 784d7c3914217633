//! Shared application state injected into every handler.

use namehunt_lib::{BatchRunner, Categorizer, NameGenerator, NameHuntError, RunConfig};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub runner: Arc<BatchRunner>,
    pub generator: Arc<NameGenerator>,
    pub categorizer: Arc<Categorizer>,
    pub config: RunConfig,
}

impl AppState {
    /// Build all services from one resolved configuration.
    ///
    /// Fails when the configured prober backend cannot be constructed, e.g.
    /// registrar credentials missing.
    pub fn new(config: RunConfig) -> Result<Self, NameHuntError> {
        Ok(Self {
            runner: Arc::new(BatchRunner::new(config.clone())?),
            generator: Arc::new(NameGenerator::new(&config.llm)?),
            categorizer: Arc::new(Categorizer::new(&config.llm)?),
            config,
        })
    }

    /// Build with an explicit runner (used by tests with a scripted backend).
    pub fn with_runner(runner: BatchRunner, config: RunConfig) -> Result<Self, NameHuntError> {
        Ok(Self {
            runner: Arc::new(runner),
            generator: Arc::new(NameGenerator::new(&config.llm)?),
            categorizer: Arc::new(Categorizer::new(&config.llm)?),
            config,
        })
    }
}
