//! Application state shared across all handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::registry::FormRegistry;
use crate::submission::SubmissionProcessor;
use crate::validate::{RuleEngine, TokenRuleEngine};

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Application configuration.
    config: Config,

    /// Form registry, populated at boot.
    registry: Arc<FormRegistry>,

    /// Submission processor over the registry and rule engine.
    processor: SubmissionProcessor,
}

impl AppState {
    /// Create state with the built-in rule engine.
    pub fn new(config: Config, registry: Arc<FormRegistry>) -> Self {
        Self::with_engine(config, registry, Arc::new(TokenRuleEngine::new()))
    }

    /// Create state with a custom rule engine.
    pub fn with_engine(
        config: Config,
        registry: Arc<FormRegistry>,
        engine: Arc<dyn RuleEngine>,
    ) -> Self {
        let processor = SubmissionProcessor::new(registry.clone(), engine);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                registry,
                processor,
            }),
        }
    }

    /// Application configuration.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// The form registry.
    pub fn registry(&self) -> &FormRegistry {
        &self.inner.registry
    }

    /// The submission processor.
    pub fn processor(&self) -> &SubmissionProcessor {
        &self.inner.processor
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .finish()
    }
}
