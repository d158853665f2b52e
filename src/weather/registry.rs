//! Provider Registry for weather sources
//!
//! Maps a source identifier (e.g. `"mock"`) to the [`ProviderFactory`] that
//! builds providers for it. The registry is populated once at startup and
//! then shared read-only behind an `Arc`; there is no unregister operation.
//!
//! Registering an identifier twice replaces the earlier factory.

use crate::types::{AppError, Result};
use crate::utils::toml_config::WeatherConfig;
use crate::weather::{ProviderFactory, ProviderKind, ReportProvider};
use std::collections::HashMap;
use std::sync::Arc;

/// Source identifier of the built-in mock provider.
pub const MOCK_SOURCE: &str = "mock";

/// Registry of weather provider factories keyed by source identifier
pub struct ProviderRegistry {
    factories: HashMap<String, ProviderFactory>,
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Create a registry holding the built-in providers
    pub fn with_builtin_providers() -> Self {
        let mut registry = Self::new();
        registry.register(MOCK_SOURCE, ProviderKind::Mock.factory());
        registry
    }

    /// Create a registry from configuration: the built-in providers plus every
    /// source declared under `[weather.sources]`
    pub fn from_config(config: &WeatherConfig) -> Result<Self> {
        let mut registry = Self::with_builtin_providers();
        for (id, source) in &config.sources {
            registry.register_kind(id, &source.kind)?;
        }
        Ok(registry)
    }

    /// Register a factory under `id`, replacing any previous entry
    pub fn register(&mut self, id: &str, factory: ProviderFactory) {
        if self.factories.insert(id.to_string(), factory).is_some() {
            tracing::debug!("Replaced weather provider '{}'", id);
        }
    }

    /// Register a plain closure as the factory for `id`
    pub fn register_fn<F>(&mut self, id: &str, factory: F)
    where
        F: Fn(&str, &str) -> Box<dyn ReportProvider> + Send + Sync + 'static,
    {
        self.register(id, Arc::new(factory));
    }

    /// Bind `id` to a provider implementation named at runtime
    ///
    /// Fails with [`AppError::TypeMismatch`] when `kind` does not name a
    /// provider implementation.
    pub fn register_kind(&mut self, id: &str, kind: &str) -> Result<()> {
        let kind: ProviderKind = kind.parse()?;
        self.register(id, kind.factory());
        Ok(())
    }

    /// Look up the factory registered under `id`
    pub fn resolve(&self, id: &str) -> Result<ProviderFactory> {
        self.factories
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::UnknownProvider {
                requested: id.to_string(),
                available: self.ids(),
            })
    }

    /// All registered identifiers, sorted
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.factories.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Check if an identifier is registered
    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }
}
