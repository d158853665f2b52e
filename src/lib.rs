//! # ROC Weather - Return-of-Control Weather Bridge
//!
//! Three cooperating HTTP services that let a hosted reasoning agent answer
//! weather questions by delegating the lookup to an external system.
//!
//! ## Overview
//!
//! ```text
//! user ─▶ frontend ─▶ agent runtime ──returnControl──▶ frontend
//!                                                         │
//!            bridge ◀─────────────────────────────────────┘
//!              │
//!              ▼
//!          weather ─▶ provider registry ─▶ provider
//! ```
//!
//! 1. **Weather service** - resolves `(city, date, source)` through a
//!    registry of pluggable report providers
//! 2. **Invocation bridge** - translates the agent's `returnControl` payload
//!    into a weather call and the report back into a session continuation
//! 3. **Frontend** - drives the invoke → bridge → resume round trip for a
//!    free-text query
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use roc_weather::weather::{registry::ProviderRegistry, service::WeatherQueryService};
//! use std::sync::Arc;
//!
//! let service = WeatherQueryService::new(Arc::new(ProviderRegistry::with_builtin_providers()));
//! let report = service.query("Taipei", "tomorrow", "mock")?;
//! println!("{} / {}", report.weather, report.temperature);
//! ```
//!
//! ### Registering a provider
//!
//! ```rust,ignore
//! use roc_weather::weather::{registry::ProviderRegistry, mock::MockProvider};
//!
//! let mut registry = ProviderRegistry::with_builtin_providers();
//! registry.register_fn("demo", |city, date| Box::new(MockProvider::new(city, date)));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `bedrock` | Amazon Bedrock Agents runtime for the frontend |
//! | `swagger-ui` | Interactive API documentation at `/swagger-ui/` |
//!
//! ## Modules
//!
//! - [`agent`] - Agent runtime abstraction and query orchestration
//! - [`api`] - REST API handlers and routes
//! - [`cli`] - Command-line parsing and terminal output
//! - [`roc`] - Invocation envelopes, bridge translation and HTTP clients
//! - [`weather`] - Weather providers, registry and query service
//! - [`types`] - Common types and error handling
//! - [`utils`] - TOML configuration

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// Agent runtime integration and orchestration.
pub mod agent;
/// HTTP API handlers and routes.
pub mod api;
/// Command-line interface.
pub mod cli;
/// Return-of-control invocation bridge.
pub mod roc;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities (TOML).
pub mod utils;
/// Weather providers and query resolution.
pub mod weather;

// Re-export commonly used types
pub use agent::{AgentOrchestrator, AgentRuntime, QueryOutcome};
pub use roc::{BridgeClient, InvocationBridge, WeatherEndpointClient};
pub use types::{AppError, Result};
pub use utils::toml_config::RocConfig;
pub use weather::registry::ProviderRegistry;
pub use weather::service::WeatherQueryService;
pub use weather::WeatherReport;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Weather query service over the provider registry
    pub weather: Arc<WeatherQueryService>,
    /// Invocation bridge pointed at the configured weather endpoint
    pub bridge: Arc<InvocationBridge>,
    /// Query orchestrator; only present when the frontend is served
    pub orchestrator: Option<Arc<AgentOrchestrator>>,
}

impl AppState {
    /// Build state for the weather and bridge services
    pub fn new(config: &RocConfig, registry: ProviderRegistry) -> Self {
        let weather_client = WeatherEndpointClient::new(config.bridge.weather_url.clone());

        Self {
            weather: Arc::new(WeatherQueryService::new(Arc::new(registry))),
            bridge: Arc::new(InvocationBridge::new(weather_client)),
            orchestrator: None,
        }
    }

    /// Attach the orchestrator used by the frontend
    pub fn with_orchestrator(mut self, orchestrator: AgentOrchestrator) -> Self {
        self.orchestrator = Some(Arc::new(orchestrator));
        self
    }
}
