//! Weather Providers
//!
//! A provider turns a `(city, date)` pair into a [`WeatherReport`]. Providers
//! are built per query by a [`ProviderFactory`] looked up in the
//! [`ProviderRegistry`](registry::ProviderRegistry) and invoked exactly once.
//!
//! # Module Structure
//!
//! - [`mock`](crate::weather::mock) - Fixed-dataset provider used for demos and tests
//! - [`registry`](crate::weather::registry) - Source identifier to factory table
//! - [`service`](crate::weather::service) - `(city, date, source)` query resolution
//!
//! # Example
//!
//! ```rust,ignore
//! use roc_weather::weather::{registry::ProviderRegistry, service::WeatherQueryService};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(ProviderRegistry::with_builtin_providers());
//! let service = WeatherQueryService::new(registry);
//! let report = service.query("Taipei", "today", "mock")?;
//! assert_eq!(report.weather, "Sunny");
//! ```

/// Fixed-dataset mock provider.
pub mod mock;
/// Provider registry.
pub mod registry;
/// Query resolution over the registry.
pub mod service;

use crate::types::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use utoipa::ToSchema;

/// Placeholder weather used when no data matches a query.
pub const UNKNOWN_WEATHER: &str = "Unknown";

/// Placeholder temperature used when no data matches a query.
pub const UNKNOWN_TEMPERATURE: &str = "N/A";

/// Structured weather report returned by every provider.
///
/// All four fields are always populated; providers use
/// [`UNKNOWN_WEATHER`] / [`UNKNOWN_TEMPERATURE`] when they have no data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WeatherReport {
    pub city: String,
    pub date: String,
    pub weather: String,
    pub temperature: String,
}

impl WeatherReport {
    /// Report for a query nothing matched, echoing the caller's input.
    pub fn unknown(city: &str, date: &str) -> Self {
        Self {
            city: city.to_string(),
            date: date.to_string(),
            weather: UNKNOWN_WEATHER.to_string(),
            temperature: UNKNOWN_TEMPERATURE.to_string(),
        }
    }
}

/// A provider bound to a single `(city, date)` query.
pub trait ReportProvider: Send {
    /// Produce the report for the query this provider was built with.
    fn fetch(&self) -> Result<WeatherReport>;
}

/// Builds a provider for one `(city, date)` query.
pub type ProviderFactory = Arc<dyn Fn(&str, &str) -> Box<dyn ReportProvider> + Send + Sync>;

/// Provider implementations that can be bound to a source identifier from
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Mock,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 1] = [ProviderKind::Mock];

    /// Factory for this provider implementation.
    pub fn factory(self) -> ProviderFactory {
        match self {
            ProviderKind::Mock => Arc::new(|city: &str, date: &str| {
                Box::new(mock::MockProvider::new(city, date)) as Box<dyn ReportProvider>
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ProviderKind::Mock => "mock",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let requested = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == requested)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|kind| kind.name()).collect();
                AppError::TypeMismatch(format!(
                    "'{}' is not a weather provider implementation (expected one of: {})",
                    requested,
                    names.join(", ")
                ))
            })
    }
}
