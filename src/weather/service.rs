//! Weather query service
//!
//! Resolves a source id in the registry and fetches one report from it.

use crate::types::Result;
use crate::weather::registry::ProviderRegistry;
use crate::weather::WeatherReport;
use std::sync::Arc;

/// Resolves `(city, date, source)` queries against the provider registry.
#[derive(Clone)]
pub struct WeatherQueryService {
    registry: Arc<ProviderRegistry>,
}

impl WeatherQueryService {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    /// Build the provider registered under `source` for this query and
    /// invoke it once. Unknown sources fail with `UnknownProvider`.
    pub fn query(&self, city: &str, date: &str, source: &str) -> Result<WeatherReport> {
        let factory = self.registry.resolve(source)?;
        let provider = factory(city, date);
        provider.fetch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AppError;
    use crate::weather::registry::MOCK_SOURCE;
    use crate::weather::ReportProvider;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn service() -> WeatherQueryService {
        WeatherQueryService::new(Arc::new(ProviderRegistry::with_builtin_providers()))
    }

    #[test]
    fn test_query_mock() {
        let report = service().query("Taipei", "today", MOCK_SOURCE).unwrap();
        assert_eq!(report.city, "Taipei");
        assert_eq!(report.date, "today");
        assert_eq!(report.weather, "Sunny");
        assert_eq!(report.temperature, "26°C");
    }

    #[test]
    fn test_query_unknown_source() {
        let result = service().query("Taipei", "today", "radar");
        match result {
            Err(AppError::UnknownProvider { requested, available }) => {
                assert_eq!(requested, "radar");
                assert_eq!(available, vec!["mock".to_string()]);
            }
            other => panic!("expected UnknownProvider, got {:?}", other),
        }
    }

    #[test]
    fn test_provider_built_once_per_query() {
        struct Counting;
        impl ReportProvider for Counting {
            fn fetch(&self) -> Result<crate::weather::WeatherReport> {
                Ok(crate::weather::WeatherReport::unknown("c", "d"))
            }
        }

        let built = Arc::new(AtomicUsize::new(0));
        let counter = built.clone();
        let mut registry = ProviderRegistry::new();
        registry.register_fn("counting", move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Box::new(Counting)
        });

        let service = WeatherQueryService::new(Arc::new(registry));
        service.query("a", "b", "counting").unwrap();
        service.query("a", "b", "counting").unwrap();
        assert_eq!(built.load(Ordering::SeqCst), 2);
    }
}
