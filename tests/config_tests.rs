//! Configuration-driven wiring: roc.toml → registry → weather endpoint.

mod common;

use axum_test::TestServer;
use roc_weather::{
    ProviderRegistry, RocConfig, WeatherReport,
    api::routes::Service,
    types::AppError,
};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn load(toml: &str) -> RocConfig {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roc.toml");
    fs::write(&path, toml).unwrap();
    RocConfig::load(&path).unwrap()
}

#[test]
fn test_configured_sources_are_registered() {
    let config = load(
        r#"
[weather.sources.demo]
kind = "mock"

[weather.sources.backup]
kind = "MOCK"
"#,
    );

    let registry = ProviderRegistry::from_config(&config.weather).unwrap();
    assert_eq!(registry.ids(), vec!["backup", "demo", "mock"]);
}

#[test]
fn test_unknown_source_reports_available_ids() {
    let config = load("[weather.sources.demo]\nkind = \"mock\"\n");
    let registry = ProviderRegistry::from_config(&config.weather).unwrap();

    match registry.resolve("live") {
        Err(AppError::UnknownProvider {
            requested,
            available,
        }) => {
            assert_eq!(requested, "live");
            assert_eq!(available, vec!["demo", "mock"]);
        }
        other => panic!("Expected UnknownProvider, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_configured_registry_serves_weather() {
    let config = load(
        r#"
[server]
log_format = "json"

[weather]
port = 9103
"#,
    );
    assert_eq!(config.weather.port, 9103);

    let registry = ProviderRegistry::from_config(&config.weather).unwrap();
    let server = TestServer::new(common::router(Service::Weather, registry)).unwrap();

    let report: WeatherReport = server
        .post("/mcp/get_weather")
        .json(&json!({ "city": "taipei", "date": "TOMORROW" }))
        .await
        .json();

    assert_eq!(report.weather, "Cloudy");
    assert_eq!(report.date, "TOMORROW");
}
