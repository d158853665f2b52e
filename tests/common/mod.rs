//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod mocks;

use axum::Router;
use roc_weather::{
    AppState, ProviderRegistry, RocConfig,
    api::routes::{Service, create_router},
};
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Router for `service` over a default configuration.
pub fn router(service: Service, registry: ProviderRegistry) -> Router {
    create_router(service).with_state(AppState::new(&RocConfig::default(), registry))
}

/// Bridge router whose weather client points at `weather_url`.
pub fn bridge_router(weather_url: &str) -> Router {
    let mut config = RocConfig::default();
    config.bridge.weather_url = weather_url.to_string();
    create_router(Service::Bridge).with_state(AppState::new(&config, ProviderRegistry::new()))
}
