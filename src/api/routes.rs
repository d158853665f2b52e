use crate::AppState;
use crate::api::{ApiDoc, handlers};
use crate::roc::client::{INVOCATION_PATH, WEATHER_PATH};
use axum::{
    Json, Router,
    routing::{get, post},
};
use std::fmt;
use utoipa::OpenApi;

/// Path of the frontend query endpoint.
pub const QUERY_PATH: &str = "/frontend/query";

/// One of the three HTTP services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Weather,
    Bridge,
    Frontend,
}

impl Service {
    pub const ALL: [Service; 3] = [Service::Weather, Service::Bridge, Service::Frontend];
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Weather => write!(f, "weather"),
            Service::Bridge => write!(f, "bridge"),
            Service::Frontend => write!(f, "frontend"),
        }
    }
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = String)),
    tag = "health"
)]
pub async fn health() -> &'static str {
    "OK"
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the router for a single service
pub fn create_router(service: Service) -> Router<AppState> {
    let router = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    let router = match service {
        Service::Weather => router.route(WEATHER_PATH, post(handlers::weather::get_weather)),
        Service::Bridge => router.route(INVOCATION_PATH, post(handlers::roc::invocation)),
        Service::Frontend => router.route(QUERY_PATH, post(handlers::frontend::query)),
    };

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/swagger.json", ApiDoc::openapi()),
    );

    router
}
