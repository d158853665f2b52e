//! HTTP API Handlers and Routes
//!
//! The REST layer for the three services, built on the Axum web framework.
//! Each service runs on its own port and reaches its peer over HTTP.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! ## Weather service (default port 8003)
//! - `POST /mcp/get_weather` - Weather report for `{city, date?}`
//!
//! ## Invocation bridge (default port 8002)
//! - `POST /roc/invocation` - Translate a `returnControl` payload into a session continuation
//!
//! ## Frontend (default port 8000)
//! - `POST /frontend/query` - Answer a free-text query through the agent runtime
//!
//! ## Every service
//! - `GET /health` - Health check endpoint
//! - `GET /api-docs/openapi.json` - OpenAPI document
//!
//! # OpenAPI Documentation
//!
//! When the `swagger-ui` feature is enabled, interactive API documentation
//! is available at `/swagger-ui/`.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

use utoipa::OpenApi;

/// OpenAPI document for all three services
#[derive(OpenApi)]
#[openapi(
    info(
        title = "ROC Weather",
        description = "Weather provider service, return-of-control bridge and agent frontend"
    ),
    paths(
        handlers::weather::get_weather,
        handlers::roc::invocation,
        handlers::frontend::query,
        routes::health,
    ),
    components(schemas(
        crate::types::WeatherRequest,
        crate::types::QueryRequest,
        crate::types::AgentResponse,
        crate::types::ErrorResponse,
        crate::types::ValidationErrorResponse,
        crate::weather::WeatherReport,
        crate::roc::envelope::InvocationEnvelope,
        crate::roc::envelope::InvocationInput,
        crate::roc::envelope::FunctionInvocationInput,
        crate::roc::envelope::FunctionParameter,
        crate::roc::envelope::ResumeEnvelope,
        crate::roc::envelope::SessionState,
        crate::roc::envelope::InvocationResult,
        crate::roc::envelope::FunctionResult,
        crate::roc::envelope::ContentBody,
    )),
    tags(
        (name = "weather", description = "Weather reports"),
        (name = "roc", description = "Return-of-control invocation bridge"),
        (name = "frontend", description = "Agent-backed query frontend"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;
