use crate::{
    AppState,
    types::{AppError, ErrorResponse, Result, ValidationErrorResponse, WeatherRequest},
    weather::{WeatherReport, registry::MOCK_SOURCE},
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

/// Get the weather report for a city and date
///
/// The provider source is fixed to `mock`.
#[utoipa::path(
    post,
    path = "/mcp/get_weather",
    request_body = WeatherRequest,
    responses(
        (status = 200, description = "Weather report", body = WeatherReport),
        (status = 422, description = "Missing or invalid city", body = ValidationErrorResponse),
        (status = 500, description = "Provider failure", body = ErrorResponse)
    ),
    tag = "weather"
)]
pub async fn get_weather(
    State(state): State<AppState>,
    payload: std::result::Result<Json<WeatherRequest>, JsonRejection>,
) -> Result<Json<WeatherReport>> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let (city, date) = request.into_query()?;

    let report = state
        .weather
        .query(&city, &date, MOCK_SOURCE)
        .inspect_err(|e| tracing::error!("Weather query failed: {}", e))?;

    Ok(Json(report))
}
