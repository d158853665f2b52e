use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Date used when a caller does not name one.
pub const DEFAULT_DATE: &str = "today";

/// Query used by the frontend when the request body carries none.
pub const DEFAULT_QUERY: &str = "What's the weather?";

/// Response text returned when the agent answered without delegating.
pub const NO_RETURN_CONTROL: &str = "[No returnControl event received]";

// ============= API Request/Response Types =============

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct WeatherRequest {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl WeatherRequest {
    pub fn new(city: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            date: Some(date.into()),
        }
    }

    /// Validate the request and return `(city, date)`, defaulting an absent
    /// or empty date to "today".
    pub fn into_query(self) -> Result<(String, String)> {
        let city = match self.city {
            Some(city) if !city.is_empty() => city,
            Some(_) => {
                return Err(AppError::Validation(
                    "Field 'city' must not be empty".to_string(),
                ));
            }
            None => {
                return Err(AppError::Validation(
                    "Field 'city' is required".to_string(),
                ));
            }
        };

        let date = self
            .date
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_DATE.to_string());

        Ok((city, date))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QueryRequest {
    #[serde(default = "default_query")]
    pub query: String,
}

fn default_query() -> String {
    DEFAULT_QUERY.to_string()
}

impl Default for QueryRequest {
    fn default() -> Self {
        Self {
            query: default_query(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AgentResponse {
    pub agent_response: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub detail: String,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Unknown provider '{requested}'. Available: {}", .available.join(", "))]
    UnknownProvider {
        requested: String,
        available: Vec<String>,
    },

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("No invocation inputs provided")]
    EmptyInvocation,

    /// A downstream HTTP peer failed; the message is passed through as-is
    #[error("{0}")]
    UpstreamUnavailable(String),

    #[error("Agent runtime error: {0}")]
    AgentRuntime(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let message = self.to_string();
        let (status, body) = match self {
            AppError::Validation(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                serde_json::json!({ "detail": message }),
            ),
            AppError::EmptyInvocation => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": message }),
            ),
            AppError::UnknownProvider { .. }
            | AppError::TypeMismatch(_)
            | AppError::UpstreamUnavailable(_)
            | AppError::AgentRuntime(_)
            | AppError::Configuration(_)
            | AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": message }),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
