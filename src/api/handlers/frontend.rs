use crate::{
    AppState,
    agent::QueryOutcome,
    types::{
        AgentResponse, AppError, ErrorResponse, NO_RETURN_CONTROL, QueryRequest,
        ValidationErrorResponse,
    },
};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

fn agent_reply(status: StatusCode, text: String) -> Response {
    (status, Json(AgentResponse { agent_response: text })).into_response()
}

/// Answer a free-text query through the agent runtime
///
/// An empty body asks the default query.
#[utoipa::path(
    post,
    path = "/frontend/query",
    request_body = QueryRequest,
    responses(
        (status = 200, description = "Agent answer", body = AgentResponse),
        (
            status = 400,
            description = "The agent did not delegate, or the bridge had nothing to resume",
            body = AgentResponse
        ),
        (status = 422, description = "Malformed request body", body = ValidationErrorResponse),
        (status = 500, description = "Agent runtime or bridge failure", body = ErrorResponse)
    ),
    tag = "frontend"
)]
pub async fn query(State(state): State<AppState>, body: Bytes) -> Response {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        QueryRequest::default()
    } else {
        match serde_json::from_slice::<QueryRequest>(&body) {
            Ok(request) => request,
            Err(e) => {
                return AppError::Validation(format!("Invalid query body: {}", e)).into_response();
            }
        }
    };

    let Some(orchestrator) = state.orchestrator.as_ref() else {
        tracing::error!("Query received but no agent orchestrator is configured");
        return AppError::Configuration("Agent orchestrator is not configured".to_string())
            .into_response();
    };

    match orchestrator.run(&request.query).await {
        Ok(QueryOutcome::Answered(text)) => agent_reply(StatusCode::OK, text),
        Ok(QueryOutcome::NoReturnControl) => {
            agent_reply(StatusCode::BAD_REQUEST, NO_RETURN_CONTROL.to_string())
        }
        Ok(QueryOutcome::NothingToResume(message)) => {
            agent_reply(StatusCode::BAD_REQUEST, message)
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}
