use crate::{
    AppState,
    roc::envelope::{InvocationEnvelope, ResumeEnvelope},
    types::{AppError, ErrorResponse},
};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

fn error_reply(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorResponse { error: message })).into_response()
}

/// Handle a `returnControl` payload from the agent runtime
///
/// Every failure is answered with a JSON `{error}` body. An envelope without
/// invocation inputs is not a failure: it is answered with 200 and an
/// explanatory `{error}` so the caller can tell there is nothing to resume.
#[utoipa::path(
    post,
    path = "/roc/invocation",
    request_body = InvocationEnvelope,
    responses(
        (
            status = 200,
            description = "Session continuation, or `{error}` when there were no invocation inputs",
            body = ResumeEnvelope
        ),
        (
            status = 500,
            description = "Translation or weather endpoint failure",
            body = ErrorResponse
        )
    ),
    tag = "roc"
)]
pub async fn invocation(State(state): State<AppState>, body: Bytes) -> Response {
    let envelope: InvocationEnvelope = match serde_json::from_slice(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::error!("Invalid invocation payload: {}", e);
            return error_reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Invalid invocation payload: {}", e),
            );
        }
    };

    match state.bridge.handle(&envelope).await {
        Ok(resume) => Json(resume).into_response(),
        Err(AppError::EmptyInvocation) => {
            tracing::warn!("Invocation carried no inputs");
            error_reply(StatusCode::OK, AppError::EmptyInvocation.to_string())
        }
        Err(e) => {
            tracing::error!("Invocation failed: {}", e);
            error_reply(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
