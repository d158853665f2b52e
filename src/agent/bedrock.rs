//! Amazon Bedrock Agents runtime
//!
//! Credentials come from the AWS default provider chain; only the region is
//! taken from configuration.

use crate::agent::{AgentRuntime, CompletionEvent, InvokeAgentRequest};
use crate::roc::envelope::{
    FunctionInvocationInput, FunctionParameter, InvocationEnvelope, InvocationInput, SessionState,
    TEXT_CONTENT,
};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_bedrockagentruntime::error::DisplayErrorContext;
use aws_sdk_bedrockagentruntime::types::{
    ContentBody as SdkContentBody, FunctionResult as SdkFunctionResult, InvocationInputMember,
    InvocationResultMember, ResponseStream, ReturnControlPayload,
    SessionState as SdkSessionState,
};
use aws_sdk_bedrockagentruntime::Client;

/// Bedrock Agents runtime client
pub struct BedrockAgentRuntime {
    client: Client,
}

impl BedrockAgentRuntime {
    /// Load AWS configuration for `region` and build the client
    pub async fn new(region: &str) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;

        tracing::info!("Bedrock agent runtime configured for region {}", region);
        Self {
            client: Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl AgentRuntime for BedrockAgentRuntime {
    async fn invoke_agent(&self, request: InvokeAgentRequest) -> Result<Vec<CompletionEvent>> {
        let session_state = request
            .session_state
            .as_ref()
            .map(to_sdk_session_state)
            .transpose()?;

        let output = self
            .client
            .invoke_agent()
            .agent_id(request.agent_id)
            .agent_alias_id(request.agent_alias_id)
            .session_id(request.session_id)
            .set_input_text(request.input_text)
            .set_session_state(session_state)
            .end_session(request.end_session)
            .send()
            .await
            .map_err(|e| {
                AppError::AgentRuntime(format!("invokeAgent failed: {}", DisplayErrorContext(&e)))
            })?;

        let mut completion = output.completion;
        let mut events = Vec::new();

        loop {
            let event = completion.recv().await.map_err(|e| {
                AppError::AgentRuntime(format!(
                    "Completion stream failed: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

            match event {
                Some(ResponseStream::Chunk(part)) => {
                    if let Some(bytes) = part.bytes() {
                        events.push(CompletionEvent::Chunk(bytes.as_ref().to_vec()));
                    }
                }
                Some(ResponseStream::ReturnControl(payload)) => {
                    events.push(CompletionEvent::ReturnControl(from_sdk_payload(&payload)));
                }
                Some(_) => events.push(CompletionEvent::Other),
                None => break,
            }
        }

        tracing::debug!("invokeAgent returned {} events", events.len());
        Ok(events)
    }

    fn name(&self) -> &str {
        "bedrock"
    }
}

fn from_sdk_payload(payload: &ReturnControlPayload) -> InvocationEnvelope {
    let invocation_inputs = payload
        .invocation_inputs()
        .iter()
        .map(|member| match member {
            InvocationInputMember::FunctionInvocationInput(input) => InvocationInput {
                function_invocation_input: Some(FunctionInvocationInput {
                    action_group: Some(input.action_group().to_string()),
                    function: input.function().map(str::to_string),
                    parameters: input
                        .parameters()
                        .iter()
                        .map(|p| FunctionParameter {
                            name: p.name().unwrap_or_default().to_string(),
                            param_type: p.r#type().map(str::to_string),
                            value: p.value().unwrap_or_default().to_string(),
                        })
                        .collect(),
                }),
            },
            // API-schema action groups are not bridged
            _ => InvocationInput::default(),
        })
        .collect();

    InvocationEnvelope {
        invocation_id: payload.invocation_id().map(str::to_string),
        invocation_inputs,
    }
}

fn to_sdk_session_state(state: &SessionState) -> Result<SdkSessionState> {
    let mut builder = SdkSessionState::builder().invocation_id(&state.invocation_id);

    for result in &state.return_control_invocation_results {
        let function_result = &result.function_result;
        let mut result_builder = SdkFunctionResult::builder()
            .action_group(&function_result.action_group)
            .function(&function_result.function);

        if let Some(body) = function_result.text_body() {
            result_builder = result_builder.response_body(
                TEXT_CONTENT,
                SdkContentBody::builder().body(body).build(),
            );
        }

        let sdk_result = result_builder
            .build()
            .map_err(|e| AppError::AgentRuntime(format!("Invalid function result: {}", e)))?;
        builder = builder
            .return_control_invocation_results(InvocationResultMember::FunctionResult(sdk_result));
    }

    Ok(builder.build())
}
