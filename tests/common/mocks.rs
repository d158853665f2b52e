//! Mock implementations for testing.
//!
//! Provides a scripted agent runtime so orchestrator flows can be exercised
//! without a real agent service.

use async_trait::async_trait;
use roc_weather::agent::{AgentRuntime, CompletionEvent, InvokeAgentRequest};
use roc_weather::roc::envelope::{FunctionParameter, InvocationEnvelope};
use roc_weather::types::{AppError, Result};
use std::collections::VecDeque;
use std::sync::Mutex;

/// One scripted reply of the runtime.
#[derive(Debug, Clone)]
pub enum Step {
    /// Return these events as-is
    Events(Vec<CompletionEvent>),
    /// Answer with the text body of the supplied session state, split over
    /// two chunks
    EchoSessionState,
    /// Fail the call
    Fail(String),
}

/// Agent runtime that replays a script and records every request.
///
/// Calls beyond the end of the script fail.
pub struct ScriptedAgentRuntime {
    steps: Mutex<VecDeque<Step>>,
    calls: Mutex<Vec<InvokeAgentRequest>>,
}

impl ScriptedAgentRuntime {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Delegate a weather lookup for `(city, date)`, then answer with what
    /// the bridge returned.
    pub fn delegating(city: &str, date: &str) -> Self {
        Self::new(vec![
            Step::Events(vec![
                CompletionEvent::Other,
                CompletionEvent::ReturnControl(weather_invocation("inv-1", city, date)),
            ]),
            Step::EchoSessionState,
        ])
    }

    /// Answer directly without delegating.
    pub fn answering(text: &str) -> Self {
        Self::new(vec![Step::Events(vec![CompletionEvent::Chunk(
            text.as_bytes().to_vec(),
        )])])
    }

    /// Requests received so far.
    pub fn calls(&self) -> Vec<InvokeAgentRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentRuntime for ScriptedAgentRuntime {
    async fn invoke_agent(&self, request: InvokeAgentRequest) -> Result<Vec<CompletionEvent>> {
        let step = self.steps.lock().unwrap().pop_front();
        let session_state = request.session_state.clone();
        self.calls.lock().unwrap().push(request);

        match step {
            Some(Step::Events(events)) => Ok(events),
            Some(Step::EchoSessionState) => {
                let text = session_state
                    .and_then(|state| state.return_control_invocation_results.into_iter().next())
                    .and_then(|result| result.function_result.text_body().map(str::to_string))
                    .unwrap_or_default();
                let bytes = text.into_bytes();
                let (head, tail) = bytes.split_at(bytes.len() / 2);
                Ok(vec![
                    CompletionEvent::Chunk(head.to_vec()),
                    CompletionEvent::Other,
                    CompletionEvent::Chunk(tail.to_vec()),
                ])
            }
            Some(Step::Fail(message)) => Err(AppError::AgentRuntime(message)),
            None => Err(AppError::AgentRuntime("script exhausted".to_string())),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// `getWeather` invocation with positional parameters.
pub fn weather_invocation(invocation_id: &str, city: &str, date: &str) -> InvocationEnvelope {
    InvocationEnvelope::single_function(
        invocation_id,
        "ag_weather_get",
        "getWeather",
        vec![
            FunctionParameter::new("0", city),
            FunctionParameter::new("1", date),
        ],
    )
}
