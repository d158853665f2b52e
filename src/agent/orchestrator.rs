//! Query orchestration
//!
//! Runs one user query as invoke, bridge, resume against the agent runtime.

use crate::agent::{AgentRuntime, CompletionEvent, InvokeAgentRequest};
use crate::roc::client::{BridgeClient, BridgeReply};
use crate::roc::envelope::{InvocationEnvelope, SessionState};
use crate::types::{AppError, Result};
use std::sync::Arc;
use uuid::Uuid;

/// Position of a query in the invoke → bridge → resume exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrchestratorState {
    Idle,
    AwaitingAgentResponse,
    AwaitingBridgeResponse,
    AwaitingResumedAgentResponse,
    Done,
}

/// Terminal result of one query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// The resumed session produced this answer
    Answered(String),
    /// The agent finished without delegating a function call
    NoReturnControl,
    /// The bridge had nothing to run for the delegated call
    NothingToResume(String),
}

/// One query's session with the agent runtime.
///
/// Created fresh per query and dropped when the query finishes or fails; the
/// remote session is never resumed after a failure.
#[derive(Debug)]
pub struct Session {
    id: String,
    state: OrchestratorState,
}

impl Session {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            state: OrchestratorState::Idle,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> OrchestratorState {
        self.state
    }

    fn advance(&mut self, next: OrchestratorState) {
        tracing::debug!(session_id = %self.id, "{:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Drives a user query through the agent runtime and the invocation bridge.
pub struct AgentOrchestrator {
    runtime: Arc<dyn AgentRuntime>,
    bridge: BridgeClient,
    agent_id: String,
    agent_alias_id: String,
}

impl AgentOrchestrator {
    pub fn new(
        runtime: Arc<dyn AgentRuntime>,
        bridge: BridgeClient,
        agent_id: impl Into<String>,
        agent_alias_id: impl Into<String>,
    ) -> Self {
        Self {
            runtime,
            bridge,
            agent_id: agent_id.into(),
            agent_alias_id: agent_alias_id.into(),
        }
    }

    /// Answer a free-text query
    ///
    /// Steps run strictly in sequence; the first failure ends the query and
    /// is returned to the caller without retrying.
    pub async fn run(&self, query: &str) -> Result<QueryOutcome> {
        let mut session = Session::new();
        tracing::info!(session_id = %session.id(), "Received query: {}", query);

        match self.drive(&mut session, query).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                tracing::error!(
                    session_id = %session.id(),
                    state = ?session.state(),
                    "Query failed: {}",
                    e
                );
                Err(e)
            }
        }
    }

    async fn drive(&self, session: &mut Session, query: &str) -> Result<QueryOutcome> {
        session.advance(OrchestratorState::AwaitingAgentResponse);
        let events = self
            .runtime
            .invoke_agent(self.request(session, Some(query.to_string()), None))
            .await?;

        let Some(envelope) = first_return_control(events) else {
            session.advance(OrchestratorState::Done);
            tracing::info!(session_id = %session.id(), "No returnControl event received");
            return Ok(QueryOutcome::NoReturnControl);
        };

        session.advance(OrchestratorState::AwaitingBridgeResponse);
        let resume = match self.bridge.forward(&envelope).await? {
            BridgeReply::Resume(resume) => resume,
            BridgeReply::NothingToResume(message) => {
                session.advance(OrchestratorState::Done);
                tracing::warn!(
                    session_id = %session.id(),
                    "Bridge had nothing to resume: {}",
                    message
                );
                return Ok(QueryOutcome::NothingToResume(message));
            }
        };

        session.advance(OrchestratorState::AwaitingResumedAgentResponse);
        let events = self
            .runtime
            .invoke_agent(self.request(session, None, Some(resume.session_state)))
            .await?;

        let answer = collect_chunks(events)?;
        session.advance(OrchestratorState::Done);
        Ok(QueryOutcome::Answered(answer))
    }

    fn request(
        &self,
        session: &Session,
        input_text: Option<String>,
        session_state: Option<SessionState>,
    ) -> InvokeAgentRequest {
        InvokeAgentRequest {
            agent_id: self.agent_id.clone(),
            agent_alias_id: self.agent_alias_id.clone(),
            session_id: session.id().to_string(),
            input_text,
            session_state,
            end_session: false,
        }
    }
}

/// First `returnControl` payload in the sequence; later events are ignored.
fn first_return_control(events: Vec<CompletionEvent>) -> Option<InvocationEnvelope> {
    events.into_iter().find_map(|event| match event {
        CompletionEvent::ReturnControl(envelope) => Some(envelope),
        _ => None,
    })
}

/// Concatenate chunk payloads in order and decode them as UTF-8.
fn collect_chunks(events: Vec<CompletionEvent>) -> Result<String> {
    let bytes: Vec<u8> = events
        .into_iter()
        .filter_map(|event| match event {
            CompletionEvent::Chunk(bytes) => Some(bytes),
            _ => None,
        })
        .flatten()
        .collect();

    String::from_utf8(bytes)
        .map_err(|e| AppError::AgentRuntime(format!("Agent response is not valid UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roc::envelope::FunctionParameter;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct OnceRuntime {
        events: Vec<CompletionEvent>,
        requests: Mutex<Vec<InvokeAgentRequest>>,
    }

    #[async_trait]
    impl AgentRuntime for OnceRuntime {
        async fn invoke_agent(&self, request: InvokeAgentRequest) -> Result<Vec<CompletionEvent>> {
            self.requests.lock().unwrap().push(request);
            Ok(self.events.clone())
        }

        fn name(&self) -> &str {
            "once"
        }
    }

    fn weather_envelope(city: &str) -> InvocationEnvelope {
        InvocationEnvelope::single_function(
            "inv",
            "ag_weather_get",
            "getWeather",
            vec![FunctionParameter::new("0", city)],
        )
    }

    #[test]
    fn test_first_return_control_wins() {
        let events = vec![
            CompletionEvent::Other,
            CompletionEvent::Chunk(b"thinking".to_vec()),
            CompletionEvent::ReturnControl(weather_envelope("Taipei")),
            CompletionEvent::ReturnControl(weather_envelope("Grand Canyon")),
        ];
        assert_eq!(
            first_return_control(events),
            Some(weather_envelope("Taipei"))
        );
        assert_eq!(first_return_control(vec![CompletionEvent::Other]), None);
    }

    #[test]
    fn test_collect_chunks_in_order() {
        let events = vec![
            CompletionEvent::Chunk(b"Today in Taipei: ".to_vec()),
            CompletionEvent::Other,
            CompletionEvent::Chunk("Sunny, 26".as_bytes().to_vec()),
            // "°" split across two chunks
            CompletionEvent::Chunk(vec![0xC2]),
            CompletionEvent::Chunk(vec![0xB0, b'C']),
        ];
        assert_eq!(
            collect_chunks(events).unwrap(),
            "Today in Taipei: Sunny, 26°C"
        );
        assert_eq!(collect_chunks(vec![]).unwrap(), "");
    }

    #[test]
    fn test_collect_chunks_invalid_utf8() {
        let result = collect_chunks(vec![CompletionEvent::Chunk(vec![0xFF, 0xFE])]);
        assert!(matches!(result, Err(AppError::AgentRuntime(_))));
    }

    #[test]
    fn test_session_starts_idle_with_fresh_id() {
        let a = Session::new();
        let b = Session::new();
        assert_eq!(a.state(), OrchestratorState::Idle);
        assert_ne!(a.id(), b.id());
    }

    #[tokio::test]
    async fn test_no_return_control_skips_bridge() {
        let runtime = Arc::new(OnceRuntime {
            events: vec![CompletionEvent::Chunk(b"I can't help with that".to_vec())],
            requests: Mutex::new(Vec::new()),
        });
        // Nothing listens here; a bridge call would fail the query.
        let bridge = BridgeClient::new("http://127.0.0.1:9");
        let orchestrator = AgentOrchestrator::new(runtime.clone(), bridge, "agent", "alias");

        let outcome = orchestrator.run("Tell me a joke").await.unwrap();
        assert_eq!(outcome, QueryOutcome::NoReturnControl);

        let requests = runtime.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].agent_id, "agent");
        assert_eq!(requests[0].agent_alias_id, "alias");
        assert_eq!(requests[0].input_text.as_deref(), Some("Tell me a joke"));
        assert!(requests[0].session_state.is_none());
        assert!(!requests[0].end_session);
    }
}
