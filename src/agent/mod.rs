//! Agent Runtime Integration
//!
//! The agent runtime is an external reasoning service reached through a
//! single operation, `invokeAgent`, which returns a sequence of completion
//! events. An event either carries a chunk of the answer or asks the caller to
//! run a function (`returnControl`) before the session can continue.
//!
//! # Module Structure
//!
//! - [`orchestrator`](crate::agent::orchestrator) - Drives invoke → bridge → resume for one query
//! - `bedrock` - Amazon Bedrock Agents adapter (feature `bedrock`)
//!
//! # Runtimes
//!
//! | Runtime | Feature | Notes |
//! |---------|---------|-------|
//! | Bedrock | `bedrock` | Credentials and region from the AWS default chain |

/// Multi-step query orchestration.
pub mod orchestrator;

/// Amazon Bedrock Agents runtime.
#[cfg(feature = "bedrock")]
pub mod bedrock;

pub use orchestrator::{AgentOrchestrator, OrchestratorState, QueryOutcome};

use crate::roc::envelope::{InvocationEnvelope, SessionState};
use crate::types::Result;
use crate::utils::toml_config::{AgentConfig, RuntimeKind};
use async_trait::async_trait;
use std::sync::Arc;

/// One `invokeAgent` call.
#[derive(Debug, Clone, PartialEq)]
pub struct InvokeAgentRequest {
    pub agent_id: String,
    pub agent_alias_id: String,
    pub session_id: String,
    /// User text; absent when resuming a session with function results
    pub input_text: Option<String>,
    pub session_state: Option<SessionState>,
    pub end_session: bool,
}

/// Event in the completion sequence returned by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionEvent {
    /// The runtime delegates a function call to the caller
    ReturnControl(InvocationEnvelope),
    /// Part of the final answer
    Chunk(Vec<u8>),
    /// Trace or other events the orchestrator does not act on
    Other,
}

/// Agent runtime abstraction
///
/// Implementations perform the remote call and collect the full completion
/// sequence before returning it.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Invoke the agent and return its completion events in order
    async fn invoke_agent(&self, request: InvokeAgentRequest) -> Result<Vec<CompletionEvent>>;

    /// Human-readable runtime name
    fn name(&self) -> &str;
}

/// Create the runtime selected in configuration
///
/// # Errors
///
/// Returns a configuration error if support for the runtime was not compiled in.
pub async fn create_runtime(config: &AgentConfig) -> Result<Arc<dyn AgentRuntime>> {
    match config.runtime {
        #[cfg(feature = "bedrock")]
        RuntimeKind::Bedrock => Ok(Arc::new(
            bedrock::BedrockAgentRuntime::new(&config.region).await,
        )),

        #[cfg(not(feature = "bedrock"))]
        RuntimeKind::Bedrock => Err(crate::types::AppError::Configuration(format!(
            "Bedrock agent runtime support is not compiled in (region '{}'). \
             Rebuild with `--features bedrock`.",
            config.region
        ))),
    }
}
