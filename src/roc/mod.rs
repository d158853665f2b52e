//! Return-of-Control Invocation Bridge
//!
//! When the agent runtime needs external data it pauses its session and emits
//! a `returnControl` event. This module translates that event into a weather
//! endpoint call and builds the session state the runtime resumes with.
//!
//! # Module Structure
//!
//! - [`envelope`](crate::roc::envelope) - Inbound invocation and outbound resume wire types
//! - [`bridge`](crate::roc::bridge) - Bidirectional translation and the full bridge hop
//! - [`client`](crate::roc::client) - HTTP clients for the weather endpoint and the bridge
//!
//! # Translation
//!
//! ```text
//! invocationInputs[0].functionInvocationInput.parameters
//!     {"0": city, "1": date}  ──▶  POST /mcp/get_weather
//!
//! WeatherReport  ──▶  sessionState.returnControlInvocationResults[0]
//!     "{date} in {city} is expected to be {weather}, temperature: {temperature}"
//! ```

/// Bidirectional envelope translation.
pub mod bridge;
/// HTTP clients for downstream peers.
pub mod client;
/// Wire types exchanged with the agent runtime.
pub mod envelope;

pub use bridge::InvocationBridge;
pub use client::{BridgeClient, BridgeReply, WeatherEndpointClient};
pub use envelope::{InvocationEnvelope, ResumeEnvelope, SessionState};
