//! API request handlers.
//!
//! One module per service endpoint.

/// Agent-backed query handler.
pub mod frontend;
/// Return-of-control invocation handler.
pub mod roc;
/// Weather report handler.
pub mod weather;
