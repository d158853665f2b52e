//! HTTP clients for the downstream peers of each hop.
//!
//! - [`WeatherEndpointClient`] is used by the bridge to call `POST /mcp/get_weather`
//! - [`BridgeClient`] is used by the orchestrator to call `POST /roc/invocation`
//!
//! Neither client retries. Transport failures and non-success statuses become
//! [`AppError::UpstreamUnavailable`].

use crate::roc::envelope::{InvocationEnvelope, ResumeEnvelope};
use crate::types::{AppError, Result, WeatherRequest};
use crate::weather::WeatherReport;
use serde_json::Value;

/// Path of the weather endpoint.
pub const WEATHER_PATH: &str = "/mcp/get_weather";
/// Path of the invocation bridge endpoint.
pub const INVOCATION_PATH: &str = "/roc/invocation";

fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Extract the message from a `{error}` or `{detail}` body, falling back to
/// the raw text.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => value
            .get("error")
            .or_else(|| value.get("detail"))
            .map(|v| match v.as_str() {
                Some(s) => s.to_string(),
                None => v.to_string(),
            })
            .unwrap_or_else(|| body.to_string()),
        Err(_) => body.to_string(),
    }
}

/// Client for the weather endpoint
#[derive(Clone)]
pub struct WeatherEndpointClient {
    client: reqwest::Client,
    base_url: String,
}

impl WeatherEndpointClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Request the weather report for `(city, date)`
    pub async fn get_weather(&self, city: &str, date: &str) -> Result<WeatherReport> {
        let url = join_url(&self.base_url, WEATHER_PATH);
        tracing::debug!("POST {} city={:?} date={:?}", url, city, date);

        let response = self
            .client
            .post(&url)
            .json(&WeatherRequest::new(city, date))
            .send()
            .await
            .map_err(|e| {
                AppError::UpstreamUnavailable(format!("Weather endpoint unreachable: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamUnavailable(format!(
                "Weather endpoint returned {}: {}",
                status,
                error_message(&body)
            )));
        }

        response
            .json::<WeatherReport>()
            .await
            .map_err(|e| AppError::Internal(format!("Invalid weather report: {}", e)))
    }
}

/// What the bridge sent back for a forwarded invocation
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeReply {
    /// Session continuation for the agent runtime
    Resume(ResumeEnvelope),
    /// The bridge had nothing to do (e.g. no invocation inputs)
    NothingToResume(String),
}

/// Client for the invocation bridge
#[derive(Clone)]
pub struct BridgeClient {
    client: reqwest::Client,
    base_url: String,
}

impl BridgeClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Forward a `returnControl` payload to the bridge
    ///
    /// A server-error reply is surfaced with the bridge's own error text.
    pub async fn forward(&self, envelope: &InvocationEnvelope) -> Result<BridgeReply> {
        let url = join_url(&self.base_url, INVOCATION_PATH);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(envelope)
            .send()
            .await
            .map_err(|e| {
                AppError::UpstreamUnavailable(format!("Invocation bridge unreachable: {}", e))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(e.to_string()))?;

        if !status.is_success() {
            return Err(AppError::UpstreamUnavailable(error_message(&body)));
        }

        let value: Value = serde_json::from_str(&body)?;
        if value.get("sessionState").is_some() {
            return Ok(BridgeReply::Resume(serde_json::from_value(value)?));
        }

        match value.get("error").and_then(Value::as_str) {
            Some(message) => Ok(BridgeReply::NothingToResume(message.to_string())),
            None => Err(AppError::Internal(format!(
                "Unexpected invocation bridge reply: {}",
                body
            ))),
        }
    }
}
