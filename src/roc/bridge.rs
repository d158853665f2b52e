//! Invocation bridge
//!
//! Translates a returnControl payload into a weather call and wraps the
//! report as session state for resuming the agent.

use crate::roc::client::WeatherEndpointClient;
use crate::roc::envelope::{
    FunctionResult, InvocationEnvelope, InvocationResult, ResumeEnvelope, SessionState,
};
use crate::types::{AppError, Result, DEFAULT_DATE};
use crate::weather::WeatherReport;
use std::collections::HashMap;

/// Action group reported back to the agent runtime.
pub const ACTION_GROUP: &str = "ag_weather_get";
/// Function reported back to the agent runtime.
pub const FUNCTION: &str = "getWeather";
/// City used when the invocation carries no parameter "0".
pub const UNKNOWN_CITY: &str = "Unknown";

/// Translates agent invocations into weather endpoint calls and weather
/// reports back into session continuations.
///
/// Only the first invocation input is honoured. Parameters are read by
/// position: "0" is the city and "1" the date.
#[derive(Clone)]
pub struct InvocationBridge {
    weather: WeatherEndpointClient,
}

impl InvocationBridge {
    pub fn new(weather: WeatherEndpointClient) -> Self {
        Self { weather }
    }

    /// Extract `(city, date)` from the first invocation input.
    pub fn translate_inbound(envelope: &InvocationEnvelope) -> Result<(String, String)> {
        let first = envelope
            .invocation_inputs
            .first()
            .ok_or(AppError::EmptyInvocation)?;

        let parameters: HashMap<&str, &str> = first
            .function_invocation_input
            .iter()
            .flat_map(|input| input.parameters.iter())
            .map(|p| (p.name.as_str(), p.value.as_str()))
            .collect();

        let city = parameters.get("0").copied().unwrap_or(UNKNOWN_CITY);
        let date = parameters.get("1").copied().unwrap_or(DEFAULT_DATE);

        Ok((city.to_string(), date.to_string()))
    }

    /// Wrap a weather report in the continuation the runtime resumes with.
    pub fn translate_outbound(invocation_id: &str, report: &WeatherReport) -> ResumeEnvelope {
        let body = format!(
            "{} in {} is expected to be {}, temperature: {}",
            report.date, report.city, report.weather, report.temperature
        );

        ResumeEnvelope {
            session_state: SessionState {
                invocation_id: invocation_id.to_string(),
                return_control_invocation_results: vec![InvocationResult {
                    function_result: FunctionResult::text(ACTION_GROUP, FUNCTION, body),
                }],
            },
        }
    }

    /// Run a full invocation: translate, call the weather endpoint, translate back.
    pub async fn handle(&self, envelope: &InvocationEnvelope) -> Result<ResumeEnvelope> {
        let (city, date) = Self::translate_inbound(envelope)?;
        tracing::info!(
            "Invocation requests weather for city={:?} date={:?}",
            city,
            date
        );

        let report = self.weather.get_weather(&city, &date).await?;
        let invocation_id = envelope.invocation_id.as_deref().unwrap_or_default();

        Ok(Self::translate_outbound(invocation_id, &report))
    }
}
