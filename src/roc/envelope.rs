//! Wire types exchanged with the agent runtime.
//!
//! Field names follow the runtime's camelCase JSON. Inbound types are lenient
//! about missing collections so that a sparse `returnControl` payload still
//! deserializes; parameters themselves must carry both `name` and `value`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Content-type key of a plain text function result.
pub const TEXT_CONTENT: &str = "TEXT";

// ============= Inbound: returnControl payload =============

/// "Please call this function" request emitted by the agent runtime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvocationEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invocation_id: Option<String>,
    #[serde(default)]
    pub invocation_inputs: Vec<InvocationInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvocationInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_invocation_input: Option<FunctionInvocationInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FunctionInvocationInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default)]
    pub parameters: Vec<FunctionParameter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FunctionParameter {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    pub value: String,
}

impl FunctionParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: Some("string".to_string()),
            value: value.into(),
        }
    }
}

impl InvocationEnvelope {
    /// Envelope with a single function invocation carrying `parameters`.
    pub fn single_function(
        invocation_id: impl Into<String>,
        action_group: impl Into<String>,
        function: impl Into<String>,
        parameters: Vec<FunctionParameter>,
    ) -> Self {
        Self {
            invocation_id: Some(invocation_id.into()),
            invocation_inputs: vec![InvocationInput {
                function_invocation_input: Some(FunctionInvocationInput {
                    action_group: Some(action_group.into()),
                    function: Some(function.into()),
                    parameters,
                }),
            }],
        }
    }
}

// ============= Outbound: resumed session state =============

/// Session continuation sent back to the agent runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumeEnvelope {
    pub session_state: SessionState,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(default)]
    pub invocation_id: String,
    #[serde(default)]
    pub return_control_invocation_results: Vec<InvocationResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResult {
    pub function_result: FunctionResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResult {
    pub action_group: String,
    pub function: String,
    /// Result bodies keyed by content type (only `TEXT` is produced)
    pub response_body: BTreeMap<String, ContentBody>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContentBody {
    pub body: String,
}

impl FunctionResult {
    /// Function result with a single text body.
    pub fn text(
        action_group: impl Into<String>,
        function: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let mut response_body = BTreeMap::new();
        response_body.insert(TEXT_CONTENT.to_string(), ContentBody { body: body.into() });
        Self {
            action_group: action_group.into(),
            function: function.into(),
            response_body,
        }
    }

    pub fn text_body(&self) -> Option<&str> {
        self.response_body
            .get(TEXT_CONTENT)
            .map(|content| content.body.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_runtime_payload() {
        let payload = json!({
            "invocationId": "inv-1",
            "invocationInputs": [{
                "functionInvocationInput": {
                    "actionGroup": "ag_weather_get",
                    "function": "getWeather",
                    "parameters": [
                        {"name": "0", "type": "string", "value": "Taipei"},
                        {"name": "1", "type": "string", "value": "tomorrow"}
                    ]
                }
            }]
        });

        let envelope: InvocationEnvelope = serde_json::from_value(payload).unwrap();
        assert_eq!(envelope.invocation_id.as_deref(), Some("inv-1"));
        let input = envelope.invocation_inputs[0]
            .function_invocation_input
            .as_ref()
            .unwrap();
        assert_eq!(input.function.as_deref(), Some("getWeather"));
        assert_eq!(input.parameters[1], FunctionParameter::new("1", "tomorrow"));
    }

    #[test]
    fn test_parse_sparse_payload() {
        let envelope: InvocationEnvelope = serde_json::from_value(json!({})).unwrap();
        assert!(envelope.invocation_id.is_none());
        assert!(envelope.invocation_inputs.is_empty());

        let envelope: InvocationEnvelope =
            serde_json::from_value(json!({"invocationInputs": [{"apiInvocationInput": {}}]}))
                .unwrap();
        assert!(envelope.invocation_inputs[0].function_invocation_input.is_none());
    }

    #[test]
    fn test_parameter_requires_name_and_value() {
        let result: std::result::Result<FunctionParameter, _> =
            serde_json::from_value(json!({"name": "0"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_resume_envelope_wire_shape() {
        let resume = ResumeEnvelope {
            session_state: SessionState {
                invocation_id: "abc".to_string(),
                return_control_invocation_results: vec![InvocationResult {
                    function_result: FunctionResult::text("ag", "fn", "hello"),
                }],
            },
        };

        let value = serde_json::to_value(&resume).unwrap();
        assert_eq!(
            value,
            json!({
                "sessionState": {
                    "invocationId": "abc",
                    "returnControlInvocationResults": [{
                        "functionResult": {
                            "actionGroup": "ag",
                            "function": "fn",
                            "responseBody": {"TEXT": {"body": "hello"}}
                        }
                    }]
                }
            })
        );
    }
}
