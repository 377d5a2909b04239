//! Outbound calls (Player → Backend)
//!
//! Every call is fire-and-forget: the backend answers, if at all, by emitting
//! one or more `BackendEvent`s later. There is no request id on the wire.

use serde::{Deserialize, Serialize};

/// Operations the view can invoke on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackendCall {
    /// Ask the backend to push whatever startup state it has (usually the library)
    RequestInitialState,
    /// Validate an API key; answered by `api-key-validated`
    VerifyApiKey { key: String },
    /// Persist (or only keep in memory) a validated key; answered by `library-loaded`
    SaveApiKeyDecision { key: String, accepted: bool },
    /// Start a chat for a work, optionally a specific situation within it
    StartChatSession {
        work_key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        situation_key: Option<String>,
    },
    /// Send the user's turn (typed text or a chosen option, verbatim)
    SendUserMessage { text: String },
}

impl BackendCall {
    /// Backend method name for this call.
    pub fn method(&self) -> &'static str {
        match self {
            BackendCall::RequestInitialState => "request_initial_state",
            BackendCall::VerifyApiKey { .. } => "verify_api_key",
            BackendCall::SaveApiKeyDecision { .. } => "save_api_key_decision",
            BackendCall::StartChatSession { .. } => "start_chat_session",
            BackendCall::SendUserMessage { .. } => "send_user_message",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_calls_serialize_with_method_tag() {
        let call = BackendCall::SaveApiKeyDecision {
            key: "abc".into(),
            accepted: true,
        };
        let value = serde_json::to_value(&call).unwrap();
        assert_eq!(
            value,
            json!({"type": "save_api_key_decision", "key": "abc", "accepted": true})
        );
        assert_eq!(value["type"], call.method());

        let unit = serde_json::to_value(BackendCall::RequestInitialState).unwrap();
        assert_eq!(unit, json!({"type": "request_initial_state"}));
    }

    #[test]
    fn test_start_chat_omits_missing_situation() {
        let legacy = BackendCall::StartChatSession {
            work_key: "pod_igoto".into(),
            situation_key: None,
        };
        let value = serde_json::to_value(&legacy).unwrap();
        assert_eq!(
            value,
            json!({"type": "start_chat_session", "work_key": "pod_igoto"})
        );

        let parsed: BackendCall = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, legacy);
    }
}
