//! Shared helpers for the platform-specific bridge clients.
//!
//! Runtime-agnostic (no tokio, no web-sys).

use literaplay_shared::{BackendCall, BackendEvent};

// Reconnection constants (kept here so desktop + wasm stay in sync)
pub const INITIAL_RETRY_DELAY_MS: u64 = 1_000;
pub const MAX_RETRY_DELAY_MS: u64 = 30_000;
pub const MAX_RETRY_ATTEMPTS: u32 = 10;
pub const BACKOFF_MULTIPLIER: f64 = 2.0;

/// Decode one inbound text frame.
///
/// `connection-ready` is raised locally on connect; a backend that sends it
/// anyway gets it mapped to `Unknown` so it cannot trigger a second
/// initial-state request.
pub fn parse_backend_frame(text: &str) -> Result<BackendEvent, serde_json::Error> {
    Ok(match BackendEvent::from_frame(text)? {
        BackendEvent::ConnectionReady => BackendEvent::Unknown,
        event => event,
    })
}

/// Encode one outbound call as a text frame.
pub fn encode_call(call: &BackendCall) -> Result<String, serde_json::Error> {
    serde_json::to_string(call)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_with_string_payload() {
        let event = parse_backend_frame(
            r#"{"type":"chat-options-updated","options":"[\"Бягай\"]"}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            BackendEvent::ChatOptionsUpdated {
                options: "[\"Бягай\"]".into()
            }
        );
    }

    #[test]
    fn test_remote_connection_ready_is_ignored() {
        let event = parse_backend_frame(r#"{"type":"connection-ready"}"#).unwrap();
        assert_eq!(event, BackendEvent::Unknown);
    }

    #[test]
    fn test_garbage_frame_is_an_error() {
        assert!(parse_backend_frame("not a frame").is_err());
    }

    #[test]
    fn test_encode_call() {
        let frame = encode_call(&BackendCall::SendUserMessage {
            text: "Здравей".into(),
        })
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(value["type"], "send_user_message");
        assert_eq!(value["text"], "Здравей");
    }
}
