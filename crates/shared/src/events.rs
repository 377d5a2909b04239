//! Inbound events (Backend → Player)
//!
//! Structured payloads (library, message, options, progress) are carried as
//! JSON-encoded strings and decoded by the receiver. This keeps the frame
//! format flat and lets the view drop a single malformed update without
//! losing the whole frame.
//!
//! ## Versioning Policy
//!
//! - New variants can be added at the end (forward compatible)
//! - Renaming variants is a breaking change
//! - Unknown event types deserialize to `Unknown` and are ignored by the view

use serde::{Deserialize, Serialize};

/// Names of every event the view handles, in table order.
pub const EVENT_NAMES: [&str; 11] = [
    "connection-ready",
    "api-key-validated",
    "library-loaded",
    "chat-message",
    "chat-options-updated",
    "chat-started",
    "chat-ended",
    "loading-state-changed",
    "chat-error",
    "story-progress-updated",
    "chapter-transition",
];

/// Events pushed by the backend (plus `ConnectionReady`, raised by the bridge itself).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BackendEvent {
    /// The bridge is connected and calls can be made
    ConnectionReady,
    /// Result of `verify_api_key` (or a failure while saving the key)
    ApiKeyValidated { is_valid: bool, message: String },
    /// Serialized `Library` snapshot
    LibraryLoaded { library: String },
    /// Serialized `ChatMessage`
    ChatMessage { message: String },
    /// Serialized list of option strings
    ChatOptionsUpdated { options: String },
    /// A chat session started
    ChatStarted { intro: String, first_message: String },
    /// The story reached its ending
    ChatEnded { final_text: String },
    /// The backend started or finished working on a reply
    LoadingStateChanged { is_loading: bool },
    /// Backend-side failure for the current session
    ChatError { message: String },
    /// Serialized `StoryProgress`
    StoryProgressUpdated { progress: String },
    /// A new chapter begins
    ChapterTransition { title: String },
    /// Any event type this build does not know
    #[serde(other)]
    Unknown,
}

impl BackendEvent {
    /// Wire name of this event.
    pub fn name(&self) -> &'static str {
        match self {
            BackendEvent::ConnectionReady => EVENT_NAMES[0],
            BackendEvent::ApiKeyValidated { .. } => EVENT_NAMES[1],
            BackendEvent::LibraryLoaded { .. } => EVENT_NAMES[2],
            BackendEvent::ChatMessage { .. } => EVENT_NAMES[3],
            BackendEvent::ChatOptionsUpdated { .. } => EVENT_NAMES[4],
            BackendEvent::ChatStarted { .. } => EVENT_NAMES[5],
            BackendEvent::ChatEnded { .. } => EVENT_NAMES[6],
            BackendEvent::LoadingStateChanged { .. } => EVENT_NAMES[7],
            BackendEvent::ChatError { .. } => EVENT_NAMES[8],
            BackendEvent::StoryProgressUpdated { .. } => EVENT_NAMES[9],
            BackendEvent::ChapterTransition { .. } => EVENT_NAMES[10],
            BackendEvent::Unknown => "unknown",
        }
    }

    /// Parse one text frame received from the bridge.
    pub fn from_frame(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_name_matches_wire_tag() {
        let events = vec![
            BackendEvent::ConnectionReady,
            BackendEvent::ApiKeyValidated {
                is_valid: true,
                message: String::new(),
            },
            BackendEvent::LibraryLoaded {
                library: "{}".into(),
            },
            BackendEvent::ChatMessage {
                message: "{}".into(),
            },
            BackendEvent::ChatOptionsUpdated {
                options: "[]".into(),
            },
            BackendEvent::ChatStarted {
                intro: "i".into(),
                first_message: "f".into(),
            },
            BackendEvent::ChatEnded {
                final_text: "end".into(),
            },
            BackendEvent::LoadingStateChanged { is_loading: true },
            BackendEvent::ChatError {
                message: "oops".into(),
            },
            BackendEvent::StoryProgressUpdated {
                progress: "{}".into(),
            },
            BackendEvent::ChapterTransition {
                title: "II".into(),
            },
        ];

        assert_eq!(events.len(), EVENT_NAMES.len());
        for (event, expected) in events.iter().zip(EVENT_NAMES) {
            let value = serde_json::to_value(event).unwrap();
            assert_eq!(value["type"], expected);
            assert_eq!(event.name(), expected);
        }
    }

    #[test]
    fn test_frame_with_named_args() {
        let frame = r#"{"type":"api-key-validated","is_valid":false,"message":"Невалиден ключ"}"#;
        let event = BackendEvent::from_frame(frame).unwrap();
        assert_eq!(
            event,
            BackendEvent::ApiKeyValidated {
                is_valid: false,
                message: "Невалиден ключ".into(),
            }
        );
    }

    #[test]
    fn test_unknown_event_type_is_tolerated() {
        let value = json!({"type": "avatar-changed", "name": "Ирина"});
        let event: BackendEvent = serde_json::from_value(value).unwrap();
        assert_eq!(event, BackendEvent::Unknown);
    }

    #[test]
    fn test_frame_that_is_not_json_is_an_error() {
        assert!(BackendEvent::from_frame("not json").is_err());
    }
}
