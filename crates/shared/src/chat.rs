//! Chat payloads: messages and options

use serde::{Deserialize, Serialize};

use crate::error::PayloadError;

/// Marker the backend prefixes to the option that follows the original story.
pub const CANONICAL_MARKER: &str = "[Канонично]";

/// A single chat message pushed by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub is_user: bool,
    #[serde(default)]
    pub is_system: bool,
}

impl ChatMessage {
    /// Decode the `chat-message` payload.
    pub fn decode(json: &str) -> Result<Self, PayloadError> {
        serde_json::from_str(json).map_err(|e| PayloadError::new("chat-message", e))
    }
}

/// A reply option offered to the user.
///
/// `raw` is what goes back to the backend, untouched. `display` is what the
/// user sees: the raw string with the canonical marker removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatOption {
    pub raw: String,
    pub display: String,
    pub canonical: bool,
}

impl ChatOption {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let canonical = raw.contains(CANONICAL_MARKER);
        let display = if canonical {
            raw.replace(CANONICAL_MARKER, "").trim().to_string()
        } else {
            raw.clone()
        };
        Self {
            raw,
            display,
            canonical,
        }
    }
}

/// Decode the `chat-options-updated` payload.
pub fn decode_chat_options(json: &str) -> Result<Vec<ChatOption>, PayloadError> {
    let raw: Vec<String> =
        serde_json::from_str(json).map_err(|e| PayloadError::new("chat-options-updated", e))?;
    Ok(raw.into_iter().map(ChatOption::parse).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_marker_is_stripped_for_display_only() {
        let option = ChatOption::parse("[Канонично] Отвори вратата");
        assert!(option.canonical);
        assert_eq!(option.display, "Отвори вратата");
        assert_eq!(option.raw, "[Канонично] Отвори вратата");
    }

    #[test]
    fn test_plain_option_is_unchanged() {
        let option = ChatOption::parse("  (Мълчи)  ");
        assert!(!option.canonical);
        assert_eq!(option.display, "  (Мълчи)  ");
        assert_eq!(option.raw, option.display);
    }

    #[test]
    fn test_decode_options_list() {
        let options =
            decode_chat_options(r#"["Бягай", "[Канонично] (Притаи се зад чувалите)"]"#).unwrap();
        assert_eq!(options.len(), 2);
        assert!(!options[0].canonical);
        assert_eq!(options[1].display, "(Притаи се зад чувалите)");
    }

    #[test]
    fn test_decode_message_with_missing_flags() {
        let message = ChatMessage::decode(r#"{"sender": "Ирина", "text": "Ела."}"#).unwrap();
        assert_eq!(message.sender, "Ирина");
        assert!(!message.is_user);
        assert!(!message.is_system);

        let user = ChatMessage::decode(r#"{"sender":"Ти","text":"Да","isUser":true}"#).unwrap();
        assert!(user.is_user);
    }

    #[test]
    fn test_malformed_payloads_name_their_event() {
        assert_eq!(
            ChatMessage::decode("{oops").unwrap_err().event,
            "chat-message"
        );
        assert_eq!(
            decode_chat_options("[1, 2]").unwrap_err().event,
            "chat-options-updated"
        );
    }
}
