//! Session-scoped view state
//!
//! Everything the view remembers between events lives here: the library
//! snapshot and the identity of the chat in progress. Owned by the controller,
//! written only from the UI task.

use literaplay_shared::Library;

/// Chat accent color when neither the situation nor the work has one
pub const DEFAULT_ACCENT_COLOR: &str = "#3B82F6";

/// Label for the user's own bubbles when the situation names no role
pub const DEFAULT_USER_LABEL: &str = "Ти";

#[derive(Debug, Clone)]
pub struct SessionState {
    library: Library,
    /// Set by the first `library-loaded`; later loads are refreshes
    library_seen: bool,
    character_name: String,
    user_character: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            library: Library::default(),
            library_seen: false,
            character_name: String::new(),
            user_character: None,
        }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Replace the cached library snapshot.
    ///
    /// Returns `true` only for the first snapshot of the app's lifetime.
    pub fn set_library(&mut self, library: Library) -> bool {
        self.library = library;
        !std::mem::replace(&mut self.library_seen, true)
    }

    /// Overwrite the chat identity for a new session
    pub fn begin_chat(&mut self, character_name: String, user_character: Option<String>) {
        self.character_name = character_name;
        self.user_character = user_character.filter(|label| !label.trim().is_empty());
    }

    pub fn character_name(&self) -> &str {
        &self.character_name
    }

    /// Sender label for the user's bubbles
    pub fn user_label(&self) -> &str {
        self.user_character.as_deref().unwrap_or(DEFAULT_USER_LABEL)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let session = SessionState::new();
        assert_eq!(session.user_label(), DEFAULT_USER_LABEL);
        assert!(session.library().is_empty());
    }

    #[test]
    fn test_begin_chat_overwrites_previous_session() {
        let mut session = SessionState::new();
        session.begin_chat("Ирина".into(), Some("Борис Морев".into()));
        assert_eq!(session.user_label(), "Борис Морев");

        session.begin_chat("Бай Марко".into(), None);
        assert_eq!(session.character_name(), "Бай Марко");
        assert_eq!(session.user_label(), DEFAULT_USER_LABEL);
    }

    #[test]
    fn test_blank_user_character_falls_back_to_default_label() {
        let mut session = SessionState::new();
        session.begin_chat("Ирина".into(), Some("  ".into()));
        assert_eq!(session.user_label(), DEFAULT_USER_LABEL);
    }

    #[test]
    fn test_only_the_first_library_counts_as_first() {
        let mut session = SessionState::new();
        assert!(session.set_library(Library::default()));
        assert!(!session.set_library(Library::default()));
        assert!(!session.set_library(Library::default()));
    }
}
