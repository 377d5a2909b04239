//! ViewPort - the rendering capability the controller draws through
//!
//! The production adapter (`ui::state::SignalView`) writes Dioxus signals that
//! the screen components render. Tests use `infrastructure::testing::RecordingView`.
//! Keeping this interface small lets every handler run headless.

use std::time::Duration;

use literaplay_shared::ChatOption;

/// Top-level screens. Exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Api,
    Menu,
    Situation,
    Chat,
}

impl Screen {
    pub const ALL: [Screen; 4] = [Screen::Api, Screen::Menu, Screen::Situation, Screen::Chat];

    /// Name used by `show_screen` callers
    pub fn name(self) -> &'static str {
        match self {
            Screen::Api => "api",
            Screen::Menu => "menu",
            Screen::Situation => "situation",
            Screen::Chat => "chat",
        }
    }

    /// Resolve a screen name; unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|screen| screen.name() == name)
    }
}

/// Who a bubble belongs to; selects styling and whether the sender is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleRole {
    User,
    Character,
    System,
    /// Chapter separator, rendered as a system bubble
    Chapter,
}

impl BubbleRole {
    /// CSS modifier class for the bubble wrapper
    pub fn css_class(self) -> &'static str {
        match self {
            BubbleRole::User => "user",
            BubbleRole::Character => "ai",
            BubbleRole::System => "system",
            BubbleRole::Chapter => "system chapter",
        }
    }

    pub fn shows_sender(self) -> bool {
        matches!(self, BubbleRole::User | BubbleRole::Character)
    }
}

/// One rendered chat bubble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bubble {
    pub role: BubbleRole,
    pub sender: String,
    pub text: String,
}

/// What a library card's button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    /// Open the situation picker for this work
    ChooseSituation,
    /// Start a chat directly (work without situations)
    StartChat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryCard {
    pub work_key: String,
    pub title: String,
    /// Secondary line under the title
    pub info: String,
    /// CSS color token from the backend, or a CSS variable fallback
    pub color: String,
    pub action: CardAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SituationCard {
    pub work_key: String,
    pub situation_key: String,
    pub title: String,
    /// Who is present in the scene
    pub characters: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatHeader {
    pub title: String,
    pub subtitle: Option<String>,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Info,
    Error,
}

/// Inline status line under the API key input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiStatus {
    pub text: String,
    pub tone: StatusTone,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    pub chapter_label: String,
    /// Progress bar width in percent
    pub width_pct: f64,
}

/// Rendering capability used by `ViewController`.
pub trait ViewPort {
    /// Hide every screen, then show `screen`
    fn show_screen(&mut self, screen: Screen);

    /// Disable the verify button and relabel it while a key is being checked
    fn set_verify_pending(&mut self, pending: bool);

    fn set_api_status(&mut self, status: Option<ApiStatus>);

    /// Show or hide the "save this key?" confirmation prompt
    fn set_confirm_dialog_visible(&mut self, visible: bool);

    /// Replace the library card list
    fn render_library(&mut self, cards: Vec<LibraryCard>);

    /// Replace the situation picker content
    fn render_situations(&mut self, work_title: &str, cards: Vec<SituationCard>);

    fn set_chat_header(&mut self, header: ChatHeader);

    /// Empty the chat history and the option list
    fn clear_chat(&mut self);

    fn append_bubble(&mut self, bubble: Bubble);

    /// Replace the option button list
    fn render_options(&mut self, options: Vec<ChatOption>);

    fn clear_options(&mut self);

    /// Toggle the typing indicator and input disablement; focuses the input when done
    fn set_loading(&mut self, loading: bool);

    /// Show or hide the text input row
    fn set_chat_input_visible(&mut self, visible: bool);

    /// Show or hide the "return to menu" controls shown after the story ends
    fn set_end_controls_visible(&mut self, visible: bool);

    /// `None` hides the progress block
    fn set_progress(&mut self, progress: Option<ProgressView>);

    fn clear_chat_input(&mut self);

    /// Scroll the chat history to its end once `delay` has passed
    fn scroll_history_to_bottom(&mut self, delay: Duration);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_names_resolve() {
        for screen in Screen::ALL {
            assert_eq!(Screen::from_name(screen.name()), Some(screen));
        }
        assert_eq!(Screen::from_name("settings"), None);
        assert_eq!(Screen::from_name("Chat"), None);
    }

    #[test]
    fn test_only_speaking_roles_show_sender() {
        assert!(BubbleRole::User.shows_sender());
        assert!(BubbleRole::Character.shows_sender());
        assert!(!BubbleRole::System.shows_sender());
        assert!(!BubbleRole::Chapter.shows_sender());
    }
}
