//! Element ids shared by the markup, the stylesheet and DOM scripts

use crate::ports::outbound::Screen;

pub const API_SCREEN: &str = "api-screen";
pub const MENU_SCREEN: &str = "menu-screen";
pub const SITUATION_SCREEN: &str = "situation-screen";
pub const CHAT_SCREEN: &str = "chat-screen";

pub const API_KEY_INPUT: &str = "api-key-input";
pub const BTN_VERIFY: &str = "btn-verify";
pub const API_STATUS: &str = "api-status";
pub const DIALOG_OVERLAY: &str = "dialog-overlay";
pub const BTN_DIALOG_YES: &str = "btn-dialog-yes";
pub const BTN_DIALOG_NO: &str = "btn-dialog-no";

pub const LIBRARY_CARDS_CONTAINER: &str = "library-cards-container";

pub const SITUATION_TITLE: &str = "situation-title";
pub const SITUATION_CARDS_CONTAINER: &str = "situation-cards-container";
pub const BTN_SITUATION_BACK: &str = "btn-situation-back";

pub const CHAT_TITLE: &str = "chat-title";
pub const CHAT_SUBTITLE: &str = "chat-subtitle";
pub const BTN_BACK: &str = "btn-back";
pub const CHAT_HISTORY: &str = "chat-history";
pub const CHAT_OPTIONS: &str = "chat-options";
pub const TYPING_INDICATOR: &str = "typing-indicator";
pub const CHAT_INPUT: &str = "chat-input";
pub const BTN_SEND: &str = "btn-send";
pub const CHAT_INPUT_AREA: &str = "chat-input-area";
pub const CHAT_END_AREA: &str = "chat-end-area";
pub const BTN_END_MENU: &str = "btn-end-menu";
pub const STORY_PROGRESS: &str = "story-progress";
pub const CHAPTER_LABEL: &str = "chapter-label";
pub const PROGRESS_BAR_FILL: &str = "progress-bar-fill";

/// Container id of a screen
pub fn screen_id(screen: Screen) -> &'static str {
    match screen {
        Screen::Api => API_SCREEN,
        Screen::Menu => MENU_SCREEN,
        Screen::Situation => SITUATION_SCREEN,
        Screen::Chat => CHAT_SCREEN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_ids_follow_screen_names() {
        for screen in Screen::ALL {
            assert_eq!(screen_id(screen), format!("{}-screen", screen.name()));
        }
    }
}
