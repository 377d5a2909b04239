//! In-memory `ViewPort` for headless tests
//!
//! Mirrors the DOM state the controller drives: one hidden flag per screen,
//! the rendered lists, and counters for one-shot effects. `mutations` counts
//! every port call so tests can assert that nothing was touched.

use std::time::Duration;

use literaplay_shared::ChatOption;

use crate::ports::outbound::{
    ApiStatus, Bubble, ChatHeader, LibraryCard, ProgressView, Screen, SituationCard, ViewPort,
};
use crate::ui::markup::bubble_html;

#[derive(Debug)]
pub struct RecordingView {
    hidden: [bool; 4],
    pub verify_pending: bool,
    pub api_status: Option<ApiStatus>,
    pub confirm_dialog_visible: bool,
    pub library_cards: Vec<LibraryCard>,
    pub situation_title: String,
    pub situation_cards: Vec<SituationCard>,
    pub chat_header: ChatHeader,
    pub history: Vec<Bubble>,
    /// HTML of each bubble, as `MessageBubble` injects it
    pub history_html: Vec<String>,
    pub options: Vec<ChatOption>,
    pub loading: bool,
    pub chat_input_visible: bool,
    pub end_controls_visible: bool,
    pub progress: Option<ProgressView>,
    pub chat_input_cleared: usize,
    pub scrolls: Vec<Duration>,
    pub mutations: usize,
}

impl RecordingView {
    /// Initial page state: only the API screen is shown.
    pub fn new() -> Self {
        let mut hidden = [true; 4];
        hidden[screen_slot(Screen::Api)] = false;
        Self {
            hidden,
            verify_pending: false,
            api_status: None,
            confirm_dialog_visible: false,
            library_cards: Vec::new(),
            situation_title: String::new(),
            situation_cards: Vec::new(),
            chat_header: ChatHeader::default(),
            history: Vec::new(),
            history_html: Vec::new(),
            options: Vec::new(),
            loading: false,
            chat_input_visible: true,
            end_controls_visible: false,
            progress: None,
            chat_input_cleared: 0,
            scrolls: Vec::new(),
            mutations: 0,
        }
    }

    /// Screens without the hidden flag
    pub fn visible_screens(&self) -> Vec<Screen> {
        Screen::ALL
            .into_iter()
            .filter(|screen| !self.hidden[screen_slot(*screen)])
            .collect()
    }
}

impl Default for RecordingView {
    fn default() -> Self {
        Self::new()
    }
}

fn screen_slot(screen: Screen) -> usize {
    match screen {
        Screen::Api => 0,
        Screen::Menu => 1,
        Screen::Situation => 2,
        Screen::Chat => 3,
    }
}

impl ViewPort for RecordingView {
    fn show_screen(&mut self, screen: Screen) {
        self.mutations += 1;
        self.hidden = [true; 4];
        self.hidden[screen_slot(screen)] = false;
    }

    fn set_verify_pending(&mut self, pending: bool) {
        self.mutations += 1;
        self.verify_pending = pending;
    }

    fn set_api_status(&mut self, status: Option<ApiStatus>) {
        self.mutations += 1;
        self.api_status = status;
    }

    fn set_confirm_dialog_visible(&mut self, visible: bool) {
        self.mutations += 1;
        self.confirm_dialog_visible = visible;
    }

    fn render_library(&mut self, cards: Vec<LibraryCard>) {
        self.mutations += 1;
        self.library_cards = cards;
    }

    fn render_situations(&mut self, work_title: &str, cards: Vec<SituationCard>) {
        self.mutations += 1;
        self.situation_title = work_title.to_string();
        self.situation_cards = cards;
    }

    fn set_chat_header(&mut self, header: ChatHeader) {
        self.mutations += 1;
        self.chat_header = header;
    }

    fn clear_chat(&mut self) {
        self.mutations += 1;
        self.history.clear();
        self.history_html.clear();
        self.options.clear();
    }

    fn append_bubble(&mut self, bubble: Bubble) {
        self.mutations += 1;
        self.history_html.push(bubble_html(&bubble));
        self.history.push(bubble);
    }

    fn render_options(&mut self, options: Vec<ChatOption>) {
        self.mutations += 1;
        self.options = options;
    }

    fn clear_options(&mut self) {
        self.mutations += 1;
        self.options.clear();
    }

    fn set_loading(&mut self, loading: bool) {
        self.mutations += 1;
        self.loading = loading;
    }

    fn set_chat_input_visible(&mut self, visible: bool) {
        self.mutations += 1;
        self.chat_input_visible = visible;
    }

    fn set_end_controls_visible(&mut self, visible: bool) {
        self.mutations += 1;
        self.end_controls_visible = visible;
    }

    fn set_progress(&mut self, progress: Option<ProgressView>) {
        self.mutations += 1;
        self.progress = progress;
    }

    fn clear_chat_input(&mut self) {
        self.mutations += 1;
        self.chat_input_cleared += 1;
    }

    fn scroll_history_to_bottom(&mut self, delay: Duration) {
        self.mutations += 1;
        self.scrolls.push(delay);
    }
}
