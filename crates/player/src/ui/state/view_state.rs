//! Reactive view state and the `ViewPort` adapter that writes it
//!
//! Components read `ViewState` signals; the controller writes them through
//! `SignalView`. Effects that need real DOM nodes (scrolling, focus) are run
//! with `document::eval` against the fixed element ids.

use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;
use literaplay_shared::ChatOption;

use crate::ports::outbound::{
    ApiStatus, Bubble, ChatHeader, LibraryCard, PlatformPort, ProgressView, Screen,
    SituationCard, ViewPort,
};
use crate::ui::dom_ids;

/// Everything the screens render
#[derive(Clone, Copy)]
pub struct ViewState {
    pub screen: Signal<Screen>,
    /// Verify button disabled and relabelled while a key is checked
    pub verify_pending: Signal<bool>,
    pub api_status: Signal<Option<ApiStatus>>,
    pub confirm_dialog_visible: Signal<bool>,
    pub library_cards: Signal<Vec<LibraryCard>>,
    pub situation_title: Signal<String>,
    pub situation_cards: Signal<Vec<SituationCard>>,
    pub chat_header: Signal<ChatHeader>,
    pub history: Signal<Vec<Bubble>>,
    pub options: Signal<Vec<ChatOption>>,
    /// Typing indicator shown, input disabled
    pub loading: Signal<bool>,
    pub chat_input_visible: Signal<bool>,
    pub end_controls_visible: Signal<bool>,
    pub progress: Signal<Option<ProgressView>>,
    pub api_key_input: Signal<String>,
    pub chat_input: Signal<String>,
}

impl ViewState {
    /// Must be called inside a Dioxus scope.
    pub fn new() -> Self {
        Self {
            screen: Signal::new(Screen::Api),
            verify_pending: Signal::new(false),
            api_status: Signal::new(None),
            confirm_dialog_visible: Signal::new(false),
            library_cards: Signal::new(Vec::new()),
            situation_title: Signal::new(String::new()),
            situation_cards: Signal::new(Vec::new()),
            chat_header: Signal::new(ChatHeader::default()),
            history: Signal::new(Vec::new()),
            options: Signal::new(Vec::new()),
            loading: Signal::new(false),
            chat_input_visible: Signal::new(true),
            end_controls_visible: Signal::new(false),
            progress: Signal::new(None),
            api_key_input: Signal::new(String::new()),
            chat_input: Signal::new(String::new()),
        }
    }
}

/// Production `ViewPort`: signal writes plus a few DOM side effects.
pub struct SignalView {
    state: ViewState,
    platform: Arc<dyn PlatformPort>,
}

impl SignalView {
    pub fn new(state: ViewState, platform: Arc<dyn PlatformPort>) -> Self {
        Self { state, platform }
    }

    /// Run `script` after `delay`, once the pending render has landed.
    fn eval_after(&self, delay: Duration, script: String) {
        let sleep = (!delay.is_zero()).then(|| self.platform.sleep_ms(delay.as_millis() as u64));
        spawn(async move {
            if let Some(sleep) = sleep {
                sleep.await;
            }
            let _ = document::eval(&script);
        });
    }
}

impl ViewPort for SignalView {
    fn show_screen(&mut self, screen: Screen) {
        tracing::debug!(screen = screen.name(), "Showing screen");
        self.state.screen.set(screen);
    }

    fn set_verify_pending(&mut self, pending: bool) {
        self.state.verify_pending.set(pending);
    }

    fn set_api_status(&mut self, status: Option<ApiStatus>) {
        self.state.api_status.set(status);
    }

    fn set_confirm_dialog_visible(&mut self, visible: bool) {
        self.state.confirm_dialog_visible.set(visible);
    }

    fn render_library(&mut self, cards: Vec<LibraryCard>) {
        self.state.library_cards.set(cards);
    }

    fn render_situations(&mut self, work_title: &str, cards: Vec<SituationCard>) {
        self.state.situation_title.set(work_title.to_string());
        self.state.situation_cards.set(cards);
    }

    fn set_chat_header(&mut self, header: ChatHeader) {
        self.state.chat_header.set(header);
    }

    fn clear_chat(&mut self) {
        self.state.history.write().clear();
        self.state.options.write().clear();
    }

    fn append_bubble(&mut self, bubble: Bubble) {
        self.state.history.write().push(bubble);
    }

    fn render_options(&mut self, options: Vec<ChatOption>) {
        self.state.options.set(options);
    }

    fn clear_options(&mut self) {
        self.state.options.write().clear();
    }

    fn set_loading(&mut self, loading: bool) {
        self.state.loading.set(loading);
        if !loading {
            self.eval_after(
                Duration::ZERO,
                format!("document.getElementById('{}')?.focus();", dom_ids::CHAT_INPUT),
            );
        }
    }

    fn set_chat_input_visible(&mut self, visible: bool) {
        self.state.chat_input_visible.set(visible);
    }

    fn set_end_controls_visible(&mut self, visible: bool) {
        self.state.end_controls_visible.set(visible);
    }

    fn set_progress(&mut self, progress: Option<ProgressView>) {
        self.state.progress.set(progress);
    }

    fn clear_chat_input(&mut self) {
        self.state.chat_input.set(String::new());
    }

    fn scroll_history_to_bottom(&mut self, delay: Duration) {
        self.eval_after(
            delay,
            format!(
                "requestAnimationFrame(() => {{ const h = document.getElementById('{}'); if (h) {{ h.scrollTop = h.scrollHeight; }} }});",
                dom_ids::CHAT_HISTORY
            ),
        );
    }
}
