//! View controller
//!
//! One handler per backend event plus one method per user action. Handlers
//! take the event payload, update `SessionState`, and draw through the
//! `ViewPort`. Outbound calls go through `BackendPort` and are never awaited:
//! the backend answers with later events, matched to calls only by order.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use literaplay_shared::{
    decode_chat_options, BackendEvent, ChatMessage, ChatOption, Library, LibraryEntry,
    PayloadError, StoryProgress,
};

use crate::application::session::{SessionState, DEFAULT_ACCENT_COLOR};
use crate::ports::outbound::{
    ApiStatus, BackendPort, Bubble, BubbleRole, CardAction, ChatHeader, LibraryCard,
    ProgressView, Screen, SituationCard, StatusTone, ViewPort,
};

/// Delay before scrolling the history, so layout settles first
pub const SCROLL_SETTLE_DELAY: Duration = Duration::from_millis(50);

/// Sender name used for system bubbles
pub const SYSTEM_SENDER: &str = "System";

/// Card color when a work has none of its own
pub const FALLBACK_CARD_COLOR: &str = "var(--accent)";

const VERIFYING_STATUS: &str = "Проверка на API ключ...";
const CHAT_ERROR_PREFIX: &str = "Грешка: ";

pub struct ViewController<V: ViewPort> {
    view: V,
    backend: Arc<dyn BackendPort>,
    session: SessionState,
}

impl<V: ViewPort> ViewController<V> {
    pub fn new(view: V, backend: Arc<dyn BackendPort>) -> Self {
        Self {
            view,
            backend,
            session: SessionState::new(),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    // =========================================================================
    // Backend events
    // =========================================================================

    /// Route one backend event to its handler.
    pub fn handle_event(&mut self, event: BackendEvent) {
        tracing::debug!(event = event.name(), "Handling backend event");

        match event {
            BackendEvent::ConnectionReady => self.on_connection_ready(),
            BackendEvent::ApiKeyValidated { is_valid, message } => {
                self.on_api_key_validated(is_valid, &message)
            }
            BackendEvent::LibraryLoaded { library } => self.on_library_loaded(&library),
            BackendEvent::ChatMessage { message } => self.on_chat_message(&message),
            BackendEvent::ChatOptionsUpdated { options } => self.on_chat_options_updated(&options),
            BackendEvent::ChatStarted {
                intro,
                first_message,
            } => self.on_chat_started(&intro, &first_message),
            BackendEvent::ChatEnded { final_text } => self.on_chat_ended(&final_text),
            BackendEvent::LoadingStateChanged { is_loading } => {
                self.on_loading_state_changed(is_loading)
            }
            BackendEvent::ChatError { message } => self.on_chat_error(&message),
            BackendEvent::StoryProgressUpdated { progress } => {
                self.on_story_progress_updated(&progress)
            }
            BackendEvent::ChapterTransition { title } => self.on_chapter_transition(&title),
            BackendEvent::Unknown => {
                tracing::debug!("Ignoring unknown backend event");
            }
        }
    }

    pub fn on_connection_ready(&mut self) {
        let result = self.backend.request_initial_state();
        log_call_failure("request_initial_state", result);
    }

    pub fn on_api_key_validated(&mut self, is_valid: bool, message: &str) {
        self.view.set_verify_pending(false);

        if is_valid {
            self.view.set_api_status(None);
            self.view.set_confirm_dialog_visible(true);
        } else {
            self.view.set_api_status(Some(ApiStatus {
                text: message.to_string(),
                tone: StatusTone::Error,
            }));
        }
    }

    pub fn on_library_loaded(&mut self, payload: &str) {
        let library = match Library::decode(payload) {
            Ok(library) => library,
            Err(e) => return log_payload_error(e),
        };

        let cards = library_cards(&library);
        let works = library.len();
        let first_load = self.session.set_library(library);
        tracing::info!(works, first_load, "Library loaded");

        // A reload after a reconnect only refreshes the cards.
        if first_load {
            self.view.show_screen(Screen::Menu);
        }
        self.view.render_library(cards);
    }

    pub fn on_chat_message(&mut self, payload: &str) {
        let message = match ChatMessage::decode(payload) {
            Ok(message) => message,
            Err(e) => return log_payload_error(e),
        };

        let role = if message.is_system {
            BubbleRole::System
        } else if message.is_user {
            BubbleRole::User
        } else {
            BubbleRole::Character
        };
        self.render_message(role, message.sender, message.text);
    }

    pub fn on_chat_options_updated(&mut self, payload: &str) {
        match decode_chat_options(payload) {
            Ok(options) => self.view.render_options(options),
            Err(e) => log_payload_error(e),
        }
    }

    pub fn on_chat_started(&mut self, intro: &str, first_message: &str) {
        self.render_message(BubbleRole::System, SYSTEM_SENDER.to_string(), intro.to_string());
        let character = self.session.character_name().to_string();
        self.render_message(BubbleRole::Character, character, first_message.to_string());
    }

    pub fn on_chat_ended(&mut self, final_text: &str) {
        self.render_message(
            BubbleRole::System,
            SYSTEM_SENDER.to_string(),
            final_text.to_string(),
        );
        self.view.clear_options();
        self.view.set_chat_input_visible(false);
        self.view.set_end_controls_visible(true);
    }

    pub fn on_loading_state_changed(&mut self, is_loading: bool) {
        self.view.set_loading(is_loading);
        self.view.scroll_history_to_bottom(Duration::ZERO);
    }

    pub fn on_chat_error(&mut self, message: &str) {
        self.render_message(
            BubbleRole::System,
            SYSTEM_SENDER.to_string(),
            format!("{CHAT_ERROR_PREFIX}{message}"),
        );
    }

    pub fn on_story_progress_updated(&mut self, payload: &str) {
        match StoryProgress::decode(payload) {
            Ok(progress) => self.view.set_progress(Some(progress_view(&progress))),
            Err(e) => log_payload_error(e),
        }
    }

    pub fn on_chapter_transition(&mut self, title: &str) {
        self.render_message(
            BubbleRole::Chapter,
            SYSTEM_SENDER.to_string(),
            title.to_string(),
        );
    }

    // =========================================================================
    // User actions
    // =========================================================================

    /// Verify the key typed into the API screen.
    pub fn submit_api_key(&mut self, input: &str) {
        let key = input.trim();
        if key.is_empty() {
            return;
        }

        self.view.set_verify_pending(true);
        self.view.set_api_status(Some(ApiStatus {
            text: VERIFYING_STATUS.to_string(),
            tone: StatusTone::Info,
        }));
        let result = self.backend.verify_api_key(key);
        log_call_failure("verify_api_key", result);
    }

    /// Answer the "save this key?" prompt.
    pub fn decide_api_key(&mut self, input: &str, accepted: bool) {
        self.view.set_confirm_dialog_visible(false);
        let result = self.backend.save_api_key_decision(input.trim(), accepted);
        log_call_failure("save_api_key_decision", result);
    }

    /// A library card was clicked.
    pub fn open_work(&mut self, work_key: &str) {
        let Some(entry) = self.session.library().get(work_key) else {
            tracing::warn!(work_key = %work_key, "Work not in cached library");
            return;
        };

        if entry.has_situations() {
            let title = entry.title.clone();
            let cards = situation_cards(work_key, entry);
            self.view.render_situations(&title, cards);
            self.view.show_screen(Screen::Situation);
        } else {
            self.start_chat(work_key, None);
        }
    }

    /// Start a chat for a work, or for one of its situations.
    pub fn start_chat(&mut self, work_key: &str, situation_key: Option<&str>) {
        let Some(entry) = self.session.library().get(work_key) else {
            tracing::warn!(work_key = %work_key, "Work not in cached library");
            return;
        };

        let work_color = entry.color.clone();
        let (character, user_character, color, subtitle) = match situation_key {
            Some(key) => {
                let Some(situation) = entry.situation(key) else {
                    tracing::warn!(work_key = %work_key, situation_key = %key, "Situation not in cached library");
                    return;
                };
                (
                    situation.character.clone(),
                    situation.user_character.clone(),
                    situation.color.clone().or(work_color),
                    Some(situation.title.clone()),
                )
            }
            None => (
                entry.character.clone().unwrap_or_default(),
                None,
                work_color,
                None,
            ),
        };
        let color = color.unwrap_or_else(|| DEFAULT_ACCENT_COLOR.to_string());

        self.session.begin_chat(character.clone(), user_character);

        self.view.set_chat_header(ChatHeader {
            title: character,
            subtitle,
            color,
        });
        self.view.clear_chat();
        self.view.set_api_status(None);
        self.view.set_progress(None);
        self.view.set_chat_input_visible(true);
        self.view.set_end_controls_visible(false);
        self.view.show_screen(Screen::Chat);

        let result = self
            .backend
            .start_chat_session(work_key, situation_key.map(str::to_string));
        log_call_failure("start_chat_session", result);
    }

    /// An option button was clicked. `raw` is the option exactly as the backend sent it.
    pub fn select_option(&mut self, raw: &str) {
        let option = ChatOption::parse(raw);
        let label = self.session.user_label().to_string();
        self.render_message(BubbleRole::User, label, option.display);
        self.view.clear_options();

        let result = self.backend.send_user_message(&option.raw);
        log_call_failure("send_user_message", result);
    }

    /// Send the text typed into the chat input.
    pub fn send_input(&mut self, input: &str) {
        let text = input.trim();
        if text.is_empty() {
            return;
        }

        self.view.clear_chat_input();
        let label = self.session.user_label().to_string();
        self.render_message(BubbleRole::User, label, text.to_string());
        self.view.clear_options();

        let result = self.backend.send_user_message(text);
        log_call_failure("send_user_message", result);
    }

    /// Back button on the chat or situation screen, and the post-ending button.
    pub fn back_to_menu(&mut self) {
        self.view.show_screen(Screen::Menu);
    }

    /// Show a screen by name. Unknown names leave the view untouched.
    pub fn show_screen(&mut self, name: &str) {
        match Screen::from_name(name) {
            Some(screen) => self.view.show_screen(screen),
            None => tracing::debug!(screen = %name, "Ignoring unknown screen name"),
        }
    }

    fn render_message(&mut self, role: BubbleRole, sender: String, text: String) {
        self.view.append_bubble(Bubble { role, sender, text });
        self.view.scroll_history_to_bottom(SCROLL_SETTLE_DELAY);
    }
}

fn library_cards(library: &Library) -> Vec<LibraryCard> {
    library
        .iter()
        .map(|(work_key, entry)| {
            let (info, action) = if entry.has_situations() {
                (
                    format!("Ситуации: {}", entry.situations.len()),
                    CardAction::ChooseSituation,
                )
            } else {
                (
                    format!("Герой: {}", entry.character.as_deref().unwrap_or_default()),
                    CardAction::StartChat,
                )
            };
            LibraryCard {
                work_key: work_key.to_string(),
                title: entry.title.clone(),
                info,
                color: card_color(entry.color.as_deref()),
                action,
            }
        })
        .collect()
}

fn situation_cards(work_key: &str, entry: &LibraryEntry) -> Vec<SituationCard> {
    entry
        .situations
        .iter()
        .map(|situation| SituationCard {
            work_key: work_key.to_string(),
            situation_key: situation.key.clone(),
            title: situation.title.clone(),
            characters: situation
                .characters
                .clone()
                .unwrap_or_else(|| situation.character.clone()),
            color: card_color(situation.color.as_deref().or(entry.color.as_deref())),
        })
        .collect()
}

fn card_color(color: Option<&str>) -> String {
    color
        .filter(|c| !c.is_empty())
        .unwrap_or(FALLBACK_CARD_COLOR)
        .to_string()
}

/// Only the upper bound is clamped; the backend never reports negative progress.
fn progress_view(progress: &StoryProgress) -> ProgressView {
    let chapter = progress.chapter_index.saturating_add(1);
    let chapter_label = if progress.chapter_title.is_empty() {
        format!("Глава {}/{}", chapter, progress.total_chapters)
    } else {
        format!(
            "Глава {}/{}: {}",
            chapter, progress.total_chapters, progress.chapter_title
        )
    };

    ProgressView {
        chapter_label,
        width_pct: progress.progress_pct.min(100.0),
    }
}

fn log_payload_error(error: PayloadError) {
    tracing::warn!(event = error.event, error = %error.source, "Dropping update with malformed payload");
}

fn log_call_failure(method: &str, result: Result<()>) {
    if let Err(e) = result {
        tracing::error!(method = %method, error = %e, "Backend call could not be queued");
    }
}
