//! Chat screen: header, history, options, progress and the input row

use dioxus::prelude::*;

use crate::ports::outbound::Screen;
use crate::ui::components::{MessageBubble, OptionList, StoryProgressBar};
use crate::ui::state::ViewState;
use crate::ui::{dom_ids, screen_class, ControllerHandle};

#[component]
pub fn ChatScreen() -> Element {
    let state = use_context::<ViewState>();
    let back = use_context::<ControllerHandle>();

    let visible = *state.screen.read() == Screen::Chat;
    let header = state.chat_header.read().clone();
    let history = state.history.read().clone();
    let indicator_class = if *state.loading.read() {
        "typing-indicator"
    } else {
        "typing-indicator hidden"
    };

    rsx! {
        div {
            id: dom_ids::screen_id(Screen::Chat),
            class: screen_class(visible),
            style: "--session-accent: {header.color}",

            header {
                class: "chat-header",
                button {
                    id: dom_ids::BTN_BACK,
                    class: "btn-back",
                    onclick: move |_| back.with(|c| c.back_to_menu()),
                    "← Меню"
                }
                div {
                    class: "chat-heading",
                    h2 {
                        id: dom_ids::CHAT_TITLE,
                        style: "color: {header.color}",
                        "{header.title}"
                    }
                    if let Some(subtitle) = header.subtitle.clone() {
                        p { id: dom_ids::CHAT_SUBTITLE, class: "chat-subtitle", "{subtitle}" }
                    }
                }
                StoryProgressBar {}
            }

            div {
                id: dom_ids::CHAT_HISTORY,
                class: "chat-history",

                for (index, bubble) in history.into_iter().enumerate() {
                    MessageBubble {
                        key: "{index}",
                        bubble,
                    }
                }

                div {
                    id: dom_ids::TYPING_INDICATOR,
                    class: indicator_class,
                    span {}
                    span {}
                    span {}
                }
            }

            OptionList {}
            ChatInputRow {}
            ChatEndRow {}
        }
    }
}

#[component]
fn ChatInputRow() -> Element {
    let state = use_context::<ViewState>();
    let controller = use_context::<ControllerHandle>();
    let mut text = state.chat_input;

    let loading = *state.loading.read();
    let row_class = if *state.chat_input_visible.read() {
        "chat-input-area"
    } else {
        "chat-input-area hidden"
    };

    let send_click = controller.clone();
    let send_enter = controller;

    rsx! {
        div {
            id: dom_ids::CHAT_INPUT_AREA,
            class: row_class,

            input {
                id: dom_ids::CHAT_INPUT,
                r#type: "text",
                placeholder: "Напиши отговор...",
                disabled: loading,
                value: "{text}",
                oninput: move |e| text.set(e.value()),
                onkeypress: move |e: KeyboardEvent| {
                    if e.key() == Key::Enter {
                        let input = text.read().clone();
                        send_enter.with(|c| c.send_input(&input));
                    }
                },
            }
            button {
                id: dom_ids::BTN_SEND,
                class: "btn-primary",
                disabled: loading,
                onclick: move |_| {
                    let input = text.read().clone();
                    send_click.with(|c| c.send_input(&input));
                },
                "Изпрати"
            }
        }
    }
}

/// Replaces the input row once the story has ended.
#[component]
fn ChatEndRow() -> Element {
    let state = use_context::<ViewState>();
    let controller = use_context::<ControllerHandle>();

    let row_class = if *state.end_controls_visible.read() {
        "chat-end-area"
    } else {
        "chat-end-area hidden"
    };

    rsx! {
        div {
            id: dom_ids::CHAT_END_AREA,
            class: row_class,

            button {
                id: dom_ids::BTN_END_MENU,
                class: "btn-primary",
                onclick: move |_| controller.with(|c| c.back_to_menu()),
                "Обратно към менюто"
            }
        }
    }
}
