//! API key screen and the "save this key?" prompt

use dioxus::prelude::*;

use crate::ports::outbound::{Screen, StatusTone};
use crate::ui::state::ViewState;
use crate::ui::{dom_ids, screen_class, ControllerHandle};

#[component]
pub fn ApiScreen() -> Element {
    let state = use_context::<ViewState>();
    let controller = use_context::<ControllerHandle>();
    let mut key = state.api_key_input;

    let pending = *state.verify_pending.read();
    let status = state.api_status.read().clone();
    let visible = *state.screen.read() == Screen::Api;
    let status_class = match status.as_ref().map(|s| s.tone) {
        Some(StatusTone::Error) => "api-status error",
        _ => "api-status",
    };
    let status_text = status.map(|s| s.text).unwrap_or_default();
    let verify_label = if pending { "Checking..." } else { "Verify & Save" };

    let submit_click = controller.clone();
    let submit_enter = controller;

    rsx! {
        div {
            id: dom_ids::screen_id(Screen::Api),
            class: screen_class(visible),

            div {
                class: "api-card glass-card",

                h1 { "LiteraPlay" }
                p {
                    class: "subtitle",
                    "Въведете вашия Gemini API ключ, за да започнете."
                }

                input {
                    id: dom_ids::API_KEY_INPUT,
                    r#type: "password",
                    placeholder: "API ключ",
                    value: "{key}",
                    oninput: move |e| key.set(e.value()),
                    onkeypress: move |e: KeyboardEvent| {
                        if e.key() == Key::Enter && !pending {
                            let input = key.read().clone();
                            submit_enter.with(|c| c.submit_api_key(&input));
                        }
                    },
                }

                button {
                    id: dom_ids::BTN_VERIFY,
                    class: "btn-primary",
                    disabled: pending,
                    onclick: move |_| {
                        let input = key.read().clone();
                        submit_click.with(|c| c.submit_api_key(&input));
                    },
                    "{verify_label}"
                }

                p {
                    id: dom_ids::API_STATUS,
                    class: status_class,
                    "{status_text}"
                }
            }
        }
    }
}

/// Shown after a key validates; the answer goes back with the key itself.
#[component]
pub fn ConfirmDialog() -> Element {
    let state = use_context::<ViewState>();
    let controller = use_context::<ControllerHandle>();
    let key = state.api_key_input;

    let overlay_class = if *state.confirm_dialog_visible.read() {
        "dialog-overlay"
    } else {
        "dialog-overlay hidden"
    };
    let accept = controller.clone();
    let decline = controller;

    rsx! {
        div {
            id: dom_ids::DIALOG_OVERLAY,
            class: overlay_class,

            div {
                class: "dialog glass-card",

                h3 { "Ключът е валиден" }
                p { "Да запазя ли ключа за следващото стартиране?" }

                div {
                    class: "dialog-buttons",

                    button {
                        id: dom_ids::BTN_DIALOG_YES,
                        class: "btn-primary",
                        onclick: move |_| {
                            let input = key.read().clone();
                            accept.with(|c| c.decide_api_key(&input, true));
                        },
                        "Да"
                    }
                    button {
                        id: dom_ids::BTN_DIALOG_NO,
                        class: "btn-secondary",
                        onclick: move |_| {
                            let input = key.read().clone();
                            decline.with(|c| c.decide_api_key(&input, false));
                        },
                        "Не"
                    }
                }
            }
        }
    }
}
