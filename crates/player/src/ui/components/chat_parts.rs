//! Pieces of the chat screen: bubbles, option buttons, story progress

use dioxus::prelude::*;

use literaplay_shared::ChatOption;

use crate::ports::outbound::Bubble;
use crate::ui::markup::bubble_html;
use crate::ui::state::ViewState;
use crate::ui::{dom_ids, ControllerHandle};

/// Icon shown on options that follow the original story
const CANONICAL_ICON: &str = "★";

#[derive(Props, Clone, PartialEq)]
pub struct MessageBubbleProps {
    pub bubble: Bubble,
}

/// One chat bubble.
///
/// Injected as a single HTML fragment built by `bubble_html`, which escapes
/// the sender and the body.
#[component]
pub fn MessageBubble(props: MessageBubbleProps) -> Element {
    let html = bubble_html(&props.bubble);

    rsx! {
        div {
            class: "msg-row",
            dangerous_inner_html: "{html}",
        }
    }
}

#[component]
pub fn OptionList() -> Element {
    let state = use_context::<ViewState>();
    let options = state.options.read().clone();

    rsx! {
        div {
            id: dom_ids::CHAT_OPTIONS,
            class: "chat-options",

            for (index, option) in options.into_iter().enumerate() {
                OptionButton {
                    key: "{index}",
                    option,
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct OptionButtonProps {
    pub option: ChatOption,
}

/// Shows the display text; a click sends the raw option back unchanged.
#[component]
fn OptionButton(props: OptionButtonProps) -> Element {
    let controller = use_context::<ControllerHandle>();
    let option = props.option;
    let raw = option.raw.clone();
    let class = if option.canonical {
        "btn-option canonical"
    } else {
        "btn-option"
    };

    rsx! {
        button {
            class,
            onclick: move |_| controller.with(|c| c.select_option(&raw)),
            if option.canonical {
                span { class: "canonical-icon", "{CANONICAL_ICON} " }
            }
            "{option.display}"
        }
    }
}

#[component]
pub fn StoryProgressBar() -> Element {
    let state = use_context::<ViewState>();
    let progress = state.progress.read().clone();

    let (block_class, label, width) = match progress {
        Some(p) => ("story-progress", p.chapter_label, p.width_pct),
        None => ("story-progress hidden", String::new(), 0.0),
    };

    rsx! {
        div {
            id: dom_ids::STORY_PROGRESS,
            class: block_class,

            span { id: dom_ids::CHAPTER_LABEL, class: "chapter-label", "{label}" }
            div {
                class: "progress-bar",
                div {
                    id: dom_ids::PROGRESS_BAR_FILL,
                    class: "progress-bar-fill",
                    style: "width: {width}%",
                }
            }
        }
    }
}
