//! Library screen: one card per work

use dioxus::prelude::*;

use crate::ports::outbound::{CardAction, LibraryCard, Screen};
use crate::ui::state::ViewState;
use crate::ui::{dom_ids, screen_class, ControllerHandle};

#[component]
pub fn MenuScreen() -> Element {
    let state = use_context::<ViewState>();
    let visible = *state.screen.read() == Screen::Menu;
    let cards = state.library_cards.read().clone();

    rsx! {
        div {
            id: dom_ids::screen_id(Screen::Menu),
            class: screen_class(visible),

            header {
                class: "menu-header",
                h1 { "Библиотека" }
                p { class: "subtitle", "Изберете произведение" }
            }

            div {
                id: dom_ids::LIBRARY_CARDS_CONTAINER,
                class: "cards-grid",

                for card in cards {
                    LibraryCardView {
                        key: "{card.work_key}",
                        card: card.clone(),
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct LibraryCardViewProps {
    pub card: LibraryCard,
}

#[component]
fn LibraryCardView(props: LibraryCardViewProps) -> Element {
    let controller = use_context::<ControllerHandle>();
    let card = props.card;
    let work_key = card.work_key.clone();

    let label = match card.action {
        CardAction::ChooseSituation => "Избери ситуация",
        CardAction::StartChat => "Започни разговор",
    };

    rsx! {
        div {
            class: "library-card glass-card",

            h2 { "{card.title}" }
            p {
                class: "char-info",
                style: "color: {card.color}",
                "{card.info}"
            }
            button {
                class: "btn-card",
                style: "background-color: {card.color}",
                onclick: move |_| controller.with(|c| c.open_work(&work_key)),
                "{label}"
            }
        }
    }
}
