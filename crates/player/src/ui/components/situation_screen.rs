//! Situation picker for works split into scenes

use dioxus::prelude::*;

use crate::ports::outbound::{Screen, SituationCard};
use crate::ui::state::ViewState;
use crate::ui::{dom_ids, screen_class, ControllerHandle};

#[component]
pub fn SituationScreen() -> Element {
    let state = use_context::<ViewState>();
    let controller = use_context::<ControllerHandle>();

    let visible = *state.screen.read() == Screen::Situation;
    let title = state.situation_title.read().clone();
    let cards = state.situation_cards.read().clone();

    rsx! {
        div {
            id: dom_ids::screen_id(Screen::Situation),
            class: screen_class(visible),

            header {
                class: "situation-header",
                button {
                    id: dom_ids::BTN_SITUATION_BACK,
                    class: "btn-back",
                    onclick: move |_| controller.with(|c| c.back_to_menu()),
                    "← Назад"
                }
                h1 { id: dom_ids::SITUATION_TITLE, "{title}" }
            }

            div {
                id: dom_ids::SITUATION_CARDS_CONTAINER,
                class: "cards-grid",

                for card in cards {
                    SituationCardView {
                        key: "{card.situation_key}",
                        card: card.clone(),
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct SituationCardViewProps {
    pub card: SituationCard,
}

#[component]
fn SituationCardView(props: SituationCardViewProps) -> Element {
    let controller = use_context::<ControllerHandle>();
    let card = props.card;
    let work_key = card.work_key.clone();
    let situation_key = card.situation_key.clone();

    rsx! {
        div {
            class: "library-card situation-card glass-card",

            h2 { "{card.title}" }
            p {
                class: "char-info",
                style: "color: {card.color}",
                "{card.characters}"
            }
            button {
                class: "btn-card",
                style: "background-color: {card.color}",
                onclick: move |_| controller.with(|c| c.start_chat(&work_key, Some(&situation_key))),
                "Започни"
            }
        }
    }
}
