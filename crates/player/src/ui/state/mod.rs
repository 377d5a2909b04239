//! UI state (Dioxus signals)

mod view_state;

pub use view_state::{SignalView, ViewState};
