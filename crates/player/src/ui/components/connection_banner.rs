//! Bridge status strip, shown only while the backend is unreachable

use dioxus::prelude::*;

use crate::infrastructure::messaging::{ConnectionState, ConnectionStateObserver};
use crate::ui::use_platform;

/// How often the bridge state is sampled
const POLL_INTERVAL_MS: u64 = 500;

/// Text for states the user should know about.
pub(crate) fn connection_notice(state: ConnectionState) -> Option<&'static str> {
    match state {
        ConnectionState::Reconnecting => Some("Връзката е прекъсната. Свързване отново..."),
        ConnectionState::Failed => {
            Some("Няма връзка с приложението. Рестартирайте LiteraPlay.")
        }
        ConnectionState::Disconnected
        | ConnectionState::Connecting
        | ConnectionState::Connected => None,
    }
}

#[component]
pub fn ConnectionBanner() -> Element {
    let observer = use_context::<ConnectionStateObserver>();
    let platform = use_platform();
    let mut state = use_signal(|| observer.state());

    use_hook(move || {
        spawn(async move {
            loop {
                platform.sleep_ms(POLL_INTERVAL_MS).await;
                let current = observer.state();
                if *state.peek() != current {
                    tracing::debug!(state = ?current, "Bridge state shown");
                    state.set(current);
                }
            }
        });
    });

    let Some(notice) = connection_notice(*state.read()) else {
        return rsx! {};
    };
    let class = if *state.read() == ConnectionState::Failed {
        "connection-banner error"
    } else {
        "connection-banner"
    };

    rsx! {
        div { class, "{notice}" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_only_when_backend_unreachable() {
        assert!(connection_notice(ConnectionState::Connected).is_none());
        assert!(connection_notice(ConnectionState::Connecting).is_none());
        assert!(connection_notice(ConnectionState::Disconnected).is_none());
        assert!(connection_notice(ConnectionState::Reconnecting).is_some());
        assert!(connection_notice(ConnectionState::Failed).is_some());
    }
}
