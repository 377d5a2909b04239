use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedReceiver;
use futures_util::StreamExt;
use literaplay_shared::BackendEvent;

use crate::application::ViewController;
use crate::ports::outbound::{BackendPort, PlatformPort};

pub mod components;
pub mod dom_ids;
pub mod markup;
pub mod state;

use components::{
    ApiScreen, ChatScreen, ConfirmDialog, ConnectionBanner, MenuScreen, SituationScreen,
};
use state::{SignalView, ViewState};

/// Type alias for the platform port used throughout the UI
pub type Platform = Arc<dyn PlatformPort>;

/// Outbound port as provided by the composition root
pub type Backend = Arc<dyn BackendPort>;

/// Hook to access the Platform from Dioxus context
pub fn use_platform() -> Platform {
    use_context::<Platform>()
}

/// Receiving end of the event bus subscription.
///
/// Created by the composition root; the app takes it once on mount.
#[derive(Clone)]
pub struct EventInbox(Arc<Mutex<Option<UnboundedReceiver<BackendEvent>>>>);

impl EventInbox {
    pub fn new(rx: UnboundedReceiver<BackendEvent>) -> Self {
        Self(Arc::new(Mutex::new(Some(rx))))
    }

    fn take(&self) -> Option<UnboundedReceiver<BackendEvent>> {
        self.0.lock().ok().and_then(|mut slot| slot.take())
    }
}

/// The controller, shared by every component on the UI thread.
#[derive(Clone)]
pub struct ControllerHandle(Rc<RefCell<ViewController<SignalView>>>);

impl ControllerHandle {
    fn new(controller: ViewController<SignalView>) -> Self {
        Self(Rc::new(RefCell::new(controller)))
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut ViewController<SignalView>) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }
}

/// Class list of a screen container
pub(crate) fn screen_class(visible: bool) -> &'static str {
    if visible {
        "screen"
    } else {
        "screen hidden"
    }
}

pub fn app() -> Element {
    rsx! {
        AppRoot {}
    }
}

#[component]
fn AppRoot() -> Element {
    // Provided by the composition root (see `crates/player/src/main.rs`).
    let platform = use_platform();
    let backend = use_context::<Backend>();
    let inbox = use_context::<EventInbox>();

    // These must be created inside an active Dioxus runtime.
    let state = use_context_provider(ViewState::new);
    let controller = use_context_provider(move || {
        ControllerHandle::new(ViewController::new(
            SignalView::new(state, platform),
            backend,
        ))
    });

    // Apply backend events one at a time, in arrival order.
    use_hook(move || {
        let Some(mut rx) = inbox.take() else {
            tracing::warn!("Backend events already taken");
            return;
        };
        spawn(async move {
            while let Some(event) = rx.next().await {
                controller.with(|c| c.handle_event(event));
            }
            tracing::info!("Backend event channel closed");
        });
    });

    rsx! {
        document::Stylesheet {
            href: asset!("assets/css/literaplay.css"),
        }

        div {
            class: "app",
            ConnectionBanner {}
            ApiScreen {}
            MenuScreen {}
            SituationScreen {}
            ChatScreen {}
            ConfirmDialog {}
        }
    }
}
