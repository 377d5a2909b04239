//! Browser bridge client using web-sys

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::prelude::*;
use web_sys::{MessageEvent, WebSocket};

use literaplay_shared::{BackendCall, BackendEvent};

use crate::infrastructure::messaging::ConnectionState;
use crate::infrastructure::websocket::shared::{encode_call, parse_backend_frame, MAX_RETRY_ATTEMPTS};
use crate::infrastructure::websocket::BackoffState;

/// Socket event closures, dropped on reconnect and disconnect
struct WasmClosures {
    #[allow(dead_code)]
    onmessage: Closure<dyn FnMut(MessageEvent)>,
    #[allow(dead_code)]
    onopen: Closure<dyn FnMut()>,
    #[allow(dead_code)]
    onclose: Closure<dyn FnMut()>,
    #[allow(dead_code)]
    onerror: Closure<dyn FnMut()>,
}

/// WebSocket client for the backend bridge (browser)
pub struct BridgeClient {
    url: String,
    state: Rc<RefCell<ConnectionState>>,
    ws: Rc<RefCell<Option<WebSocket>>>,
    on_event: Rc<RefCell<Option<Box<dyn FnMut(BackendEvent)>>>>,
    on_state_change: Rc<RefCell<Option<Box<dyn FnMut(ConnectionState)>>>>,
    backoff: Rc<RefCell<BackoffState>>,
    intentional_disconnect: Rc<RefCell<bool>>,
    closures: Rc<RefCell<Option<WasmClosures>>>,
}

impl BridgeClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            state: Rc::new(RefCell::new(ConnectionState::Disconnected)),
            ws: Rc::new(RefCell::new(None)),
            on_event: Rc::new(RefCell::new(None)),
            on_state_change: Rc::new(RefCell::new(None)),
            backoff: Rc::new(RefCell::new(BackoffState::default())),
            intentional_disconnect: Rc::new(RefCell::new(false)),
            closures: Rc::new(RefCell::new(None)),
        }
    }

    pub fn set_on_event<F>(&self, callback: F)
    where
        F: FnMut(BackendEvent) + 'static,
    {
        *self.on_event.borrow_mut() = Some(Box::new(callback));
    }

    pub fn set_on_state_change<F>(&self, callback: F)
    where
        F: FnMut(ConnectionState) + 'static,
    {
        *self.on_state_change.borrow_mut() = Some(Box::new(callback));
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    fn set_state(&self, new_state: ConnectionState) {
        *self.state.borrow_mut() = new_state;

        if let Some(ref mut cb) = *self.on_state_change.borrow_mut() {
            cb(new_state);
        }
    }

    pub fn connect(&self) -> Result<()> {
        *self.intentional_disconnect.borrow_mut() = false;
        self.open_socket()
    }

    fn open_socket(&self) -> Result<()> {
        // Drop existing closures before creating new ones to prevent leaks
        *self.closures.borrow_mut() = None;

        self.set_state(ConnectionState::Connecting);

        let ws = WebSocket::new(&self.url)
            .map_err(|e| anyhow::anyhow!("Failed to create WebSocket: {:?}", e))?;
        ws.set_binary_type(web_sys::BinaryType::Arraybuffer);

        let on_event = Rc::clone(&self.on_event);
        let onmessage_callback = Closure::<dyn FnMut(_)>::new(move |e: MessageEvent| {
            let Ok(txt) = e.data().dyn_into::<js_sys::JsString>() else {
                return;
            };
            let text: String = txt.into();
            match parse_backend_frame(&text) {
                Ok(event) => {
                    if let Some(ref mut cb) = *on_event.borrow_mut() {
                        cb(event);
                    }
                }
                Err(e) => tracing::warn!(error = %e, "Failed to parse bridge frame"),
            }
        });
        ws.set_onmessage(Some(onmessage_callback.as_ref().unchecked_ref()));

        let client = self.clone();
        let onopen_callback = Closure::<dyn FnMut()>::new(move || {
            tracing::info!(url = %client.url, "Connected to backend bridge");
            client.backoff.borrow_mut().reset();
            client.set_state(ConnectionState::Connected);
        });
        ws.set_onopen(Some(onopen_callback.as_ref().unchecked_ref()));

        let client = self.clone();
        let onclose_callback = Closure::<dyn FnMut()>::new(move || {
            *client.ws.borrow_mut() = None;
            client.set_state(ConnectionState::Disconnected);
            if !*client.intentional_disconnect.borrow() {
                tracing::info!("Bridge closed unexpectedly, reconnecting");
                client.schedule_reconnect();
            }
        });
        ws.set_onclose(Some(onclose_callback.as_ref().unchecked_ref()));

        // The browser follows every error with a close event, which drives reconnection.
        let onerror_callback = Closure::<dyn FnMut()>::new(move || {
            tracing::error!("Bridge socket error");
        });
        ws.set_onerror(Some(onerror_callback.as_ref().unchecked_ref()));

        *self.closures.borrow_mut() = Some(WasmClosures {
            onmessage: onmessage_callback,
            onopen: onopen_callback,
            onclose: onclose_callback,
            onerror: onerror_callback,
        });
        *self.ws.borrow_mut() = Some(ws);

        Ok(())
    }

    fn schedule_reconnect(&self) {
        let next = self.backoff.borrow_mut().next_delay_and_advance();
        let Some(delay) = next else {
            tracing::error!("Max reconnection attempts reached, giving up");
            self.set_state(ConnectionState::Failed);
            return;
        };
        self.set_state(ConnectionState::Reconnecting);
        tracing::info!(
            attempt = self.backoff.borrow().attempts(),
            max_attempts = MAX_RETRY_ATTEMPTS,
            delay_ms = delay,
            "Reconnecting to backend bridge"
        );

        let client = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(delay as u32).await;
            if *client.intentional_disconnect.borrow() {
                return;
            }
            if let Err(e) = client.open_socket() {
                tracing::warn!(error = %e, "Reconnection attempt failed");
                client.schedule_reconnect();
            }
        });
    }

    pub fn send(&self, call: &BackendCall) -> Result<()> {
        match *self.ws.borrow() {
            Some(ref ws) => {
                let frame = encode_call(call)?;
                ws.send_with_str(&frame)
                    .map_err(|e| anyhow::anyhow!("Failed to send: {:?}", e))?;
                Ok(())
            }
            None => Err(anyhow::anyhow!("Not connected")),
        }
    }

    pub fn disconnect(&self) {
        *self.intentional_disconnect.borrow_mut() = true;

        if let Some(ws) = self.ws.borrow_mut().take() {
            let _ = ws.close();
        }
        // Dropping the closures also breaks the client <-> closure reference cycle
        *self.closures.borrow_mut() = None;
        self.set_state(ConnectionState::Disconnected);
    }
}

impl Clone for BridgeClient {
    fn clone(&self) -> Self {
        Self {
            url: self.url.clone(),
            state: Rc::clone(&self.state),
            ws: Rc::clone(&self.ws),
            on_event: Rc::clone(&self.on_event),
            on_state_change: Rc::clone(&self.on_state_change),
            backoff: Rc::clone(&self.backoff),
            intentional_disconnect: Rc::clone(&self.intentional_disconnect),
            closures: Rc::clone(&self.closures),
        }
    }
}
