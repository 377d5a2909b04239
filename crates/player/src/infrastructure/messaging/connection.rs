//! Bridge connection lifecycle.
//!
//! The bridge task owns the socket; everything else sees the connection
//! through a shared [`StateCell`] and a one-shot disconnect signal.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use tokio::sync::oneshot;

#[cfg(target_arch = "wasm32")]
use futures_channel::oneshot;

#[cfg(target_arch = "wasm32")]
use send_wrapper::SendWrapper;

/// Connection state of the backend bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionState {
    Disconnected = 0,
    Connecting = 1,
    Connected = 2,
    /// Connection lost, backing off before the next attempt
    Reconnecting = 3,
    /// Retries exhausted
    Failed = 4,
}

impl From<u8> for ConnectionState {
    fn from(raw: u8) -> Self {
        match raw {
            1 => Self::Connecting,
            2 => Self::Connected,
            3 => Self::Reconnecting,
            4 => Self::Failed,
            _ => Self::Disconnected,
        }
    }
}

/// Lock-free state cell written by the bridge task and read from the UI.
#[derive(Debug, Clone)]
pub struct StateCell(Arc<AtomicU8>);

impl StateCell {
    pub fn new(initial: ConnectionState) -> Self {
        Self(Arc::new(AtomicU8::new(initial as u8)))
    }

    pub fn get(&self) -> ConnectionState {
        ConnectionState::from(self.0.load(Ordering::Acquire))
    }

    pub fn set(&self, state: ConnectionState) {
        self.0.store(state as u8, Ordering::Release);
    }
}

impl Default for StateCell {
    fn default() -> Self {
        Self::new(ConnectionState::Disconnected)
    }
}

/// Handle returned by `create_connection`.
///
/// Dropping it does not close the bridge; call `disconnect()` for that.
pub struct ConnectionHandle {
    state: StateCell,
    disconnect_tx: oneshot::Sender<()>,
}

impl ConnectionHandle {
    pub fn new(state: StateCell, disconnect_tx: oneshot::Sender<()>) -> Self {
        Self {
            state,
            disconnect_tx,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state.get()
    }

    /// Ask the bridge task to close the socket and stop reconnecting.
    pub fn disconnect(self) {
        if self.disconnect_tx.send(()).is_err() {
            tracing::debug!("Bridge task already gone");
        }
    }
}

/// Read-only view of the connection state.
#[derive(Clone)]
pub struct ConnectionStateObserver(StateCell);

impl ConnectionStateObserver {
    pub fn new(state: StateCell) -> Self {
        Self(state)
    }

    pub fn state(&self) -> ConnectionState {
        self.0.get()
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }
}

/// Owns the `ConnectionHandle` for the lifetime of the app.
///
/// Put into Dioxus context by `main`, which is what keeps the disconnect
/// sender (and so the bridge task) alive.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone)]
pub struct ConnectionKeepAlive(Arc<std::sync::Mutex<Option<ConnectionHandle>>>);

#[cfg(target_arch = "wasm32")]
#[derive(Clone)]
pub struct ConnectionKeepAlive(SendWrapper<std::rc::Rc<std::cell::RefCell<Option<ConnectionHandle>>>>);

impl ConnectionKeepAlive {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(handle: ConnectionHandle) -> Self {
        Self(Arc::new(std::sync::Mutex::new(Some(handle))))
    }

    #[cfg(target_arch = "wasm32")]
    pub fn new(handle: ConnectionHandle) -> Self {
        Self(SendWrapper::new(std::rc::Rc::new(std::cell::RefCell::new(
            Some(handle),
        ))))
    }

    /// Close the bridge. Later calls are no-ops.
    pub fn disconnect(&self) {
        #[cfg(not(target_arch = "wasm32"))]
        let handle = self.0.lock().ok().and_then(|mut slot| slot.take());
        #[cfg(target_arch = "wasm32")]
        let handle = self.0.borrow_mut().take();

        if let Some(handle) = handle {
            tracing::info!(state = ?handle.state(), "Closing bridge");
            handle.disconnect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_cell_round_trips_every_state() {
        let cell = StateCell::default();
        assert_eq!(cell.get(), ConnectionState::Disconnected);

        for state in [
            ConnectionState::Connecting,
            ConnectionState::Connected,
            ConnectionState::Reconnecting,
            ConnectionState::Failed,
        ] {
            cell.set(state);
            assert_eq!(cell.get(), state);
        }
        assert_eq!(ConnectionState::from(200), ConnectionState::Disconnected);
    }

    #[test]
    fn test_observer_follows_bridge_updates() {
        let cell = StateCell::default();
        let observer = ConnectionStateObserver::new(cell.clone());
        assert!(!observer.is_connected());

        cell.set(ConnectionState::Connected);
        assert!(observer.is_connected());

        cell.set(ConnectionState::Failed);
        assert_eq!(observer.state(), ConnectionState::Failed);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_keep_alive_disconnects_once() {
        let (tx, mut rx) = oneshot::channel();
        let keep_alive = ConnectionKeepAlive::new(ConnectionHandle::new(StateCell::default(), tx));
        let shared = keep_alive.clone();

        keep_alive.disconnect();
        assert!(rx.try_recv().is_ok());

        // Second call finds the slot empty.
        shared.disconnect();
    }
}
