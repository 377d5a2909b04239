//! WebSocket Bridge - connects CommandBus/EventBus to the BridgeClient.
//!
//! `create_connection` sets up:
//! - a CommandBus for queueing calls
//! - a background task that forwards calls to the socket and decoded frames
//!   to the caller's EventBus
//!
//! `connection-ready` is raised here, every time the client reaches the
//! connected state, ahead of any frame from that connection.

use literaplay_shared::{BackendCall, BackendEvent};

use crate::infrastructure::messaging::{
    CommandBus, ConnectionHandle, ConnectionState, ConnectionStateObserver, EventBus, StateCell,
};

#[cfg(not(target_arch = "wasm32"))]
use crate::infrastructure::messaging::command_bus::COMMAND_QUEUE_CAPACITY;
#[cfg(not(target_arch = "wasm32"))]
use tokio::sync::{mpsc, oneshot};

#[cfg(target_arch = "wasm32")]
use futures_channel::{mpsc, oneshot};

/// Result of creating a connection.
pub struct Connection {
    pub command_bus: CommandBus,
    pub handle: ConnectionHandle,
    pub state_observer: ConnectionStateObserver,
}

// =============================================================================
// Desktop Implementation (tokio)
// =============================================================================

/// Start the bridge. Must be called inside a tokio runtime.
///
/// Subscribe to `event_bus` before calling this so no event is missed.
#[cfg(not(target_arch = "wasm32"))]
pub fn create_connection(url: &str, event_bus: EventBus) -> Connection {
    use super::desktop::BridgeClient;

    let (cmd_tx, cmd_rx) = mpsc::channel::<BackendCall>(COMMAND_QUEUE_CAPACITY);
    let (disconnect_tx, disconnect_rx) = oneshot::channel::<()>();
    let state = StateCell::default();

    let command_bus = CommandBus::new(cmd_tx);
    let state_observer = ConnectionStateObserver::new(state.clone());

    let client = BridgeClient::new(url);
    let state_for_bridge = state.clone();
    tokio::spawn(async move {
        desktop_bridge_task(client, cmd_rx, disconnect_rx, event_bus, state_for_bridge).await;
    });

    let handle = ConnectionHandle::new(state, disconnect_tx);

    Connection {
        command_bus,
        handle,
        state_observer,
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn desktop_bridge_task(
    client: super::desktop::BridgeClient,
    mut cmd_rx: mpsc::Receiver<BackendCall>,
    mut disconnect_rx: oneshot::Receiver<()>,
    event_bus: EventBus,
    state: StateCell,
) {
    // Single ordered queue for everything headed to the event bus
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<BackendEvent>();

    let state_for_callback = state.clone();
    let ready_tx = event_tx.clone();
    client
        .set_on_state_change(move |conn_state| {
            tracing::debug!(state = ?conn_state, "Bridge state changed");
            state_for_callback.set(conn_state);
            if conn_state == ConnectionState::Connected {
                let _ = ready_tx.send(BackendEvent::ConnectionReady);
            }
        })
        .await;

    client
        .set_on_event(move |event| {
            let _ = event_tx.send(event);
        })
        .await;

    let runner = client.clone();
    let connect_task = tokio::spawn(async move {
        runner.connect().await;
    });

    loop {
        tokio::select! {
            _ = &mut disconnect_rx => {
                tracing::info!("Disconnect requested");
                client.disconnect().await;
                connect_task.abort();
                state.set(ConnectionState::Disconnected);
                break;
            }

            Some(event) = event_rx.recv() => {
                event_bus.dispatch(event).await;
            }

            Some(call) = cmd_rx.recv() => {
                let method = call.method();
                if let Err(e) = client.send(call).await {
                    tracing::error!(method = %method, error = %e, "Failed to send call");
                }
            }

            else => break,
        }
    }
}

// =============================================================================
// WASM Implementation
// =============================================================================

/// Start the bridge on the browser event loop.
#[cfg(target_arch = "wasm32")]
pub fn create_connection(url: &str, event_bus: EventBus) -> Connection {
    use super::wasm::BridgeClient;
    use wasm_bindgen_futures::spawn_local;

    let (cmd_tx, cmd_rx) = mpsc::unbounded::<BackendCall>();
    let (disconnect_tx, disconnect_rx) = oneshot::channel::<()>();
    let state = StateCell::default();

    let command_bus = CommandBus::new(cmd_tx);
    let state_observer = ConnectionStateObserver::new(state.clone());

    let client = BridgeClient::new(url);
    let state_for_bridge = state.clone();
    spawn_local(async move {
        wasm_bridge_task(client, cmd_rx, disconnect_rx, event_bus, state_for_bridge).await;
    });

    let handle = ConnectionHandle::new(state, disconnect_tx);

    Connection {
        command_bus,
        handle,
        state_observer,
    }
}

#[cfg(target_arch = "wasm32")]
async fn wasm_bridge_task(
    client: super::wasm::BridgeClient,
    mut cmd_rx: mpsc::UnboundedReceiver<BackendCall>,
    disconnect_rx: oneshot::Receiver<()>,
    event_bus: EventBus,
    state: StateCell,
) {
    use futures_util::future::{select, Either};
    use futures_util::StreamExt;

    let state_for_callback = state.clone();
    let bus_for_ready = event_bus.clone();
    client.set_on_state_change(move |conn_state| {
        tracing::debug!(state = ?conn_state, "Bridge state changed");
        state_for_callback.set(conn_state);
        if conn_state == ConnectionState::Connected {
            bus_for_ready.dispatch(BackendEvent::ConnectionReady);
        }
    });

    let bus_for_events = event_bus.clone();
    client.set_on_event(move |event| {
        bus_for_events.dispatch(event);
    });

    if let Err(e) = client.connect() {
        tracing::error!(error = %e, "Failed to open bridge socket");
        state.set(ConnectionState::Failed);
        return;
    }

    let mut disconnect_rx = disconnect_rx;
    loop {
        match select(cmd_rx.next(), &mut disconnect_rx).await {
            Either::Left((Some(call), _)) => {
                if let Err(e) = client.send(&call) {
                    tracing::error!(method = %call.method(), error = %e, "Failed to send call");
                }
            }
            Either::Left((None, _)) => {
                tracing::info!("Command channel closed");
                break;
            }
            Either::Right((_, _)) => {
                tracing::info!("Disconnect requested");
                client.disconnect();
                state.set(ConnectionState::Disconnected);
                break;
            }
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_calls_queue_while_bridge_starts() {
        // Port 9 (discard) refuses WebSocket upgrades; the client just backs off.
        let connection = create_connection("ws://127.0.0.1:9/bridge", EventBus::new());

        assert!(!connection.state_observer.is_connected());
        assert!(connection
            .command_bus
            .send(BackendCall::RequestInitialState)
            .is_ok());

        connection.handle.disconnect();
    }

    #[tokio::test]
    async fn test_connection_ready_precedes_first_frame() {
        use futures_util::{SinkExt, StreamExt};
        use std::time::Duration;
        use tokio::net::TcpListener;
        use tokio::time::timeout;
        use tokio_tungstenite::{accept_async, tungstenite::Message};

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("ws://{}/bridge", listener.local_addr().unwrap());

        // Backend side: push frames right after the handshake, then report
        // the first call it receives.
        let (call_tx, call_rx) = oneshot::channel::<String>();
        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();
            ws.send(Message::Text(r#"{"type":"connection-ready"}"#.to_string()))
                .await
                .unwrap();
            ws.send(Message::Text(
                r#"{"type":"chat-error","message":"timeout"}"#.to_string(),
            ))
            .await
            .unwrap();
            while let Some(Ok(msg)) = ws.next().await {
                if let Message::Text(text) = msg {
                    let _ = call_tx.send(text);
                    break;
                }
            }
        });

        let (seen_tx, mut seen_rx) = mpsc::unbounded_channel::<BackendEvent>();
        let event_bus = EventBus::new();
        event_bus
            .subscribe(move |event| {
                let _ = seen_tx.send(event);
            })
            .await;
        let connection = create_connection(&url, event_bus);

        let mut seen = Vec::new();
        for _ in 0..3 {
            let event = timeout(Duration::from_secs(5), seen_rx.recv())
                .await
                .unwrap()
                .unwrap();
            seen.push(event);
        }
        assert_eq!(
            seen,
            vec![
                BackendEvent::ConnectionReady,
                // The backend's own connection-ready is not passed through.
                BackendEvent::Unknown,
                BackendEvent::ChatError {
                    message: "timeout".into()
                },
            ]
        );
        assert!(connection.state_observer.is_connected());

        connection
            .command_bus
            .send(BackendCall::RequestInitialState)
            .unwrap();
        let frame = timeout(Duration::from_secs(5), call_rx)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(frame, r#"{"type":"request_initial_state"}"#);

        connection.handle.disconnect();
    }
}
