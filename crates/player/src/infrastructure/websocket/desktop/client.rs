//! Desktop bridge client using tokio-tungstenite

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, Mutex, RwLock};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use literaplay_shared::{BackendCall, BackendEvent};

use crate::infrastructure::messaging::ConnectionState;
use crate::infrastructure::websocket::shared::{encode_call, parse_backend_frame, MAX_RETRY_ATTEMPTS};
use crate::infrastructure::websocket::BackoffState;

type EventCallback = Box<dyn Fn(BackendEvent) + Send + Sync>;
type StateCallback = Box<dyn Fn(ConnectionState) + Send + Sync>;

/// WebSocket client for the backend bridge (desktop)
pub struct BridgeClient {
    url: String,
    state: Arc<RwLock<ConnectionState>>,
    tx: Arc<Mutex<Option<mpsc::Sender<BackendCall>>>>,
    on_event: Arc<Mutex<Option<EventCallback>>>,
    on_state_change: Arc<Mutex<Option<StateCallback>>>,
    /// Set by `disconnect()` so a close is not treated as a dropped connection
    intentional_disconnect: Arc<RwLock<bool>>,
}

impl BridgeClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            state: Arc::new(RwLock::new(ConnectionState::Disconnected)),
            tx: Arc::new(Mutex::new(None)),
            on_event: Arc::new(Mutex::new(None)),
            on_state_change: Arc::new(Mutex::new(None)),
            intentional_disconnect: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn set_on_event<F>(&self, callback: F)
    where
        F: Fn(BackendEvent) + Send + Sync + 'static,
    {
        *self.on_event.lock().await = Some(Box::new(callback));
    }

    pub async fn set_on_state_change<F>(&self, callback: F)
    where
        F: Fn(ConnectionState) + Send + Sync + 'static,
    {
        *self.on_state_change.lock().await = Some(Box::new(callback));
    }

    async fn set_state(&self, new_state: ConnectionState) {
        *self.state.write().await = new_state;

        let callback = self.on_state_change.lock().await;
        if let Some(ref cb) = *callback {
            cb(new_state);
        }
    }

    /// Run one connection to completion.
    ///
    /// Returns `Ok(true)` when an established connection closed unexpectedly.
    async fn connect_internal(&self) -> Result<bool> {
        self.set_state(ConnectionState::Connecting).await;

        let (ws_stream, _) = match connect_async(self.url.as_str()).await {
            Ok(connected) => connected,
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "Failed to connect to backend bridge");
                return Err(e.into());
            }
        };

        tracing::info!(url = %self.url, "Connected to backend bridge");
        let (tx, mut rx) = mpsc::channel::<BackendCall>(32);
        *self.tx.lock().await = Some(tx);
        self.set_state(ConnectionState::Connected).await;

        let (mut write, mut read) = ws_stream.split();

        let on_event = Arc::clone(&self.on_event);
        let intentional_disconnect = Arc::clone(&self.intentional_disconnect);

        let read_handle = tokio::spawn(async move {
            let mut unexpected_close = false;
            while let Some(msg) = read.next().await {
                match msg {
                    Ok(Message::Text(text)) => match parse_backend_frame(&text) {
                        Ok(event) => {
                            let callback = on_event.lock().await;
                            if let Some(ref cb) = *callback {
                                cb(event);
                            }
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Failed to parse bridge frame");
                        }
                    },
                    Ok(Message::Close(_)) => {
                        tracing::info!("Backend closed the bridge");
                        unexpected_close = !*intentional_disconnect.read().await;
                        break;
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Bridge socket error");
                        unexpected_close = true;
                        break;
                    }
                    _ => {}
                }
            }
            unexpected_close
        });

        let write_handle = tokio::spawn(async move {
            while let Some(call) = rx.recv().await {
                let frame = match encode_call(&call) {
                    Ok(frame) => frame,
                    Err(e) => {
                        tracing::error!(method = call.method(), error = %e, "Failed to encode call");
                        continue;
                    }
                };
                if let Err(e) = write.send(Message::Text(frame)).await {
                    tracing::error!(method = call.method(), error = %e, "Failed to write frame");
                    break;
                }
            }
            let _ = write.close().await;
        });

        let unexpected_close = tokio::select! {
            result = read_handle => {
                tracing::debug!("Bridge read task completed");
                result.unwrap_or(true)
            }
            _ = write_handle => {
                tracing::debug!("Bridge write task completed");
                !*self.intentional_disconnect.read().await
            }
        };

        *self.tx.lock().await = None;
        self.set_state(ConnectionState::Disconnected).await;
        Ok(unexpected_close)
    }

    /// Keep reconnecting with exponential backoff until connected, exhausted,
    /// or disconnected on purpose.
    async fn reconnect_with_backoff(&self) {
        let mut backoff = BackoffState::default();

        loop {
            let Some(delay) = backoff.next_delay_and_advance() else {
                tracing::error!("Max reconnection attempts reached, giving up");
                self.set_state(ConnectionState::Failed).await;
                return;
            };
            self.set_state(ConnectionState::Reconnecting).await;
            tracing::info!(
                attempt = backoff.attempts(),
                max_attempts = MAX_RETRY_ATTEMPTS,
                delay_ms = delay,
                "Reconnecting to backend bridge"
            );

            tokio::time::sleep(Duration::from_millis(delay)).await;

            if *self.intentional_disconnect.read().await {
                tracing::info!("Reconnection cancelled by disconnect");
                self.set_state(ConnectionState::Disconnected).await;
                return;
            }

            match self.connect_internal().await {
                Ok(true) if !*self.intentional_disconnect.read().await => {
                    // It was up for a while; start the budget over.
                    backoff.reset();
                }
                Ok(_) => return,
                Err(e) => {
                    tracing::warn!(attempt = backoff.attempts(), error = %e, "Reconnection attempt failed");
                }
            }
        }
    }

    /// Connect and stay connected until `disconnect()`.
    ///
    /// The bridge may come up after the view, so a failed first attempt also
    /// enters the backoff loop.
    pub async fn connect(&self) {
        *self.intentional_disconnect.write().await = false;

        match self.connect_internal().await {
            Ok(false) => {}
            Ok(true) => {
                if !*self.intentional_disconnect.read().await {
                    tracing::info!("Bridge closed unexpectedly, reconnecting");
                    self.reconnect_with_backoff().await;
                }
            }
            Err(_) => self.reconnect_with_backoff().await,
        }
    }

    pub async fn send(&self, call: BackendCall) -> Result<()> {
        // Clone the sender to avoid holding the lock across await
        let tx = self.tx.lock().await.clone();
        match tx {
            Some(tx) => {
                tx.send(call).await?;
                Ok(())
            }
            None => Err(anyhow::anyhow!("Not connected")),
        }
    }

    pub async fn disconnect(&self) {
        *self.intentional_disconnect.write().await = true;
        *self.tx.lock().await = None;
        self.set_state(ConnectionState::Disconnected).await;
    }
}

impl Clone for BridgeClient {
    fn clone(&self) -> Self {
        Self {
            url: self.url.clone(),
            state: Arc::clone(&self.state),
            tx: Arc::clone(&self.tx),
            on_event: Arc::clone(&self.on_event),
            on_state_change: Arc::clone(&self.on_state_change),
            intentional_disconnect: Arc::clone(&self.intentional_disconnect),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_before_connect_fails() {
        let client = BridgeClient::new("ws://127.0.0.1:9/bridge");
        let result = client.send(BackendCall::RequestInitialState).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_disconnect_reports_state() {
        let client = BridgeClient::new("ws://127.0.0.1:9/bridge");
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));

        let seen_clone = Arc::clone(&seen);
        client
            .set_on_state_change(move |state| seen_clone.lock().unwrap().push(state))
            .await;
        client.disconnect().await;

        assert_eq!(*seen.lock().unwrap(), vec![ConnectionState::Disconnected]);
        assert!(*client.intentional_disconnect.read().await);
    }
}
