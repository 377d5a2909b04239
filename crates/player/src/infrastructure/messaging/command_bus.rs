//! Command Bus for sending calls to the backend.
//!
//! Every call is fire-and-forget. The backend answers with separate events
//! on the `EventBus`; there is no request/response correlation on this side.

use anyhow::Result;
use literaplay_shared::BackendCall;

#[cfg(not(target_arch = "wasm32"))]
use tokio::sync::mpsc;

#[cfg(target_arch = "wasm32")]
use futures_channel::mpsc;
#[cfg(target_arch = "wasm32")]
use send_wrapper::SendWrapper;

/// Capacity of the desktop command queue
#[cfg(not(target_arch = "wasm32"))]
pub const COMMAND_QUEUE_CAPACITY: usize = 32;

/// Command bus for sending calls to the backend bridge.
///
/// This is a concrete struct (not a trait) that can be cloned and shared.
/// `BackendService` wraps it to implement the outbound port.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone)]
pub struct CommandBus {
    tx: mpsc::Sender<BackendCall>,
}

#[cfg(target_arch = "wasm32")]
#[derive(Clone)]
pub struct CommandBus {
    tx: SendWrapper<mpsc::UnboundedSender<BackendCall>>,
}

#[cfg(not(target_arch = "wasm32"))]
impl CommandBus {
    pub fn new(tx: mpsc::Sender<BackendCall>) -> Self {
        Self { tx }
    }

    /// Queue a call for the bridge task.
    ///
    /// Returns immediately. Fails only when the queue is full or the bridge
    /// task has gone away.
    pub fn send(&self, call: BackendCall) -> Result<()> {
        self.tx
            .try_send(call)
            .map_err(|e| anyhow::anyhow!("CommandBus send failed: {}", e))
    }
}

#[cfg(target_arch = "wasm32")]
impl CommandBus {
    pub fn new(tx: mpsc::UnboundedSender<BackendCall>) -> Self {
        Self {
            tx: SendWrapper::new(tx),
        }
    }

    /// Queue a call for the bridge task.
    pub fn send(&self, call: BackendCall) -> Result<()> {
        self.tx
            .unbounded_send(call)
            .map_err(|e| anyhow::anyhow!("CommandBus send failed: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn test_send_call() {
        let (tx, mut rx) = mpsc::channel(10);
        let bus = CommandBus::new(tx);

        bus.send(BackendCall::VerifyApiKey {
            key: "AIza-123".into(),
        })
        .unwrap();

        let received = rx.recv().await.unwrap();
        assert!(matches!(
            received,
            BackendCall::VerifyApiKey { ref key } if key == "AIza-123"
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn test_send_fails_when_bridge_is_gone() {
        let (tx, rx) = mpsc::channel(1);
        let bus = CommandBus::new(tx);
        drop(rx);

        assert!(bus.send(BackendCall::RequestInitialState).is_err());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn test_send_fails_when_queue_is_full() {
        let (tx, _rx) = mpsc::channel(1);
        let bus = CommandBus::new(tx);

        bus.send(BackendCall::RequestInitialState).unwrap();
        assert!(bus.send(BackendCall::RequestInitialState).is_err());
    }
}
