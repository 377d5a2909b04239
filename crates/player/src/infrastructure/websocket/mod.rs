//! WebSocket transport for the backend bridge
//!
//! Platform-specific clients live in submodules:
//! - `desktop`: tokio-tungstenite based client
//! - `wasm`: web-sys WebSocket based client

mod backoff;
mod bridge;
mod shared;

#[cfg(not(target_arch = "wasm32"))]
mod desktop;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use bridge::{create_connection, Connection};

pub(crate) use backoff::BackoffState;

#[cfg(not(target_arch = "wasm32"))]
pub use desktop::BridgeClient;

#[cfg(target_arch = "wasm32")]
pub use wasm::BridgeClient;
