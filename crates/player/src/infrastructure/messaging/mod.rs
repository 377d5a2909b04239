//! Command Bus and Event Bus messaging infrastructure.
//!
//! - `CommandBus`: queue calls for the backend (fire-and-forget)
//! - `EventBus`: receive backend events (push-based subscription)
//! - `ConnectionHandle`: bridge lifecycle
//!
//! The WebSocket bridge (in the websocket module) connects these buses to the transport.

pub mod command_bus;
pub mod connection;
pub mod event_bus;

pub use command_bus::CommandBus;
pub use connection::{
    ConnectionHandle, ConnectionKeepAlive, ConnectionState, ConnectionStateObserver, StateCell,
};
pub use event_bus::EventBus;
