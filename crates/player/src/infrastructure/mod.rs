pub mod messaging;
pub mod platform;
pub mod websocket;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use messaging::{CommandBus, ConnectionState, EventBus};
