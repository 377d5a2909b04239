//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure and UI adapters must
//! implement, allowing the view controller to drive the backend and the
//! screen without depending on concrete implementations.

pub mod backend_port;
pub mod platform_port;
pub mod view_port;

pub use backend_port::BackendPort;
#[cfg(test)]
pub use backend_port::MockBackendPort;
pub use platform_port::PlatformPort;
pub use view_port::{
    ApiStatus, Bubble, BubbleRole, CardAction, ChatHeader, LibraryCard, ProgressView, Screen,
    SituationCard, StatusTone, ViewPort,
};
