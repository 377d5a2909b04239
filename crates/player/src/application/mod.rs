//! Application layer
//!
//! `ViewController` owns the session state and translates between backend
//! events, user actions, and the rendering port.

pub mod controller;
pub mod services;
pub mod session;

pub use controller::ViewController;
pub use services::BackendService;
pub use session::SessionState;
