//! LiteraPlay player crate.
//!
//! The chat client view: UI components, the view controller, and the bridge
//! transport to the backend. Desktop and browser builds are selected with
//! compile-time `cfg`.

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;
pub mod ui;

pub use config::PlayerConfig;
pub use ui::app;
