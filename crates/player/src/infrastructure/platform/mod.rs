//! Platform-specific implementations of `PlatformPort`
//!
//! Selected at compile time based on the target architecture.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
mod desktop;

#[cfg(target_arch = "wasm32")]
pub use wasm::{create_platform, WasmPlatform};

#[cfg(not(target_arch = "wasm32"))]
pub use desktop::{create_platform, DesktopPlatform};
