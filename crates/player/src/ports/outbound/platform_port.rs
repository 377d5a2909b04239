//! PlatformPort - platform services needed by the UI adapter
//!
//! Use via Dioxus context: `use_context::<Arc<dyn PlatformPort>>()`

use std::{future::Future, pin::Pin};

/// Platform services port.
///
/// Implemented per target in `infrastructure::platform`.
pub trait PlatformPort: Send + Sync {
    /// Sleep for the given number of milliseconds
    ///
    /// Used to avoid `#[cfg]` branches in UI code (e.g. deferred scrolling).
    fn sleep_ms(&self, ms: u64) -> Pin<Box<dyn Future<Output = ()> + 'static>>;
}
