//! Browser platform implementation

use std::{future::Future, pin::Pin};

use crate::ports::outbound::PlatformPort;

/// Browser platform services backed by `setTimeout`
#[derive(Clone, Default)]
pub struct WasmPlatform;

impl PlatformPort for WasmPlatform {
    fn sleep_ms(&self, ms: u64) -> Pin<Box<dyn Future<Output = ()> + 'static>> {
        Box::pin(gloo_timers::future::TimeoutFuture::new(
            ms.min(u32::MAX as u64) as u32,
        ))
    }
}

pub fn create_platform() -> WasmPlatform {
    WasmPlatform
}
