//! Desktop platform implementation

use std::{future::Future, pin::Pin};

use crate::ports::outbound::PlatformPort;

/// Desktop platform services backed by the tokio timer
#[derive(Clone, Default)]
pub struct DesktopPlatform;

impl PlatformPort for DesktopPlatform {
    fn sleep_ms(&self, ms: u64) -> Pin<Box<dyn Future<Output = ()> + 'static>> {
        Box::pin(async move {
            tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
        })
    }
}

pub fn create_platform() -> DesktopPlatform {
    DesktopPlatform
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sleep_waits_requested_time() {
        let start = tokio::time::Instant::now();
        create_platform().sleep_ms(50).await;
        assert!(start.elapsed() >= std::time::Duration::from_millis(50));
    }
}
