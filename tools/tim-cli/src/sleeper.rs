//! Tokio-backed timer for the storefront's simulated waits.

use std::time::Duration;

use async_trait::async_trait;
use tim_commerce::timer::Sleeper;

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait(?Send)]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
