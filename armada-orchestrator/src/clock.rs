//! Sleep capability
//!
//! The poll loop waits through this trait instead of calling
//! `tokio::time::sleep` directly, so tests can substitute a recording fake
//! and run scripted status sequences without real delays.

use std::time::Duration;

use async_trait::async_trait;

/// Injectable sleep capability for the poll loop
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Waits for the given duration
    async fn sleep(&self, duration: Duration);
}

/// Production sleeper backed by the tokio timer
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
