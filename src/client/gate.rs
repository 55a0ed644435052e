//! Outbound request throttling.

use std::num::NonZeroU32;
use std::sync::Arc;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};

/// Shared gate every remote call passes through.
///
/// Calls proceed immediately while the per-second quota has capacity and are
/// delayed once it is spent. Cloning shares the same quota.
#[derive(Clone)]
pub struct RateGate {
    limiter: Arc<DefaultDirectRateLimiter>,
    per_second: NonZeroU32,
}

impl RateGate {
    pub fn per_second(per_second: NonZeroU32) -> Self {
        let quota = Quota::per_second(per_second).allow_burst(per_second);
        Self {
            limiter: Arc::new(RateLimiter::direct(quota)),
            per_second,
        }
    }

    /// Wait until one request may be issued.
    pub async fn acquire(&self) {
        self.limiter.until_ready().await;
    }

    pub fn quota(&self) -> NonZeroU32 {
        self.per_second
    }
}

impl std::fmt::Debug for RateGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateGate")
            .field("per_second", &self.per_second)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_burst_within_quota_is_not_delayed() {
        let gate = RateGate::per_second(NonZeroU32::new(10).unwrap());
        let start = std::time::Instant::now();
        for _ in 0..10 {
            gate.acquire().await;
        }
        assert!(start.elapsed() < std::time::Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_clones_share_quota() {
        let gate = RateGate::per_second(NonZeroU32::new(1).unwrap());
        let other = gate.clone();
        gate.acquire().await;
        let start = std::time::Instant::now();
        other.acquire().await;
        assert!(start.elapsed() >= std::time::Duration::from_millis(500));
    }
}
