use crate::domain::ports::Throttle;
use async_trait::async_trait;
use std::time::Duration;

pub const DEFAULT_RECORD_DELAY: Duration = Duration::from_secs(2);

/// Unconditional sleep of the same length after every record.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl Default for FixedDelay {
    fn default() -> Self {
        Self(DEFAULT_RECORD_DELAY)
    }
}

#[async_trait]
impl Throttle for FixedDelay {
    async fn pause(&self, record_index: usize) {
        if self.0.is_zero() {
            return;
        }
        tracing::debug!("Sleeping {:?} after record {}", self.0, record_index + 1);
        tokio::time::sleep(self.0).await;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Throttle for NoDelay {
    async fn pause(&self, _record_index: usize) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_sleeps_full_interval() {
        let start = tokio::time::Instant::now();
        FixedDelay::default().pause(0).await;
        assert!(start.elapsed() >= DEFAULT_RECORD_DELAY);
    }

    #[test]
    fn test_no_delay_returns_immediately() {
        tokio_test::block_on(NoDelay.pause(3));
        tokio_test::block_on(FixedDelay(Duration::ZERO).pause(0));
    }
}
