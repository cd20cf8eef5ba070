//! Tokio-backed [`Ticker`].

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::application::Ticker;

/// Fixed-period ticker built on [`tokio::time::Interval`].
///
/// The first tick completes immediately.  When a tick is late (the session
/// was stuck in a slow send) the schedule restarts from that moment rather
/// than firing a burst of catch-up ticks.
pub struct IntervalTicker {
    inner: Interval,
}

impl IntervalTicker {
    /// Creates a ticker firing every `period`.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero (same contract as [`tokio::time::interval`]);
    /// `StreamConfig` never produces a zero interval.
    pub fn new(period: Duration) -> Self {
        let mut inner = interval(period);
        inner.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { inner }
    }

    /// Time between two ticks.
    pub fn period(&self) -> Duration {
        self.inner.period()
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) {
        self.inner.tick().await;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_is_immediate() {
        let mut ticker = IntervalTicker::new(Duration::from_secs(1));
        let start = Instant::now();

        ticker.tick().await;

        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_are_one_period_apart() {
        let period = Duration::from_millis(50);
        let mut ticker = IntervalTicker::new(period);
        ticker.tick().await;
        let start = Instant::now();

        ticker.tick().await;
        ticker.tick().await;

        assert_eq!(start.elapsed(), period * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_tick_does_not_burst() {
        // Arrange: fall three periods behind.
        let period = Duration::from_millis(10);
        let mut ticker = IntervalTicker::new(period);
        ticker.tick().await;
        tokio::time::sleep(period * 3).await;

        // Act: the overdue tick fires at once, the next one a full period later.
        let start = Instant::now();
        ticker.tick().await;
        let overdue = start.elapsed();
        ticker.tick().await;

        // Assert
        assert_eq!(overdue, Duration::ZERO);
        assert_eq!(start.elapsed(), period);
    }

    #[tokio::test]
    async fn test_period_is_reported() {
        let ticker = IntervalTicker::new(Duration::from_millis(16));
        assert_eq!(ticker.period(), Duration::from_millis(16));
    }
}
