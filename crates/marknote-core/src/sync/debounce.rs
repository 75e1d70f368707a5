//! Single-slot debounce timer.

use std::future;
use std::time::Duration;

use tokio::time::{sleep_until, Instant};

/// One pending deadline at most. Restarting replaces the previous deadline,
/// so only the last restart before a quiet period ever fires.
#[derive(Debug, Clone)]
pub struct DebounceTimer {
    quiet_period: Duration,
    deadline: Option<Instant>,
}

impl DebounceTimer {
    pub const fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            deadline: None,
        }
    }

    /// Cancel any pending deadline and start a new quiet period from now.
    pub fn restart(&mut self) {
        self.deadline = Some(Instant::now() + self.quiet_period);
    }

    /// Cancel the pending deadline. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Resolves once the pending deadline passes and clears the slot.
    /// Never resolves while idle.
    ///
    /// Cancel-safe: dropping the future before it resolves leaves the
    /// deadline in place.
    pub async fn expired(&mut self) {
        let Some(deadline) = self.deadline else {
            return future::pending().await;
        };
        sleep_until(deadline).await;
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(500);

    #[tokio::test(start_paused = true)]
    async fn fires_after_quiet_period() {
        let mut timer = DebounceTimer::new(QUIET);
        let started = Instant::now();
        timer.restart();

        timer.expired().await;
        assert!(started.elapsed() >= QUIET);
        assert!(!timer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_pushes_the_deadline_back() {
        let mut timer = DebounceTimer::new(QUIET);
        let started = Instant::now();
        timer.restart();
        tokio::time::advance(Duration::from_millis(300)).await;
        timer.restart();

        timer.expired().await;
        assert!(started.elapsed() >= Duration::from_millis(800));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_never_fires() {
        let mut timer = DebounceTimer::new(QUIET);
        timer.restart();
        assert!(timer.cancel());
        assert!(!timer.cancel());

        let fired = tokio::time::timeout(Duration::from_secs(5), timer.expired()).await;
        assert!(fired.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_wait_keeps_deadline() {
        let mut timer = DebounceTimer::new(QUIET);
        timer.restart();
        let deadline = timer.deadline();

        let early = tokio::time::timeout(Duration::from_millis(100), timer.expired()).await;
        assert!(early.is_err());
        assert_eq!(timer.deadline(), deadline);
    }
}
