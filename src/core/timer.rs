//! Cancellable one-shot timers.
//!
//! The core arms a [`TimerHandle`] and keeps a clone next to the state it
//! guards; the event loop owns the sleeping task. Cancelling the handle stops
//! the task before it dispatches its completion.

use std::fmt;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct TimerHandle {
    id: TimerId,
    token: CancellationToken,
}

impl TimerHandle {
    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Sleep for `delay`. Returns false if the handle was cancelled first.
    pub async fn sleep(&self, delay: Duration) -> bool {
        tokio::select! {
            _ = self.token.cancelled() => false,
            _ = tokio::time::sleep(delay) => true,
        }
    }
}

#[derive(Debug, Default)]
pub struct TimerRegistry {
    next_id: u64,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self) -> TimerHandle {
        self.next_id += 1;
        TimerHandle {
            id: TimerId(self.next_id),
            token: CancellationToken::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn armed_timers_get_distinct_ids() {
        let mut registry = TimerRegistry::new();
        let first = registry.arm();
        let second = registry.arm();
        assert_ne!(first.id(), second.id());
        assert!(first.id() < second.id());
    }

    #[tokio::test(start_paused = true)]
    async fn sleep_completes_when_not_cancelled() {
        let handle = TimerRegistry::new().arm();
        assert!(handle.sleep(Duration::from_millis(1000)).await);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_interrupts_a_pending_sleep() {
        let handle = TimerRegistry::new().arm();
        let sleeper = handle.clone();
        let task = tokio::spawn(async move { sleeper.sleep(Duration::from_secs(2)).await });

        tokio::task::yield_now().await;
        handle.cancel();

        assert!(!task.await.expect("timer task should join"));
        assert!(handle.is_cancelled());
    }
}
