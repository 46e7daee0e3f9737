//! Interrupt-to-task wake notification.
//!
//! A `WakeSignal` holds at most one pending wake. Posting while a wake is
//! already pending does nothing, so a slow consumer handles several timer
//! ticks as a single cycle. The wake carries no payload: the woken task
//! re-reads `SharedState`, which always holds the current values.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

pub struct WakeSignal {
    inner: Signal<CriticalSectionRawMutex, ()>,
}

impl WakeSignal {
    pub const fn new() -> Self {
        Self {
            inner: Signal::new(),
        }
    }

    /// Marks a wake as pending. Never blocks; safe from interrupt context.
    pub fn post(&self) {
        self.inner.signal(());
    }

    /// Parks the calling task until a wake is pending, then consumes it.
    pub async fn wait(&self) {
        self.inner.wait().await
    }

    /// Consumes a pending wake without waiting. Returns `false` if none was
    /// pending.
    pub fn try_take(&self) -> bool {
        self.inner.try_take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.inner.signaled()
    }
}

impl Default for WakeSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_futures::select::{select, Either};

    #[test]
    fn starts_idle() {
        let wake = WakeSignal::new();
        assert!(!wake.is_pending());
        assert!(!wake.try_take());
    }

    #[test]
    fn double_post_collapses_to_one_wake() {
        let wake = WakeSignal::new();
        wake.post();
        wake.post();

        block_on(wake.wait());
        assert!(!wake.is_pending());
        assert!(!wake.try_take());
    }

    #[test]
    fn wait_blocks_until_posted() {
        let wake = WakeSignal::new();
        // `ready` resolves on first poll, so the wait must lose the race
        let first = block_on(select(wake.wait(), core::future::ready(())));
        assert!(matches!(first, Either::Second(())));

        wake.post();
        let second = block_on(select(wake.wait(), core::future::pending::<()>()));
        assert!(matches!(second, Either::First(())));
    }

    #[test]
    fn post_from_another_thread_wakes_waiter() {
        static WAKE: WakeSignal = WakeSignal::new();

        let poster = std::thread::spawn(|| {
            std::thread::sleep(std::time::Duration::from_millis(10));
            WAKE.post();
        });
        block_on(WAKE.wait());
        poster.join().unwrap();
        assert!(!WAKE.is_pending());
    }
}
