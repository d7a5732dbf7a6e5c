//! Time abstraction and single-shot discard timers.
//!
//! A [`TimerService`] hands out [`UniqueTimer`] handles that arm a one-shot
//! deadline carrying the COUNT of the PDU they guard. Timers never invoke
//! callbacks on their own: the bearer's executor drains expired deadlines
//! with [`TimerService::take_expired`] and feeds the COUNTs back to the
//! entity, so expiry handling runs on the same logical scheduler as every
//! other entrypoint. Dropping a handle cancels its deadline, which makes
//! "erase the map entry" and "cancel the timer" a single operation.
//!
//! Time itself is read through the [`Clock`] trait so tests can drive
//! deadlines deterministically with a [`mock_clock::MockClock`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::types::Count;

/// A trait abstracting the concept of "now" to allow for time mocking in tests.
pub trait Clock: Send + Sync + Debug {
    /// Current `Instant`.
    fn now(&self) -> Instant;
}

/// The default system clock implementation using `std::time::Instant`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug)]
struct ArmedTimer {
    expires_at: Instant,
    count: Count,
}

#[derive(Debug)]
struct TimerInner {
    clock: Arc<dyn Clock>,
    next_id: u64,
    armed: BTreeMap<u64, ArmedTimer>,
}

/// Factory and queue for single-shot millisecond timers.
///
/// The service is single-threaded by design (one per bearer task); handles
/// keep a weak reference back to it, so a handle outliving its service
/// degrades to a no-op instead of dangling.
#[derive(Debug, Clone)]
pub struct TimerService {
    inner: Rc<RefCell<TimerInner>>,
}

impl TimerService {
    /// Creates a timer service reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(TimerInner {
                clock,
                next_id: 0,
                armed: BTreeMap::new(),
            })),
        }
    }

    /// Creates a fresh, unarmed timer handle.
    pub fn create_timer(&self) -> UniqueTimer {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        UniqueTimer {
            id,
            pending: None,
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Drains every deadline that has expired by now, earliest first.
    ///
    /// Returns the COUNTs the expired timers were armed with. The caller is
    /// expected to be the bearer executor, which hands them to
    /// [`PdcpTxEntity::run_expired_timers`](crate::entity::PdcpTxEntity::run_expired_timers).
    pub fn take_expired(&self) -> Vec<Count> {
        let mut inner = self.inner.borrow_mut();
        let now = inner.clock.now();
        let expired: Vec<u64> = inner
            .armed
            .iter()
            .filter(|(_, timer)| timer.expires_at <= now)
            .map(|(&id, _)| id)
            .collect();

        let mut fired: Vec<(Instant, u64, Count)> = Vec::with_capacity(expired.len());
        for id in expired {
            if let Some(timer) = inner.armed.remove(&id) {
                fired.push((timer.expires_at, id, timer.count));
            }
        }
        fired.sort_by_key(|&(expires_at, id, _)| (expires_at, id));
        fired.into_iter().map(|(_, _, count)| count).collect()
    }

    /// Number of currently armed timers.
    pub fn armed_count(&self) -> usize {
        self.inner.borrow().armed.len()
    }
}

/// A single-shot timer handle. `set` then `run` to arm it; dropping the
/// handle cancels the deadline.
#[derive(Debug)]
pub struct UniqueTimer {
    id: u64,
    pending: Option<(Duration, Count)>,
    inner: Weak<RefCell<TimerInner>>,
}

impl UniqueTimer {
    /// Programs duration and payload without starting the timer.
    pub fn set(&mut self, duration: Duration, count: Count) {
        self.pending = Some((duration, count));
    }

    /// Arms the programmed deadline relative to the service clock's now.
    /// Re-running a timer re-arms it from scratch.
    pub fn run(&mut self) {
        let Some((duration, count)) = self.pending else {
            return;
        };
        if let Some(inner) = self.inner.upgrade() {
            let mut inner = inner.borrow_mut();
            let expires_at = inner.clock.now() + duration;
            inner.armed.insert(self.id, ArmedTimer { expires_at, count });
        }
    }

    /// Cancels the deadline if it has not fired yet.
    pub fn stop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().armed.remove(&self.id);
        }
    }

    /// Whether the timer is armed and has not fired or been cancelled.
    pub fn is_running(&self) -> bool {
        self.inner
            .upgrade()
            .is_some_and(|inner| inner.borrow().armed.contains_key(&self.id))
    }
}

impl Drop for UniqueTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Test utilities for mocking time.
pub mod mock_clock {
    use super::*;
    use std::sync::Mutex;

    /// A mock clock that allows for manual control over the current time in tests.
    #[derive(Debug)]
    pub struct MockClock {
        current_time: Mutex<Instant>,
    }

    impl MockClock {
        /// Creates a new `MockClock` starting at the given `start_time`.
        pub fn new(start_time: Instant) -> Self {
            Self {
                current_time: Mutex::new(start_time),
            }
        }

        /// Advances the mock clock's current time by the specified duration.
        pub fn advance(&self, duration: Duration) {
            let mut current = self.current_time.lock().unwrap();
            *current += duration;
        }
    }

    impl Default for MockClock {
        fn default() -> Self {
            Self::new(Instant::now())
        }
    }

    impl Clock for MockClock {
        fn now(&self) -> Instant {
            *self.current_time.lock().unwrap()
        }
    }
}
