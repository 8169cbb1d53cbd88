//! Time sources for the transient-message timer
//!
//! The controller never sleeps. It asks a [`Clock`] for the current time and
//! fires a due restore from [`tick`](crate::controller::KeypadController::tick).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Millisecond time source
pub trait Clock {
    /// Current time in milliseconds
    fn now_ms(&self) -> u64;
}

/// Monotonic clock counting from construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Creates a clock starting at zero
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Manually advanced clock
///
/// Clones share the same time, so a test can keep a handle while the
/// controller owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    current_ms: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock at time zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock at the given time
    #[must_use]
    pub fn at(time_ms: u64) -> Self {
        Self {
            current_ms: Arc::new(AtomicU64::new(time_ms)),
        }
    }

    /// Advances the clock
    pub fn advance(&self, duration: Duration) {
        let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self.advance_ms(ms);
    }

    /// Advances the clock by milliseconds
    pub fn advance_ms(&self, ms: u64) {
        // saturating add, a wrapped clock would fire every pending restore
        let _ = self
            .current_ms
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |t| {
                Some(t.saturating_add(ms))
            });
    }

    /// Sets the clock to an absolute time
    pub fn set_ms(&self, time_ms: u64) {
        self.current_ms.store(time_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.current_ms.load(Ordering::SeqCst)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
