//! Nonce manager for signed requests with monotonic guarantees.
//!
//! The venue rejects replayed or non-increasing nonces, and a raw clock
//! read can repeat within a microsecond or step backwards. The counter
//! here is seeded from the clock once and advanced with a CAS loop, so
//! every caller sharing one credential pair observes strictly increasing
//! values.

use std::sync::atomic::{AtomicU64, Ordering};

/// Trait for obtaining current time, enabling testability.
pub trait Clock: Send + Sync {
    /// Returns current time in microseconds since the Unix epoch.
    fn now_micros(&self) -> u64;
}

/// System clock implementation using real time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_micros(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system time before Unix epoch")
            .as_micros() as u64
    }
}

/// Issues strictly increasing nonces for one credential pair.
///
/// # Guarantees
/// - `next()` never returns a value <= any previously returned value
/// - Values track wall-clock microseconds while the clock advances
/// - Thread-safe via CAS loop, no lock held
pub struct NonceManager<C: Clock> {
    /// Last issued nonce.
    counter: AtomicU64,
    /// Clock source for current time.
    clock: C,
}

impl<C: Clock> NonceManager<C> {
    /// Creates a new `NonceManager`, seeding the counter from the clock
    /// so nonces start at the current timestamp rather than zero.
    #[must_use]
    pub fn new(clock: C) -> Self {
        let now = clock.now_micros();
        Self {
            counter: AtomicU64::new(now),
            clock,
        }
    }

    /// Returns the next nonce: `max(last + 1, now_micros)`.
    pub fn next(&self) -> u64 {
        let target = self.clock.now_micros();

        loop {
            let current = self.counter.load(Ordering::Acquire);
            let next_val = current.saturating_add(1).max(target);

            match self.counter.compare_exchange_weak(
                current,
                next_val,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return next_val,
                Err(_) => continue,
            }
        }
    }
}

impl NonceManager<SystemClock> {
    /// Creates a new `NonceManager` with the system clock.
    #[must_use]
    pub fn with_system_clock() -> Self {
        Self::new(SystemClock)
    }
}
