use portable_atomic::{AtomicU64, Ordering};

use crate::EntropySource;

/// Number of counter bits mixed into the least-significant end of the fill
/// bits. Ids generated within the same tick differ in at least these bits.
pub(crate) const COUNTER_BITS: usize = 32;

/// Upper bound (exclusive) for the random initial counter value, leaving
/// plenty of headroom before the 32-bit mixed portion wraps.
const INITIAL_MAX: u64 = 512 * 1024 * 1024;

/// A capability handing out process-wide generation counter values.
///
/// Implementations must guarantee that no two concurrent calls observe the
/// same value.
pub trait CounterSource {
    /// Returns the next counter value.
    fn next(&self) -> u64;
}

/// A process-lifetime monotonically incrementing counter.
///
/// Seeded once at construction to a random value below `2^29`, then
/// atomically incremented on every generation call. Wraps modulo the mixed
/// bit-width, which only matters after `2^32` ids within a single 50ns tick.
pub struct AtomicCounter {
    value: AtomicU64,
}

impl AtomicCounter {
    /// Creates a counter seeded from `entropy`.
    pub fn seeded<R: EntropySource>(entropy: &R) -> Self {
        let mut seed = [0u8; 8];
        entropy.fill(&mut seed);
        Self::from_value(u64::from_be_bytes(seed) % INITIAL_MAX)
    }

    /// Creates a counter starting at an explicit value. Useful for
    /// deterministic sequences in tests.
    #[must_use]
    pub const fn from_value(value: u64) -> Self {
        Self {
            value: AtomicU64::new(value),
        }
    }
}

impl CounterSource for AtomicCounter {
    fn next(&self) -> u64 {
        self.value.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ThreadRandom;

    #[test]
    fn counter_increments_per_call() {
        let counter = AtomicCounter::from_value(7);
        assert_eq!(counter.next(), 7);
        assert_eq!(counter.next(), 8);
        assert_eq!(counter.next(), 9);
    }

    #[test]
    fn seeded_counter_starts_below_initial_max() {
        let counter = AtomicCounter::seeded(&ThreadRandom);
        assert!(counter.next() < INITIAL_MAX);
    }

    #[test]
    fn concurrent_calls_never_observe_the_same_value() {
        use std::collections::HashSet;
        use std::sync::Arc;

        let counter = Arc::new(AtomicCounter::from_value(0));
        let mut handles = Vec::new();
        for _ in 0..4 {
            let counter = Arc::clone(&counter);
            handles.push(std::thread::spawn(move || {
                (0..1000).map(|_| counter.next()).collect::<Vec<_>>()
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            for value in handle.join().unwrap() {
                assert!(seen.insert(value), "duplicate counter value {value}");
            }
        }
    }
}
