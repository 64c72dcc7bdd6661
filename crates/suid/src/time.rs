use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crate::{Error, Result};

/// Tick resolution of the timestamp encoding, in nanoseconds.
///
/// One tick is finer than the effective precision of most system clocks, so
/// successive wall-clock reads almost always land on distinct ticks.
pub const TICK_NS: u128 = 50;

/// Number of bits in the packed tick count: one neat boundary character (4
/// bits) followed by eleven base-32 characters (55 bits).
pub const TIME_BITS: u32 = 59;

/// Largest encodable timestamp, in nanoseconds since the Unix epoch.
///
/// `2^59` ticks of 50ns reach into the year 2883.
pub const MAX_TIMESTAMP_NS: u128 = (1 << TIME_BITS) * TICK_NS - 1;

/// Measured resolutions coarser than this trigger a startup warning.
pub(crate) const RESOLUTION_ACCEPTED_NS: u128 = 5_000;

const PROBE_MAX_DURATION: Duration = Duration::from_millis(10);
const PROBE_MAX_SAMPLES: usize = 1000;

/// A trait for time sources that return a wall-clock timestamp in
/// nanoseconds since the Unix epoch.
///
/// This abstraction allows you to plug in the real system clock or a mocked
/// time source in tests.
///
/// # Example
///
/// ```
/// use suid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_nanos(&self) -> u128 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_nanos(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in nanoseconds since the Unix epoch.
    fn current_nanos(&self) -> u128;
}

/// A [`TimeSource`] backed by [`SystemTime::now`].
///
/// Returns the highest-precision wall-clock reading the platform offers.
/// Clocks before the Unix epoch read as zero.
#[derive(Default, Clone)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_nanos(&self) -> u128 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_nanos()
    }
}

/// Packs a timestamp into its 59-bit tick count.
///
/// Truncates to the nearest 50ns tick boundary at or below `timestamp_ns`.
///
/// # Errors
///
/// Returns [`Error::TimestampOutOfRange`] if the tick count does not fit in
/// [`TIME_BITS`] bits, i.e. the timestamp lies at or beyond
/// [`MAX_TIMESTAMP_NS`] rounded up to the next tick.
pub fn pack_timestamp(timestamp_ns: u128) -> Result<u64> {
    let ticks = timestamp_ns / TICK_NS;
    if ticks >> TIME_BITS != 0 {
        return Err(Error::TimestampOutOfRange { timestamp_ns });
    }
    Ok(ticks as u64)
}

/// Unpacks a 59-bit tick count back into nanoseconds since the Unix epoch.
///
/// Exact at tick granularity: sub-tick precision discarded by
/// [`pack_timestamp`] is not recoverable.
#[must_use]
pub const fn unpack_timestamp(ticks: u64) -> u128 {
    ticks as u128 * TICK_NS
}

/// The measured resolution of a [`TimeSource`], sampled once at generator
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockResolution {
    measured_ns: u128,
}

impl ClockResolution {
    /// The smallest nonzero delta observed between successive clock reads,
    /// in nanoseconds. [`u128::MAX`] if the clock never advanced during the
    /// probe window.
    #[must_use]
    pub const fn measured_ns(&self) -> u128 {
        self.measured_ns
    }

    /// Returns `true` if the clock is too coarse for distinct ticks on
    /// successive generation calls. Ids generated within one tick then rely
    /// on the counter bits for uniqueness rather than on the timestamp.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.measured_ns > RESOLUTION_ACCEPTED_NS
    }
}

/// Samples `time` in a tight loop and reports the smallest observed nonzero
/// delta between successive reads.
///
/// The probe is bounded by 10ms of wall time or 1000 observed clock
/// advances, whichever comes first, so construction cost stays negligible.
pub fn measure_resolution<T: TimeSource>(time: &T) -> ClockResolution {
    let started = Instant::now();
    let mut previous = time.current_nanos();
    let mut smallest = u128::MAX;
    let mut advances = 0;

    while started.elapsed() < PROBE_MAX_DURATION && advances < PROBE_MAX_SAMPLES {
        let sample = time.current_nanos();
        if sample > previous {
            let delta = sample - previous;
            if delta < smallest {
                smallest = delta;
            }
            advances += 1;
            previous = sample;
        }
    }

    ClockResolution { measured_ns: smallest }
}
