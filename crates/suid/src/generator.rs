use crate::{
    ALPHABET, AtomicCounter, ClockResolution, CounterSource, EntropySource, Error, NEAT_ALPHABET,
    Result, Suid, SystemClock, ThreadRandom, TimeSource,
    alphabet::{BITS_PER_CHAR, BITS_PER_NEAT_CHAR, digit_value, neat_value},
    counter::COUNTER_BITS,
    time::{RESOLUTION_ACCEPTED_NS, TIME_BITS, measure_resolution, pack_timestamp, unpack_timestamp},
};

/// Default length of a generated id.
pub const DEFAULT_LENGTH: usize = 24;

/// Minimum length of a generated id: twelve timestamp characters plus the
/// trailing neat boundary character.
pub const MIN_LENGTH: usize = 13;

/// Leading characters that carry the packed tick count: one neat boundary
/// character followed by eleven base-32 characters.
const TIME_CHARS: usize = 12;

/// Number of fill bits in an id of `length` characters: five per interior
/// fill character plus four in the trailing neat character.
const fn fill_width(length: usize) -> usize {
    (length - MIN_LENGTH) * BITS_PER_CHAR + BITS_PER_NEAT_CHAR
}

/// Builds the fill bit-string for one id: `width_bits` bits, big-endian,
/// entropy in the high positions and the counter's low [`COUNTER_BITS`] bits
/// occupying the least-significant positions.
///
/// The counter placement means ids generated with identical entropy within
/// one tick are strictly increasing until the counter portion wraps.
fn mix_fill<R: EntropySource>(entropy: &R, counter: u64, width_bits: usize) -> Vec<u8> {
    let num_bytes = width_bits.div_ceil(8);
    let mut bytes = vec![0u8; num_bytes];
    entropy.fill(&mut bytes);

    // Mask the excess high bits so the buffer holds exactly `width_bits`
    let excess = num_bytes * 8 - width_bits;
    if excess > 0 {
        bytes[0] &= 0xFF >> excess;
    }

    // Overwrite the low end with the counter, truncated when the fill is
    // narrower than the counter
    let counter_bits = width_bits.min(COUNTER_BITS);
    for bit in 0..counter_bits {
        let byte = num_bytes - 1 - bit / 8;
        let mask = 1u8 << (bit % 8);
        if (counter >> bit) & 1 == 1 {
            bytes[byte] |= mask;
        } else {
            bytes[byte] &= !mask;
        }
    }

    bytes
}

/// MSB-first cursor over a fill buffer produced by [`mix_fill`].
struct BitReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    fn new(bytes: &'a [u8], width_bits: usize) -> Self {
        // Skip the masked excess bits of the top byte
        Self {
            bytes,
            pos: bytes.len() * 8 - width_bits,
        }
    }

    fn take(&mut self, count: usize) -> usize {
        let mut acc = 0;
        for _ in 0..count {
            let bit = (self.bytes[self.pos / 8] >> (7 - self.pos % 8)) & 1;
            acc = (acc << 1) | bit as usize;
            self.pos += 1;
        }
        acc
    }
}

/// Renders a packed tick count and fill bit-string into the final id text.
///
/// Layout: `[neat: ticks 58..55][11 x base32: ticks 54..0][base32 fill
/// chars][neat: fill 3..0]`. Fixed-width, left-zero-padded digits are what
/// make lexicographic order track tick order.
fn encode_parts(ticks: u64, fill: &[u8], length: usize) -> String {
    debug_assert!(ticks >> TIME_BITS == 0, "tick overflow");

    let mut out = Vec::with_capacity(length);
    let mut shift = TIME_BITS as usize - BITS_PER_NEAT_CHAR;
    out.push(NEAT_ALPHABET[(ticks >> shift) as usize]);
    while shift > 0 {
        shift -= BITS_PER_CHAR;
        out.push(ALPHABET[(ticks >> shift) as usize & 0x1F]);
    }

    let mut reader = BitReader::new(fill, fill_width(length));
    for _ in 0..length - MIN_LENGTH {
        out.push(ALPHABET[reader.take(BITS_PER_CHAR)]);
    }
    out.push(NEAT_ALPHABET[reader.take(BITS_PER_NEAT_CHAR)]);

    // SAFETY: every byte pushed above comes from the ASCII alphabet tables
    unsafe { String::from_utf8_unchecked(out) }
}

/// Validates `s` character by character and reassembles its packed tick
/// count.
///
/// # Errors
///
/// - [`Error::InvalidFormat`] if `s` is shorter than [`MIN_LENGTH`]
/// - [`Error::InvalidCharacter`] if any position holds a byte outside the
///   alphabet expected there
pub(crate) fn parse_ticks(s: &str) -> Result<u64> {
    let bytes = s.as_bytes();
    let len = bytes.len();
    if len < MIN_LENGTH {
        return Err(Error::InvalidFormat { len });
    }

    let mut ticks = u64::from(neat_value(bytes[0], 0)?);
    for (i, &b) in bytes.iter().enumerate().take(TIME_CHARS).skip(1) {
        ticks = (ticks << BITS_PER_CHAR) | u64::from(digit_value(b, i)?);
    }

    // The fill carries no recoverable information, but membership is still
    // enforced so a corrupted id never decodes silently
    for (i, &b) in bytes.iter().enumerate().take(len - 1).skip(TIME_CHARS) {
        digit_value(b, i)?;
    }
    neat_value(bytes[len - 1], len - 1)?;

    Ok(ticks)
}

/// Extracts the encoded timestamp from an id, in nanoseconds since the Unix
/// epoch.
///
/// Recovers time to the 50ns tick boundary; sub-tick precision present at
/// generation is gone by design.
///
/// # Example
///
/// ```
/// let ns = suid::decode_timestamp("zzrmn7utjrkbfp5s7mwpz6bc").unwrap();
/// // 2023-11-10T14:26:15.001234150Z
/// assert_eq!(ns, 1_699_626_375_001_234_150);
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] if the input is shorter than
/// [`MIN_LENGTH`], or [`Error::InvalidCharacter`] if any position holds a
/// byte outside the alphabet expected there.
pub fn decode_timestamp(s: &str) -> Result<u128> {
    parse_ticks(s).map(unpack_timestamp)
}

/// Generates sortable, timestamp-carrying unique string ids.
///
/// Composes three injected capabilities: a [`TimeSource`] for wall-clock
/// nanoseconds, an [`EntropySource`] for fill bytes, and a [`CounterSource`]
/// whose low bits keep ids within one tick distinct. All three default to
/// the process-wide implementations ([`SystemClock`], [`ThreadRandom`],
/// [`AtomicCounter`]).
///
/// Construction is the one-shot initialization step: it seeds the counter
/// and probes the clock resolution once, surfacing a non-fatal
/// `tracing::warn!` when the clock is coarser than expected. Generation
/// itself is synchronous, non-blocking, and safe to call from any number of
/// threads.
///
/// # Example
///
/// ```
/// use suid::SuidGenerator;
///
/// let generator = SuidGenerator::new();
/// let id = generator.generate().unwrap();
/// assert_eq!(id.as_str().len(), 24);
///
/// let ns = suid::decode_timestamp(id.as_str()).unwrap();
/// assert_eq!(ns, id.timestamp_ns());
/// ```
pub struct SuidGenerator<T = SystemClock, R = ThreadRandom, C = AtomicCounter>
where
    T: TimeSource,
    R: EntropySource,
    C: CounterSource,
{
    time: T,
    entropy: R,
    counter: C,
    resolution: ClockResolution,
}

impl SuidGenerator {
    /// Creates a generator over the system clock, the thread-local RNG, and
    /// a freshly seeded process-wide counter.
    #[must_use]
    pub fn new() -> Self {
        let entropy = ThreadRandom;
        let counter = AtomicCounter::seeded(&entropy);
        Self::with_parts(SystemClock, entropy, counter)
    }
}

impl Default for SuidGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R, C> SuidGenerator<T, R, C>
where
    T: TimeSource,
    R: EntropySource,
    C: CounterSource,
{
    /// Creates a generator from explicit capabilities.
    ///
    /// Probes the resolution of `time` once; if the smallest observed delta
    /// between reads is coarser than 5µs, a warning is logged because
    /// successive ids will then share tick values and rely on the counter
    /// for ordering. The check never fails generation.
    pub fn with_parts(time: T, entropy: R, counter: C) -> Self {
        let resolution = measure_resolution(&time);
        if resolution.is_degraded() {
            tracing::warn!(
                measured_ns = %resolution.measured_ns(),
                accepted_ns = %RESOLUTION_ACCEPTED_NS,
                "time source resolution is coarse; ids within a tick are ordered by counter only"
            );
        }
        Self {
            time,
            entropy,
            counter,
            resolution,
        }
    }

    /// The clock resolution measured at construction.
    #[must_use]
    pub const fn clock_resolution(&self) -> ClockResolution {
        self.resolution
    }

    /// Returns the current time from the injected source, in nanoseconds
    /// since the Unix epoch.
    pub fn now(&self) -> u128 {
        self.time.current_nanos()
    }

    /// Generates a new id of [`DEFAULT_LENGTH`] at the current time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampOutOfRange`] if the clock reads beyond the
    /// representable horizon.
    pub fn generate(&self) -> Result<Suid> {
        self.generate_at_with_length(self.now(), DEFAULT_LENGTH)
    }

    /// Generates a new id of the given length at the current time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthTooSmall`] or [`Error::TimestampOutOfRange`].
    pub fn generate_with_length(&self, length: usize) -> Result<Suid> {
        self.generate_at_with_length(self.now(), length)
    }

    /// Generates a new id of [`DEFAULT_LENGTH`] for an explicit timestamp in
    /// nanoseconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampOutOfRange`].
    pub fn generate_at(&self, timestamp_ns: u128) -> Result<Suid> {
        self.generate_at_with_length(timestamp_ns, DEFAULT_LENGTH)
    }

    /// Generates a new id for an explicit timestamp and length.
    ///
    /// Single-shot: any failure is reported immediately, nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthTooSmall`] if `length` cannot hold the
    /// timestamp characters plus both boundary characters, or
    /// [`Error::TimestampOutOfRange`] if the timestamp does not fit in
    /// [`TIME_BITS`] bits of 50ns ticks.
    pub fn generate_at_with_length(&self, timestamp_ns: u128, length: usize) -> Result<Suid> {
        if length < MIN_LENGTH {
            return Err(Error::LengthTooSmall {
                requested: length,
                min: MIN_LENGTH,
            });
        }
        let ticks = pack_timestamp(timestamp_ns)?;
        let fill = mix_fill(&self.entropy, self.counter.next(), fill_width(length));
        let text = encode_parts(ticks, &fill, length);
        Ok(Suid::from_validated(text, ticks))
    }
}
