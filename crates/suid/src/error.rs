use core::fmt;

/// A result type defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `suid` can emit.
///
/// Every failure is a deterministic input-validation failure detected
/// synchronously. Nothing here is transient, so nothing is retried
/// internally.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Error {
    /// The requested id length cannot hold the mandatory timestamp
    /// characters plus the two neat boundary characters.
    LengthTooSmall {
        /// The length that was requested.
        requested: usize,
        /// The smallest length that can be generated.
        min: usize,
    },

    /// The timestamp does not fit in the packed tick field, either because
    /// it predates the Unix epoch baseline or lies beyond the representable
    /// horizon (year 2883).
    TimestampOutOfRange {
        /// The offending timestamp, in nanoseconds since the Unix epoch.
        timestamp_ns: u128,
    },

    /// A decode input is too short to contain an encoded timestamp.
    InvalidFormat {
        /// The length of the rejected input.
        len: usize,
    },

    /// A decode input contains a byte outside the alphabet expected at that
    /// position. Boundary positions are validated against the neat alphabet,
    /// interior positions against the full base-32 alphabet.
    InvalidCharacter {
        /// The offending byte.
        byte: u8,
        /// Its position within the input.
        index: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthTooSmall { requested, min } => {
                write!(f, "minimum possible id length: {min}, requested: {requested}")
            }
            Self::TimestampOutOfRange { timestamp_ns } => {
                write!(f, "timestamp is out of range: {timestamp_ns}ns")
            }
            Self::InvalidFormat { len } => write!(f, "invalid id length: {len}"),
            Self::InvalidCharacter { byte, index } => {
                write!(f, "invalid byte {byte:#04x} at index {index}")
            }
        }
    }
}

impl core::error::Error for Error {}
