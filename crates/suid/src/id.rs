use core::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::{Result, generator::parse_ticks, time::unpack_timestamp};

/// A sortable unique identifier.
///
/// Immutable once produced. The text is a fixed-length ASCII string over the
/// id alphabet whose lexicographic order equals the order of the embedded
/// timestamps (at 50ns tick granularity), so ids sort chronologically as
/// plain strings.
///
/// Only constructed through validation: either by
/// [`SuidGenerator`](crate::SuidGenerator) or by parsing
/// ([`FromStr`](core::str::FromStr) / [`TryFrom<&str>`]), which is why the
/// timestamp accessors are infallible.
///
/// # Example
///
/// ```
/// use suid::Suid;
///
/// let id: Suid = "zzrmn7utjrkbfp5s7mwpz6bc".parse().unwrap();
/// assert_eq!(id.timestamp_ns(), 1_699_626_375_001_234_150);
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Suid {
    text: String,
    ticks: u64,
}

impl Suid {
    /// Wraps text that has already passed positional validation.
    pub(crate) fn from_validated(text: String, ticks: u64) -> Self {
        Self { text, ticks }
    }

    /// Returns the id text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The embedded timestamp, in nanoseconds since the Unix epoch, at 50ns
    /// tick granularity.
    #[must_use]
    pub const fn timestamp_ns(&self) -> u128 {
        unpack_timestamp(self.ticks)
    }

    /// The embedded timestamp as a [`SystemTime`].
    ///
    /// Calendar representations typically display microseconds; the full
    /// 50ns precision is preserved here.
    #[must_use]
    pub fn datetime(&self) -> SystemTime {
        let ns = self.timestamp_ns();
        UNIX_EPOCH + Duration::new((ns / 1_000_000_000) as u64, (ns % 1_000_000_000) as u32)
    }
}

impl fmt::Display for Suid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for Suid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suid")
            .field("text", &self.text)
            .field("timestamp_ns", &self.timestamp_ns())
            .finish()
    }
}

impl AsRef<str> for Suid {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl From<Suid> for String {
    fn from(id: Suid) -> Self {
        id.text
    }
}

impl PartialEq<str> for Suid {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Suid {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl PartialEq<Suid> for &str {
    fn eq(&self, other: &Suid) -> bool {
        other.text == *self
    }
}

impl core::str::FromStr for Suid {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        let ticks = parse_ticks(s)?;
        Ok(Self::from_validated(s.to_owned(), ticks))
    }
}

impl TryFrom<&str> for Suid {
    type Error = crate::Error;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}

impl TryFrom<String> for Suid {
    type Error = crate::Error;

    fn try_from(s: String) -> Result<Self> {
        let ticks = parse_ticks(&s)?;
        Ok(Self::from_validated(s, ticks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const KNOWN: &str = "zzrmn7utjrkbfp5s7mwpz6bc";

    #[test]
    fn parse_accepts_valid_ids() {
        let id: Suid = KNOWN.parse().unwrap();
        assert_eq!(id.as_str(), KNOWN);
        assert_eq!(id, KNOWN);
        assert_eq!(id.timestamp_ns(), 1_699_626_375_001_234_150);
    }

    #[test]
    fn parse_rejects_invalid_ids() {
        let err = "too-short".parse::<Suid>().unwrap_err();
        assert_eq!(err, Error::InvalidFormat { len: 9 });

        let err = Suid::try_from("ZZRMN7UTJRKBFP5S7MWPZ6BC").unwrap_err();
        assert_eq!(err, Error::InvalidCharacter { byte: b'Z', index: 0 });
    }

    #[test]
    fn datetime_matches_timestamp() {
        let id: Suid = KNOWN.parse().unwrap();
        let since_epoch = id.datetime().duration_since(UNIX_EPOCH).unwrap();
        assert_eq!(since_epoch.as_nanos(), id.timestamp_ns());
    }

    #[test]
    fn display_roundtrips_through_string() {
        let id: Suid = KNOWN.parse().unwrap();
        assert_eq!(format!("{id}"), KNOWN);
        let text: String = id.clone().into();
        assert_eq!(Suid::try_from(text).unwrap(), id);
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a: Suid = "znnnnnnnnnnnnnnnnnnnnnnz".parse().unwrap();
        let b: Suid = KNOWN.parse().unwrap();
        assert!(a < b);
        assert!(a.as_str() < b.as_str());
    }
}
