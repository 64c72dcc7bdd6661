use crate::{Error, Result};

/// Radix-32 alphabet used for all interior id characters.
///
/// Lowercase letters and digits chosen to avoid visually ambiguous pairs
/// (`0`/`o`, `1`/`l`/`i`). The ordering is load-bearing: the digit value of a
/// character is its position in this table, so lexicographic string order
/// equals numeric order of the encoded value.
pub const ALPHABET: &[u8; 32] = b"nscemwruvytbdfghj0123456789kpqzx";

/// Radix-16 "neat" alphabet used for the first and last character.
///
/// A strict subset of [`ALPHABET`] restricted to letters that read cleanly at
/// word boundaries. The boundary character of an id is the base-16 digit of
/// the value it carries, looked up in this table.
pub const NEAT_ALPHABET: &[u8; 16] = b"zxnscemwrbdhkpqy";

/// Number of bits carried by one interior character.
pub(crate) const BITS_PER_CHAR: usize = 5;

/// Number of bits carried by one neat boundary character.
pub(crate) const BITS_PER_NEAT_CHAR: usize = 4;

const NO_VALUE: u8 = 255;

/// Lookup table for base-32 decoding.
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        lut[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    lut
};

/// Lookup table for neat base-16 decoding.
const NEAT_LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0;
    while i < NEAT_ALPHABET.len() {
        lut[NEAT_ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    lut
};

/// Returns the base-32 digit value of `byte`, or [`Error::InvalidCharacter`]
/// if the byte is outside [`ALPHABET`]. `index` is only used to report the
/// position of the offending byte.
#[inline]
pub(crate) fn digit_value(byte: u8, index: usize) -> Result<u8> {
    let val = LOOKUP[byte as usize];
    if val == NO_VALUE {
        return Err(Error::InvalidCharacter { byte, index });
    }
    Ok(val)
}

/// Returns the base-16 digit value of `byte`, or [`Error::InvalidCharacter`]
/// if the byte is outside [`NEAT_ALPHABET`].
#[inline]
pub(crate) fn neat_value(byte: u8, index: usize) -> Result<u8> {
    let val = NEAT_LOOKUP[byte as usize];
    if val == NO_VALUE {
        return Err(Error::InvalidCharacter { byte, index });
    }
    Ok(val)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_characters_are_distinct() {
        for (i, &a) in ALPHABET.iter().enumerate() {
            for &b in &ALPHABET[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn neat_alphabet_is_subset_of_alphabet() {
        for &c in NEAT_ALPHABET {
            assert!(ALPHABET.contains(&c), "{} not in alphabet", c as char);
        }
    }

    #[test]
    fn digit_lookup_inverts_alphabet() {
        for (i, &c) in ALPHABET.iter().enumerate() {
            assert_eq!(digit_value(c, 0).unwrap(), i as u8);
        }
    }

    #[test]
    fn neat_lookup_inverts_neat_alphabet() {
        for (i, &c) in NEAT_ALPHABET.iter().enumerate() {
            assert_eq!(neat_value(c, 0).unwrap(), i as u8);
        }
    }

    #[test]
    fn digit_value_rejects_foreign_bytes() {
        // `a` is deliberately absent from the alphabet
        assert_eq!(
            digit_value(b'a', 7).unwrap_err(),
            Error::InvalidCharacter { byte: b'a', index: 7 }
        );
        assert_eq!(
            digit_value(b'!', 0).unwrap_err(),
            Error::InvalidCharacter { byte: b'!', index: 0 }
        );
    }

    #[test]
    fn neat_value_rejects_interior_only_characters() {
        // `7` is a valid interior digit but not a neat boundary character
        assert!(digit_value(b'7', 0).is_ok());
        assert_eq!(
            neat_value(b'7', 23).unwrap_err(),
            Error::InvalidCharacter { byte: b'7', index: 23 }
        );
    }
}
