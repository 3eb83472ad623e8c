//! Fixed-width binary sequences.
use std::{fmt, str::FromStr};

use crate::error::RandSeqError;

/// Number of bits in a [`BitSequence`].
pub const SEQUENCE_LENGTH: usize = 128;

/// An immutable sequence of exactly [`SEQUENCE_LENGTH`] bits.
///
/// Bit `i` of the sequence is bit `i` of the underlying `u128`, so index `127`
/// is the _most significant bit_ and is displayed first:
/// ```
/// # use randseq::BitSequence;
/// let seq = BitSequence::from(0b101u128);
/// assert_eq!(seq.to_string(), format!("{}101", "0".repeat(125)));
/// assert_eq!(seq.bit(0), Some(true));
/// assert_eq!(seq.bit(1), Some(false));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BitSequence(u128);

impl BitSequence {
    /// Returns bit `index`, or `None` if `index` is out of bounds.
    pub fn bit(&self, index: usize) -> Option<bool> {
        if index >= SEQUENCE_LENGTH {
            return None;
        }
        Some((self.0 >> index) & 1 == 1)
    }

    pub fn count_ones(&self) -> u32 {
        self.0.count_ones()
    }

    pub fn as_u128(&self) -> u128 {
        self.0
    }

    /// Iterates over the bits in display order, i.e. from index `127` down to
    /// index `0`.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..SEQUENCE_LENGTH).rev().map(move |i| (self.0 >> i) & 1 == 1)
    }
}

impl From<u128> for BitSequence {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:0width$b}", self.0, width = SEQUENCE_LENGTH)
    }
}

impl FromStr for BitSequence {
    type Err = RandSeqError;

    /// Parses the display representation back, first character is bit `127`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let found = s.chars().count();
        if found != SEQUENCE_LENGTH {
            return Err(RandSeqError::InvalidLength {
                expected: SEQUENCE_LENGTH,
                found,
            });
        }

        let mut value = 0u128;
        for (index, c) in s.chars().enumerate() {
            let bit = match c {
                '0' => 0,
                '1' => 1,
                found => return Err(RandSeqError::InvalidSequence { index, found }),
            };
            value = (value << 1) | bit;
        }

        Ok(Self(value))
    }
}
