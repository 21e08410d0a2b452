use std::fmt;

use derive_more::{Display, Error};

/// A 4-bit value in the range `0..=15`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Nibble(u8);

impl Nibble {
    pub const ESCAPE: Nibble = Nibble(0);
    pub const PADDING: Nibble = Nibble(0);
    pub const MAX: u8 = 0xF;

    /// Keeps only the low 4 bits of `value`.
    pub const fn truncate(value: u8) -> Self {
        Nibble(value & Self::MAX)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn is_escape(self) -> bool {
        self.0 == 0
    }

    /// Splits a byte into its high (bits 7-4) and low (bits 3-0) halves.
    pub const fn split(byte: u8) -> (Nibble, Nibble) {
        (Nibble(byte >> 4), Nibble(byte & Self::MAX))
    }

    /// Packs two nibbles into one byte, `high` first.
    pub const fn join(high: Nibble, low: Nibble) -> u8 {
        (high.0 << 4) | low.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display(fmt = "{} does not fit in 4 bits", _0)]
pub struct NibbleOutOfRange(#[error(not(source))] pub u8);

impl TryFrom<u8> for Nibble {
    type Error = NibbleOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > Self::MAX {
            return Err(NibbleOutOfRange(value));
        }
        Ok(Nibble(value))
    }
}

impl fmt::Display for Nibble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0)
    }
}
