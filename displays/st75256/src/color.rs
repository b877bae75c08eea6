//! Gray levels
//!
//! The controller runs in 4-level gray mode: every pixel is a 2-bit
//! sample where 0 is blank and 3 is fully driven.

/// A 2-bit controller gray level in `0..=3`
///
/// The value is range-checked on construction so the packing engine never
/// sees anything wider than two bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GrayLevel(u8);

impl GrayLevel {
    /// Blank pixel (level 0)
    pub const WHITE: Self = Self(0);
    /// Level 1
    pub const LIGHT: Self = Self(1);
    /// Level 2
    pub const DARK: Self = Self(2);
    /// Fully driven pixel (level 3)
    pub const BLACK: Self = Self(3);

    /// All four levels, lightest first
    pub const ALL: [Self; 4] = [Self::WHITE, Self::LIGHT, Self::DARK, Self::BLACK];

    /// Create a gray level, returning `None` if `value > 3`
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 3 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Create a gray level, clamping anything above 3 to 3
    pub const fn saturating(value: u8) -> Self {
        if value > 3 {
            Self::BLACK
        } else {
            Self(value)
        }
    }

    /// Raw 2-bit value
    pub const fn value(self) -> u8 {
        self.0
    }

    /// The level replicated into all four samples of a byte
    pub const fn fill_byte(self) -> u8 {
        let g = self.0;
        g | g << 2 | g << 4 | g << 6
    }

    /// Decode the sample stored at `shift` in `byte`
    pub(crate) const fn from_byte(byte: u8, shift: u32) -> Self {
        Self((byte >> shift) & 0b11)
    }
}

impl From<GrayLevel> for u8 {
    fn from(level: GrayLevel) -> Self {
        level.0
    }
}

impl TryFrom<u8> for GrayLevel {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(value)
    }
}
