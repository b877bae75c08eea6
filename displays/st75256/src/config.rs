//! Panel configuration
//!
//! Width and height are always the panel's native dimensions as mounted in
//! [`Rotation::Deg0`]. Quarter-turn rotations swap the drawable area, so a
//! 256×50 panel in [`Rotation::Deg90`] is drawn on as 50×256.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::framebuffer::Packing;

/// Panel mounting rotation
///
/// Fixed for the lifetime of a driver instance; changing it means
/// re-initializing the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rotation {
    /// Native orientation
    Deg0,
    /// Quarter turn
    #[default]
    Deg90,
    /// Half turn
    Deg180,
    /// Three-quarter turn
    Deg270,
}

impl Rotation {
    /// Rotation from its numeric index (0-3)
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Deg0),
            1 => Some(Self::Deg90),
            2 => Some(Self::Deg180),
            3 => Some(Self::Deg270),
            _ => None,
        }
    }

    /// Numeric index (0-3)
    pub const fn index(self) -> u8 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 1,
            Self::Deg180 => 2,
            Self::Deg270 => 3,
        }
    }

    /// Whether width and height are swapped for drawing
    pub const fn is_transposed(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }

    /// Buffer packing this rotation uses
    pub const fn packing(self) -> Packing {
        if self.is_transposed() {
            Packing::Horizontal
        } else {
            Packing::Vertical
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Native panel width in pixels
    pub width: u16,
    /// Native panel height in pixels
    pub height: u16,
    /// Mounting rotation
    pub rotation: Rotation,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 160,
            rotation: Rotation::default(),
        }
    }
}

impl DisplayConfig {
    /// Create a configuration for a `width × height` panel
    pub const fn new(width: u16, height: u16, rotation: Rotation) -> Self {
        Self {
            width,
            height,
            rotation,
        }
    }

    /// Drawable (width, height) after applying the rotation
    pub const fn drawable_size(&self) -> (u16, u16) {
        if self.rotation.is_transposed() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    /// Framebuffer length in bytes for this configuration
    pub const fn buffer_size(&self) -> usize {
        buffer_size(self.width, self.height, self.rotation)
    }
}

/// Framebuffer length in bytes for a `width × height` panel
///
/// Usable in const context to size the driver's buffer:
///
/// ```
/// use st75256::{buffer_size, Rotation};
///
/// const BUF: usize = buffer_size(256, 50, Rotation::Deg90);
/// assert_eq!(BUF, 3200);
/// ```
pub const fn buffer_size(width: u16, height: u16, rotation: Rotation) -> usize {
    let config = DisplayConfig::new(width, height, rotation);
    let (w, h) = config.drawable_size();
    rotation.packing().buffer_len(w, h)
}
