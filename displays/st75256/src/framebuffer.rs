//! Packed 2-bit framebuffer
//!
//! Pixels are stored four to a byte. Two layouts exist, matching the two
//! controller data formats:
//!
//! ```text
//! Vertical (0°/180°)               Horizontal (90°/270°)
//!
//!   x=0   x=1   x=2                  byte 0        byte 1
//! ┌─────┬─────┬─────┐              ┌──┬──┬──┬──┐ ┌──┬──┬──┬──┐
//! │ y=0 │ y=0 │ y=0 │ bits 1:0     │x0│x1│x2│x3│ │x4│x5│x6│x7│ ...
//! │ y=1 │ y=1 │ y=1 │ bits 3:2     └──┴──┴──┴──┘ └──┴──┴──┴──┘
//! │ y=2 │ y=2 │ y=2 │ bits 5:4      7:6 5:4 3:2 1:0
//! │ y=3 │ y=3 │ y=3 │ bits 7:6
//! └─────┴─────┴─────┘               rows follow each other without
//!  byte0  byte1 byte2               padding to a byte boundary
//! ```
//!
//! Vertical bytes hold the top pixel in the least significant bits;
//! horizontal bytes hold the leftmost pixel in the most significant bits.
//!
//! The layout is picked once in [`FrameBuffer::new`]; pixel writes go
//! through a bound locator function and never branch on orientation.

use crate::color::GrayLevel;
use crate::error::{BoundsError, BufferSizeError};
use crate::surface::GraySurface;

/// Maps (x, y, stride) to (byte index, bit shift)
type Locator = fn(usize, usize, usize) -> (usize, u32);

/// Pixel packing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Packing {
    /// Four vertically stacked pixels per byte, bytes run along a row of pages
    Vertical,
    /// Four horizontally adjacent pixels per byte, leftmost in bits 7:6,
    /// rows packed back to back
    Horizontal,
}

impl Packing {
    /// Buffer length in bytes for a `width × height` drawable area
    pub const fn buffer_len(self, width: u16, height: u16) -> usize {
        let width = width as usize;
        let height = height as usize;
        match self {
            Self::Vertical => height.div_ceil(4) * width,
            Self::Horizontal => (width * height).div_ceil(4),
        }
    }

    const fn locator(self) -> Locator {
        match self {
            Self::Vertical => locate_vertical,
            Self::Horizontal => locate_horizontal,
        }
    }
}

fn locate_vertical(x: usize, y: usize, stride: usize) -> (usize, u32) {
    ((y >> 2) * stride + x, ((y & 0b11) << 1) as u32)
}

fn locate_horizontal(x: usize, y: usize, stride: usize) -> (usize, u32) {
    let linear = x + y * stride;
    (linear >> 2, ((3 - (linear & 0b11)) << 1) as u32)
}

/// In-memory pixel buffer in the controller's wire format
///
/// `N` must equal [`Packing::buffer_len`] for the geometry; the storage is
/// never reallocated.
///
/// Vertical packing rounds the height up to whole 4-row pages, and the
/// padding rows are part of the buffer that goes out on the wire. A
/// 256×50 panel at 0° or 180° sends 3328 bytes, 128 more than its pixels
/// need.
#[derive(Clone)]
pub struct FrameBuffer<const N: usize> {
    buffer: [u8; N],
    width: u16,
    height: u16,
    packing: Packing,
    locate: Locator,
}

impl<const N: usize> FrameBuffer<N> {
    /// Create a cleared framebuffer with a `width × height` drawable area
    pub fn new(width: u16, height: u16, packing: Packing) -> Result<Self, BufferSizeError> {
        let expected = packing.buffer_len(width, height);
        if expected != N {
            return Err(BufferSizeError {
                expected,
                actual: N,
            });
        }

        Ok(Self {
            buffer: [0; N],
            width,
            height,
            packing,
            locate: packing.locator(),
        })
    }

    /// Drawable width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Drawable height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Packing direction bound at construction
    pub fn packing(&self) -> Packing {
        self.packing
    }

    /// Packed bytes exactly as they go out on the wire
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Mutable access to the packed bytes, e.g. to load a pre-rendered image
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    /// Copy `source` into this buffer with its origin at (x, y)
    ///
    /// Pixels falling outside this buffer are dropped. If `key` is set,
    /// source pixels of that level are treated as transparent.
    pub fn blit<S>(&mut self, source: &S, x: i32, y: i32, key: Option<GrayLevel>)
    where
        S: GraySurface + ?Sized,
    {
        let (src_width, src_height) = source.dimensions();

        // Clip the source rectangle against this buffer once up front
        let col_start = (-x).max(0);
        let col_end = i32::from(src_width).min(i32::from(self.width) - x);
        let row_start = (-y).max(0);
        let row_end = i32::from(src_height).min(i32::from(self.height) - y);

        for sy in row_start..row_end {
            for sx in col_start..col_end {
                let Some(gray) = source.pixel(sx as u16, sy as u16) else {
                    continue;
                };
                if key == Some(gray) {
                    continue;
                }
                self.write((sx + x) as usize, (sy + y) as usize, gray);
            }
        }
    }

    fn locate(&self, x: u16, y: u16) -> Option<(usize, u32)> {
        if x < self.width && y < self.height {
            Some((self.locate)(
                usize::from(x),
                usize::from(y),
                usize::from(self.width),
            ))
        } else {
            None
        }
    }

    /// Write a pixel whose coordinates are already known to be in range
    fn write(&mut self, x: usize, y: usize, gray: GrayLevel) {
        let (index, shift) = (self.locate)(x, y, usize::from(self.width));
        if let Some(byte) = self.buffer.get_mut(index) {
            *byte = (*byte & !(0b11 << shift)) | (gray.value() << shift);
        }
    }
}

impl<const N: usize> GraySurface for FrameBuffer<N> {
    fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn pixel(&self, x: u16, y: u16) -> Option<GrayLevel> {
        let (index, shift) = self.locate(x, y)?;
        self.buffer
            .get(index)
            .map(|&byte| GrayLevel::from_byte(byte, shift))
    }

    fn set_pixel(&mut self, x: u16, y: u16, gray: GrayLevel) -> Result<(), BoundsError> {
        if !self.contains(x, y) {
            return Err(BoundsError { x, y });
        }
        self.write(usize::from(x), usize::from(y), gray);
        Ok(())
    }

    fn fill(&mut self, gray: GrayLevel) {
        self.buffer.fill(gray.fill_byte());
    }
}

impl<const N: usize> core::fmt::Debug for FrameBuffer<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("packing", &self.packing)
            .field("len", &N)
            .finish()
    }
}
