//! Drawable surface trait
//!
//! The common 2-bit drawing interface shared by the bare framebuffer and
//! the display driver. Higher-level graphics libraries draw through this
//! (or through `embedded-graphics` when the `graphics` feature is on).

use crate::color::GrayLevel;
use crate::error::BoundsError;

/// A rectangular surface of 2-bit gray pixels
pub trait GraySurface {
    /// Drawable (width, height) in pixels
    fn dimensions(&self) -> (u16, u16);

    /// Read back the pixel at (x, y), or `None` outside the surface
    fn pixel(&self, x: u16, y: u16) -> Option<GrayLevel>;

    /// Write one pixel
    ///
    /// Out-of-range coordinates are rejected and nothing is modified.
    fn set_pixel(&mut self, x: u16, y: u16, gray: GrayLevel) -> Result<(), BoundsError>;

    /// Set every pixel to `gray`
    fn fill(&mut self, gray: GrayLevel);

    /// Check whether (x, y) lies on the surface
    fn contains(&self, x: u16, y: u16) -> bool {
        let (width, height) = self.dimensions();
        x < width && y < height
    }
}
