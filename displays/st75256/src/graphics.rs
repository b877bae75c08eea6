//! `embedded-graphics` integration
//!
//! Both the bare [`FrameBuffer`] and the [`St75256`] driver are
//! `DrawTarget<Color = Gray2>`. Pixels outside the drawable area are
//! clipped silently, as `DrawTarget` expects.
//!
//! `Gray2` counts luma up from black while the controller counts drive
//! level up from blank, so the mapping is inverted: `Gray2::WHITE` is
//! [`GrayLevel::WHITE`] (level 0) and `Gray2::BLACK` is level 3.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::{Gray2, GrayColor};
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Size};

use crate::color::GrayLevel;
use crate::display::St75256;
use crate::framebuffer::FrameBuffer;
use crate::surface::GraySurface;

impl From<Gray2> for GrayLevel {
    fn from(color: Gray2) -> Self {
        GrayLevel::saturating(3 - color.luma().min(3))
    }
}

impl From<GrayLevel> for Gray2 {
    fn from(level: GrayLevel) -> Self {
        Gray2::new(3 - level.value())
    }
}

fn draw_clipped<S, I>(surface: &mut S, pixels: I)
where
    S: GraySurface,
    I: IntoIterator<Item = Pixel<Gray2>>,
{
    for Pixel(point, color) in pixels {
        if let (Ok(x), Ok(y)) = (u16::try_from(point.x), u16::try_from(point.y)) {
            // Out-of-range pixels are dropped
            surface.set_pixel(x, y, color.into()).ok();
        }
    }
}

fn size_of<S: GraySurface>(surface: &S) -> Size {
    let (width, height) = surface.dimensions();
    Size::new(u32::from(width), u32::from(height))
}

impl<const N: usize> DrawTarget for FrameBuffer<N> {
    type Color = Gray2;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        draw_clipped(self, pixels);
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color.into());
        Ok(())
    }
}

impl<const N: usize> OriginDimensions for FrameBuffer<N> {
    fn size(&self) -> Size {
        size_of(self)
    }
}

impl<T, const N: usize> DrawTarget for St75256<T, N> {
    type Color = Gray2;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        draw_clipped(self, pixels);
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color.into());
        Ok(())
    }
}

impl<T, const N: usize> OriginDimensions for St75256<T, N> {
    fn size(&self) -> Size {
        size_of(self)
    }
}
