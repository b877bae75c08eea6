//! Driver for Sitronix ST75256 4-level gray LCD controllers
//!
//! This crate provides:
//! - [`FrameBuffer`]: a packed 2-bit-per-pixel buffer in the controller's
//!   native layout, for all four mounting rotations
//! - [`Transport`] with [`I2cInterface`] and [`SpiInterface`]: command and
//!   data framing for each bus, including the hardware reset pulse
//! - [`St75256`]: the display itself: init sequence, power, contrast,
//!   inversion and `show`
//!
//! # Architecture
//!
//! ```text
//! application ──draw──▶ St75256 ──▶ FrameBuffer   (RAM only)
//!                          │
//!                        show()
//!                          ▼
//!                      Transport ──▶ I2C / SPI bus
//! ```
//!
//! Rotation is fixed at construction. It selects which of the two packing
//! functions the framebuffer binds and which orientation commands the
//! driver sends; nothing branches on rotation while drawing.
//!
//! With the `graphics` feature (default) the driver is an
//! `embedded-graphics` `DrawTarget`, so text and shapes come from there.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod color;
pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod framebuffer;
#[cfg(feature = "graphics")]
pub mod graphics;
pub mod interface;
pub mod surface;

#[cfg(test)]
mod mock;

pub use st75256_hal as hal;

// Re-export key types
pub use color::GrayLevel;
pub use command::Command;
pub use config::{buffer_size, DisplayConfig, Rotation};
pub use display::St75256;
pub use error::{BoundsError, BufferSizeError, DisplayError, PinRole};
pub use framebuffer::{FrameBuffer, Packing};
pub use interface::{I2cInterface, SpiInterface, Transport};
pub use surface::GraySurface;
