//! ST75256 Hardware Abstraction Layer
//!
//! This crate defines the small set of bus and GPIO operations the ST75256
//! driver needs. Chip HALs plug in either by implementing these traits
//! directly or by wrapping an `embedded-hal` 1.0 peripheral in [`Compat`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  st75256 (display controller, packing)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  st75256-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ Compat<T> for │       │  hand-written │
//! │ embedded-hal  │       │  chip impls   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Reset, data/command and chip-select lines
//! - [`i2c::I2cBus`] - I2C writes, including two-part writes in one transaction
//! - [`spi::SpiBus`] - SPI writes
//! - [`delay::DelayMs`] - Blocking millisecond delays

#![no_std]
#![deny(unsafe_code)]

pub mod compat;
pub mod delay;
pub mod gpio;
pub mod i2c;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use compat::Compat;
pub use delay::DelayMs;
pub use gpio::OutputPin;
pub use i2c::{I2cBus, I2cConfig};
pub use spi::SpiBus;
