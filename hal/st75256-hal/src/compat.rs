//! Adapters for `embedded-hal` 1.0 peripherals
//!
//! Wrap any blocking `embedded-hal` peripheral in [`Compat`] to use it with
//! the driver:
//!
//! ```ignore
//! let bus = Compat(i2c);
//! let reset = Compat(reset_pin);
//! let mut delay = Compat(delay);
//! ```

use embedded_hal::{delay, digital, i2c, spi};

use crate::{DelayMs, I2cBus, OutputPin, SpiBus};

/// Newtype bridging `embedded-hal` traits to the traits in this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Compat<T>(pub T);

impl<T> Compat<T> {
    /// Unwrap the inner peripheral
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: i2c::I2c> I2cBus for Compat<T> {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        i2c::I2c::write(&mut self.0, address, data)
    }

    fn write_sequence(&mut self, address: u8, parts: [&[u8]; 2]) -> Result<(), Self::Error> {
        // Adjacent writes in one transaction are not separated by a
        // repeated start, so the device sees one contiguous write.
        let [head, tail] = parts;
        i2c::I2c::transaction(
            &mut self.0,
            address,
            &mut [i2c::Operation::Write(head), i2c::Operation::Write(tail)],
        )
    }
}

impl<T: spi::SpiBus<u8>> SpiBus for Compat<T> {
    type Error = T::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        spi::SpiBus::write(&mut self.0, data)?;
        // Chip-select may be released right after this returns
        spi::SpiBus::flush(&mut self.0)
    }
}

impl<T: digital::OutputPin> OutputPin for Compat<T> {
    type Error = T::Error;

    fn set_high(&mut self) -> Result<(), Self::Error> {
        digital::OutputPin::set_high(&mut self.0)
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        digital::OutputPin::set_low(&mut self.0)
    }
}

impl<T: delay::DelayNs> DelayMs for Compat<T> {
    fn delay_ms(&mut self, ms: u32) {
        delay::DelayNs::delay_ms(&mut self.0, ms)
    }
}
