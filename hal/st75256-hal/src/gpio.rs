//! GPIO pin abstractions
//!
//! The driver only ever drives lines, so only outputs are modelled.

/// Digital output pin
///
/// Switching a line can fail on expanders or remote GPIO, so every
/// operation is fallible.
pub trait OutputPin {
    /// Error type for pin operations
    type Error;

    /// Set the pin high (logic 1)
    fn set_high(&mut self) -> Result<(), Self::Error>;

    /// Set the pin low (logic 0)
    fn set_low(&mut self) -> Result<(), Self::Error>;

    /// Set the pin to a specific level
    fn set_state(&mut self, high: bool) -> Result<(), Self::Error> {
        if high {
            self.set_high()
        } else {
            self.set_low()
        }
    }
}

impl<P: OutputPin + ?Sized> OutputPin for &mut P {
    type Error = P::Error;

    fn set_high(&mut self) -> Result<(), Self::Error> {
        P::set_high(self)
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        P::set_low(self)
    }
}
