//! Command/data transports
//!
//! A transport moves [`Command`]s and raw data blocks to the controller
//! with the framing its bus needs:
//!
//! - [`I2cInterface`]: control byte `0x80` before an opcode, `0x40`
//!   before data. Command parameters travel as data.
//! - [`SpiInterface`]: chip-select held across a whole command, the
//!   data/command line low for the opcode and high for everything else.
//!
//! Both perform the hardware reset pulse when constructed, before any
//! command can be sent. Nothing is retried; the first bus or pin failure
//! is returned.

mod i2c;
mod spi;

pub use i2c::I2cInterface;
pub use spi::SpiInterface;

use st75256_hal::{DelayMs, OutputPin};

use crate::command::Command;
use crate::error::{DisplayError, PinRole};

/// Reset line held low for at least this long (ms)
pub const RESET_PULSE_MS: u32 = 10;

/// Wait after releasing reset before the first command (ms)
pub const RESET_RECOVERY_MS: u32 = 10;

/// Bus-specific command/data framing
pub trait Transport {
    /// Error reported by the underlying bus
    type BusError;

    /// Send an opcode and its parameters as one unit
    fn send_command(&mut self, command: Command<'_>) -> Result<(), DisplayError<Self::BusError>>;

    /// Send a block of display data
    fn send_data(&mut self, data: &[u8]) -> Result<(), DisplayError<Self::BusError>>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type BusError = T::BusError;

    fn send_command(&mut self, command: Command<'_>) -> Result<(), DisplayError<Self::BusError>> {
        T::send_command(self, command)
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), DisplayError<Self::BusError>> {
        T::send_data(self, data)
    }
}

/// Drive `line` to `high`, reporting failures as the line's [`PinRole`]
pub(crate) fn drive<P: OutputPin>(line: &mut P, high: bool, role: PinRole) -> Result<(), PinRole> {
    line.set_state(high).map_err(|_| role)
}

/// Pulse the reset line: low, wait, high, wait
pub(crate) fn hard_reset<P, D>(reset: &mut P, delay: &mut D) -> Result<(), PinRole>
where
    P: OutputPin,
    D: DelayMs,
{
    drive(reset, false, PinRole::Reset)?;
    delay.delay_ms(RESET_PULSE_MS);
    drive(reset, true, PinRole::Reset)?;
    delay.delay_ms(RESET_RECOVERY_MS);
    Ok(())
}
