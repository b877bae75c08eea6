//! I2C transport
//!
//! Every transfer starts with a control byte. The controller cannot tell
//! command parameters from pixel data at this level, so parameters go out
//! as a separate data transfer right after the opcode.

use st75256_hal::{DelayMs, I2cBus, I2cConfig, OutputPin};

use super::{drive, hard_reset, Transport};
use crate::command::Command;
use crate::error::{DisplayError, PinRole};

/// Control byte: Co=1, D/C#=0, next byte is an opcode
pub const CONTROL_COMMAND: u8 = 0x80;

/// Control byte: Co=0, D/C#=1, all following bytes are data
pub const CONTROL_DATA: u8 = 0x40;

/// ST75256 over I2C
pub struct I2cInterface<I2C, RST> {
    i2c: I2C,
    reset: RST,
    address: u8,
}

impl<I2C, RST> I2cInterface<I2C, RST>
where
    I2C: I2cBus,
    RST: OutputPin,
{
    /// Take ownership of the bus and reset line and reset the controller
    ///
    /// Blocks for the reset pulse and recovery time.
    pub fn new<D: DelayMs>(
        i2c: I2C,
        mut reset: RST,
        delay: &mut D,
        config: I2cConfig,
    ) -> Result<Self, DisplayError<I2C::Error>> {
        drive(&mut reset, false, PinRole::Reset)?;
        hard_reset(&mut reset, delay)?;

        Ok(Self {
            i2c,
            reset,
            address: config.address,
        })
    }

    /// Device address in use
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give back the bus and reset line
    pub fn release(self) -> (I2C, RST) {
        (self.i2c, self.reset)
    }
}

impl<I2C, RST> Transport for I2cInterface<I2C, RST>
where
    I2C: I2cBus,
    RST: OutputPin,
{
    type BusError = I2C::Error;

    fn send_command(&mut self, command: Command<'_>) -> Result<(), DisplayError<Self::BusError>> {
        self.i2c
            .write(self.address, &[CONTROL_COMMAND, command.opcode])
            .map_err(DisplayError::Bus)?;
        if command.has_params() {
            self.send_data(command.params)?;
        }
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), DisplayError<Self::BusError>> {
        self.i2c
            .write_sequence(self.address, [&[CONTROL_DATA], data])
            .map_err(DisplayError::Bus)
    }
}
