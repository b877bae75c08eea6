//! 4-wire SPI transport
//!
//! The data/command line selects how the controller interprets each byte:
//! low for an opcode, high for parameters and display data. Chip-select
//! stays asserted for the whole command so the opcode and its parameters
//! cannot be split by other traffic.

use st75256_hal::{DelayMs, OutputPin, SpiBus};

use super::{drive, hard_reset, Transport};
use crate::command::Command;
use crate::error::{DisplayError, PinRole};

/// ST75256 over 4-wire SPI
pub struct SpiInterface<SPI, DC, CS, RST> {
    spi: SPI,
    dc: DC,
    cs: CS,
    reset: RST,
}

impl<SPI, DC, CS, RST> SpiInterface<SPI, DC, CS, RST>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    /// Take ownership of the bus and control lines and reset the controller
    ///
    /// Lines start at D/C low, CS high (deselected) and reset low, then the
    /// reset pulse runs. Blocks for the reset pulse and recovery time.
    pub fn new<D: DelayMs>(
        spi: SPI,
        mut dc: DC,
        mut cs: CS,
        mut reset: RST,
        delay: &mut D,
    ) -> Result<Self, DisplayError<SPI::Error>> {
        drive(&mut dc, false, PinRole::DataCommand)?;
        drive(&mut reset, false, PinRole::Reset)?;
        drive(&mut cs, true, PinRole::ChipSelect)?;
        hard_reset(&mut reset, delay)?;

        Ok(Self { spi, dc, cs, reset })
    }

    /// Give back the bus and control lines
    pub fn release(self) -> (SPI, DC, CS, RST) {
        (self.spi, self.dc, self.cs, self.reset)
    }

    fn select(&mut self, selected: bool) -> Result<(), DisplayError<SPI::Error>> {
        // Chip-select is active low
        Ok(drive(&mut self.cs, !selected, PinRole::ChipSelect)?)
    }

    fn data_mode(&mut self, data: bool) -> Result<(), DisplayError<SPI::Error>> {
        Ok(drive(&mut self.dc, data, PinRole::DataCommand)?)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), DisplayError<SPI::Error>> {
        self.spi.write(bytes).map_err(DisplayError::Bus)
    }

    fn write_command(&mut self, command: Command<'_>) -> Result<(), DisplayError<SPI::Error>> {
        self.data_mode(false)?;
        self.write(&[command.opcode])?;
        if command.has_params() {
            self.data_mode(true)?;
            self.write(command.params)?;
        }
        Ok(())
    }

    fn write_data(&mut self, data: &[u8]) -> Result<(), DisplayError<SPI::Error>> {
        self.data_mode(true)?;
        self.write(data)
    }
}

impl<SPI, DC, CS, RST> Transport for SpiInterface<SPI, DC, CS, RST>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    type BusError = SPI::Error;

    fn send_command(&mut self, command: Command<'_>) -> Result<(), DisplayError<Self::BusError>> {
        self.select(true)?;
        let sent = self.write_command(command);
        // Deselect even after a failed write; the first error wins
        let released = self.select(false);
        sent.and(released)
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), DisplayError<Self::BusError>> {
        self.select(true)?;
        let sent = self.write_data(data);
        let released = self.select(false);
        sent.and(released)
    }
}
