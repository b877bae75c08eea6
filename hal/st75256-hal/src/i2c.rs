//! I2C bus abstractions
//!
//! The ST75256 is write-only over I2C: every transfer is a control byte
//! followed by either one opcode or a run of data bytes.

/// I2C bus master
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Write two buffers back to back in a single transaction
    ///
    /// The device sees one START, the bytes of `parts[0]` immediately
    /// followed by the bytes of `parts[1]`, then one STOP. This lets a
    /// control byte prefix a large payload without copying the payload.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `parts` - Head and tail of the transfer
    fn write_sequence(&mut self, address: u8, parts: [&[u8]; 2]) -> Result<(), Self::Error>;
}

impl<B: I2cBus + ?Sized> I2cBus for &mut B {
    type Error = B::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        B::write(self, address, data)
    }

    fn write_sequence(&mut self, address: u8, parts: [&[u8]; 2]) -> Result<(), Self::Error> {
        B::write_sequence(self, address, parts)
    }
}

/// I2C device configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// 7-bit device address
    pub address: u8,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::PRIMARY
    }
}

impl I2cConfig {
    /// Address with SA0 tied low (0x3C)
    pub const PRIMARY: Self = Self { address: 0x3C };

    /// Address with SA0 tied high (0x3D)
    pub const SECONDARY: Self = Self { address: 0x3D };

    /// Use a custom 7-bit address
    pub const fn with_address(address: u8) -> Self {
        Self { address }
    }
}
