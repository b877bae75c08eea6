//! SPI bus abstractions
//!
//! Chip-select is driven by the display transport, not the bus, so the
//! transport can hold it asserted across the opcode and its parameters.

/// SPI bus master (write-only)
pub trait SpiBus {
    /// Error type for SPI operations
    type Error;

    /// Write data, returning once every byte has left the shift register
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

impl<B: SpiBus + ?Sized> SpiBus for &mut B {
    type Error = B::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        B::write(self, data)
    }
}
