//! Driver errors

/// GPIO line driven by a transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinRole {
    /// Hardware reset line
    Reset,
    /// Data/command select line (SPI only)
    DataCommand,
    /// Chip-select line (SPI only)
    ChipSelect,
}

/// Display errors
///
/// `E` is the bus error of the transport in use. Nothing is retried: the
/// first failure is returned to the caller of the public operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError<E> {
    /// A bus write failed
    Bus(E),
    /// A GPIO line could not be switched
    Pin(PinRole),
    /// Framebuffer storage does not match the panel geometry
    BufferSize(BufferSizeError),
}

impl<E> From<PinRole> for DisplayError<E> {
    fn from(role: PinRole) -> Self {
        Self::Pin(role)
    }
}

impl<E> From<BufferSizeError> for DisplayError<E> {
    fn from(err: BufferSizeError) -> Self {
        Self::BufferSize(err)
    }
}

/// Framebuffer storage does not match the panel geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BufferSizeError {
    /// Bytes required by the geometry
    pub expected: usize,
    /// Bytes provided
    pub actual: usize,
}

/// Pixel coordinate outside the drawable area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoundsError {
    /// Rejected column
    pub x: u16,
    /// Rejected row
    pub y: u16,
}
