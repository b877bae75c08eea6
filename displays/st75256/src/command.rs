//! ST75256 command set and initialization table
//!
//! Every command is an opcode followed by zero or more parameter bytes.
//! Several opcodes are only valid in one of the extended instruction sets
//! (`0x30` selects set 1, `0x31` selects set 2), so the order of
//! [`INIT_SEQUENCE`] matters: reordering it leaves the controller in an
//! undefined state.

use crate::config::Rotation;

/// ST75256 opcodes
pub mod opcode {
    /// Select extended instruction set 1
    pub const EXT_SET_1: u8 = 0x30;
    /// Select extended instruction set 2
    pub const EXT_SET_2: u8 = 0x31;
    /// Exit sleep mode (set 1)
    pub const SLEEP_OUT: u8 = 0x94;
    /// Enable/disable OTP auto-read (set 2)
    pub const AUTO_READ: u8 = 0xD7;
    /// Analog circuit: booster efficiency and bias ratio (set 2)
    pub const ANALOG_CIRCUIT: u8 = 0x32;
    /// Temperature compensation ranges (set 2)
    pub const TEMPERATURE_RANGE: u8 = 0xF2;
    /// Gray level ramp (set 2)
    pub const GRAY_LEVELS: u8 = 0x20;
    /// Display control: CL divider, duty, frame period (set 1)
    pub const DISPLAY_CONTROL: u8 = 0xCA;
    /// Monochrome / 4-level gray mode select (set 1)
    pub const DISPLAY_MODE: u8 = 0xF0;
    /// Set Vop (contrast), two 6/3-bit fields (set 1)
    pub const SET_CONTRAST: u8 = 0x81;
    /// Power control: booster, regulator, follower (set 1)
    pub const POWER_CONTROL: u8 = 0x20;
    /// Data format, D0 at top / LSB first (set 1)
    pub const DATA_FORMAT_LSB: u8 = 0x08;
    /// Data format, D7 at top / MSB first (set 1)
    pub const DATA_FORMAT_MSB: u8 = 0x0C;
    /// Data scan direction (set 1)
    pub const SCAN_DIRECTION: u8 = 0xBC;
    /// Column address window (set 1)
    pub const COLUMN_ADDRESS: u8 = 0x15;
    /// Page address window (set 1)
    pub const PAGE_ADDRESS: u8 = 0x75;
    /// Start writing display RAM (set 1)
    pub const WRITE_DATA: u8 = 0x5C;
    /// Normal display
    pub const DISPLAY_NORMAL: u8 = 0xA6;
    /// Inverse display
    pub const DISPLAY_INVERSE: u8 = 0xA7;
    /// Display off
    pub const DISPLAY_OFF: u8 = 0xAE;
    /// Display on
    pub const DISPLAY_ON: u8 = 0xAF;
}

/// Largest value accepted by [`opcode::SET_CONTRAST`] (9-bit register)
pub const CONTRAST_MAX: u16 = 511;

/// Contrast programmed by [`INIT_SEQUENCE`]
pub const DEFAULT_CONTRAST: u16 = 0x0A + 0x04 * 64;

/// One controller command: opcode plus parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command<'a> {
    /// Opcode byte
    pub opcode: u8,
    /// Parameter bytes following the opcode
    pub params: &'a [u8],
}

impl<'a> Command<'a> {
    /// Command with parameters
    pub const fn new(opcode: u8, params: &'a [u8]) -> Self {
        Self { opcode, params }
    }

    /// Command without parameters
    pub const fn simple(opcode: u8) -> Command<'static> {
        Command {
            opcode,
            params: &[],
        }
    }

    /// Whether parameter bytes follow the opcode
    pub const fn has_params(&self) -> bool {
        !self.params.is_empty()
    }
}

/// Orientation-independent part of controller initialization
pub const INIT_SEQUENCE: &[Command<'static>] = &[
    Command::simple(opcode::EXT_SET_1),
    Command::simple(opcode::SLEEP_OUT),
    Command::simple(opcode::EXT_SET_2),
    Command::new(opcode::AUTO_READ, &[0x9F]),
    Command::new(opcode::ANALOG_CIRCUIT, &[0x00, 0x01, 0x03]),
    Command::new(opcode::TEMPERATURE_RANGE, &[0x1E, 0x28, 0x32]),
    Command::new(
        opcode::GRAY_LEVELS,
        &[
            0x01, 0x03, 0x05, 0x07, 0x09, 0x0B, 0x0D, 0x10, 0x11, 0x13, 0x15, 0x17, 0x19, 0x1B,
            0x1D, 0x1F,
        ],
    ),
    Command::simple(opcode::EXT_SET_1),
    Command::new(opcode::DISPLAY_CONTROL, &[0x00, 0x9F, 0x20]),
    Command::new(opcode::DISPLAY_MODE, &[0x11]),
    Command::new(opcode::SET_CONTRAST, &[0x0A, 0x04]),
    Command::new(opcode::POWER_CONTROL, &[0x0B]),
];

/// Full column window sent before every RAM write
pub const COLUMN_WINDOW: Command<'static> = Command::new(opcode::COLUMN_ADDRESS, &[0x00, 0xFF]);

/// Start of a RAM write
pub const WRITE_RAM: Command<'static> = Command::simple(opcode::WRITE_DATA);

/// Orientation-dependent commands, bound once per driver instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orientation {
    /// Bit order of each data byte (sent at init)
    pub data_format: Command<'static>,
    /// COM/SEG scan direction (sent at init)
    pub scan_direction: Command<'static>,
    /// Page window for RAM writes (sent by every `show`)
    pub page_window: Command<'static>,
}

const PAGES_FORWARD: Command<'static> = Command::new(opcode::PAGE_ADDRESS, &[0x01, 0x18]);
const PAGES_REVERSED: Command<'static> = Command::new(opcode::PAGE_ADDRESS, &[0x10, 0x27]);

static ORIENTATIONS: [Orientation; 4] = [
    Orientation {
        data_format: Command::simple(opcode::DATA_FORMAT_LSB),
        scan_direction: Command::new(opcode::SCAN_DIRECTION, &[0x03]),
        page_window: PAGES_FORWARD,
    },
    Orientation {
        data_format: Command::simple(opcode::DATA_FORMAT_LSB),
        scan_direction: Command::new(opcode::SCAN_DIRECTION, &[0x05]),
        page_window: PAGES_FORWARD,
    },
    Orientation {
        data_format: Command::simple(opcode::DATA_FORMAT_MSB),
        scan_direction: Command::new(opcode::SCAN_DIRECTION, &[0x00]),
        page_window: PAGES_REVERSED,
    },
    Orientation {
        data_format: Command::simple(opcode::DATA_FORMAT_MSB),
        scan_direction: Command::new(opcode::SCAN_DIRECTION, &[0x06]),
        page_window: PAGES_REVERSED,
    },
];

impl Orientation {
    /// Command set for a rotation
    pub fn for_rotation(rotation: Rotation) -> &'static Self {
        match rotation {
            Rotation::Deg0 => &ORIENTATIONS[0],
            Rotation::Deg90 => &ORIENTATIONS[1],
            Rotation::Deg180 => &ORIENTATIONS[2],
            Rotation::Deg270 => &ORIENTATIONS[3],
        }
    }
}

/// Split a contrast value into the two `SET_CONTRAST` parameter bytes
///
/// Returns `None` for values above [`CONTRAST_MAX`].
pub const fn contrast_params(value: u16) -> Option<[u8; 2]> {
    if value > CONTRAST_MAX {
        return None;
    }
    Some([(value % 64) as u8, (value / 64) as u8])
}
