//! ST75256 display controller
//!
//! Owns the framebuffer and a transport. Drawing only touches RAM; nothing
//! reaches the panel until [`St75256::show`] streams the whole buffer.
//!
//! # Usage
//!
//! ```ignore
//! const BUF: usize = buffer_size(256, 160, Rotation::Deg90);
//!
//! let iface = I2cInterface::new(Compat(i2c), Compat(reset), &mut delay, I2cConfig::default())?;
//! let mut display: St75256<_, BUF> = St75256::new(iface, DisplayConfig::default())?;
//!
//! display.set_pixel(10, 20, GrayLevel::DARK)?;
//! display.show()?;
//! ```

use crate::color::GrayLevel;
use crate::command::{
    contrast_params, opcode, Command, Orientation, COLUMN_WINDOW, DEFAULT_CONTRAST,
    INIT_SEQUENCE, WRITE_RAM,
};
use crate::config::{DisplayConfig, Rotation};
use crate::error::{BoundsError, DisplayError};
use crate::framebuffer::FrameBuffer;
use crate::interface::Transport;
use crate::surface::GraySurface;

/// ST75256 driver
///
/// `N` is the framebuffer length, see [`crate::buffer_size`].
pub struct St75256<T, const N: usize> {
    interface: T,
    framebuffer: FrameBuffer<N>,
    rotation: Rotation,
    /// Orientation commands, bound once at construction
    orientation: &'static Orientation,
    contrast: u16,
    inverted: bool,
    powered: bool,
}

impl<T, const N: usize> St75256<T, N>
where
    T: Transport,
{
    /// Initialize the controller and return a powered-on display
    ///
    /// Sends the init table, the orientation commands, a blank frame and
    /// finally display-on. `N` must match the configured geometry.
    pub fn new(interface: T, config: DisplayConfig) -> Result<Self, DisplayError<T::BusError>> {
        let (width, height) = config.drawable_size();
        let framebuffer = FrameBuffer::new(width, height, config.rotation.packing())?;

        let mut display = Self {
            interface,
            framebuffer,
            rotation: config.rotation,
            orientation: Orientation::for_rotation(config.rotation),
            contrast: DEFAULT_CONTRAST,
            inverted: false,
            powered: false,
        };
        display.init()?;

        Ok(display)
    }

    fn init(&mut self) -> Result<(), DisplayError<T::BusError>> {
        for &command in INIT_SEQUENCE {
            self.interface.send_command(command)?;
        }
        self.interface.send_command(self.orientation.data_format)?;
        self.interface.send_command(self.orientation.scan_direction)?;

        self.framebuffer.fill(GrayLevel::WHITE);
        self.show()?;
        self.power_on()?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "ST75256 initialized: {}x{} rotation {}",
            self.framebuffer.width(),
            self.framebuffer.height(),
            self.rotation.index()
        );

        Ok(())
    }

    /// Turn the panel on
    pub fn power_on(&mut self) -> Result<(), DisplayError<T::BusError>> {
        self.interface
            .send_command(Command::simple(opcode::DISPLAY_ON))?;
        self.powered = true;
        Ok(())
    }

    /// Turn the panel off; display RAM is retained
    pub fn power_off(&mut self) -> Result<(), DisplayError<T::BusError>> {
        self.interface
            .send_command(Command::simple(opcode::DISPLAY_OFF))?;
        self.powered = false;
        Ok(())
    }

    /// Set the contrast (Vop), `0..=511`
    ///
    /// Values above 511 are ignored: nothing is sent and `Ok(())` is
    /// returned. Usable contrast on most panels sits around 245-280.
    pub fn set_contrast(&mut self, value: u16) -> Result<(), DisplayError<T::BusError>> {
        let Some(params) = contrast_params(value) else {
            #[cfg(feature = "defmt")]
            defmt::warn!("Ignoring contrast {} (max 511)", value);
            return Ok(());
        };

        self.interface
            .send_command(Command::new(opcode::SET_CONTRAST, &params))?;
        self.contrast = value;
        Ok(())
    }

    /// Swap light and dark on the panel without touching the buffer
    pub fn set_invert(&mut self, inverted: bool) -> Result<(), DisplayError<T::BusError>> {
        let op = if inverted {
            opcode::DISPLAY_INVERSE
        } else {
            opcode::DISPLAY_NORMAL
        };
        self.interface.send_command(Command::simple(op))?;
        self.inverted = inverted;
        Ok(())
    }

    /// Transfer the whole framebuffer to display RAM
    ///
    /// If the bus fails part way, the panel shows a partially written frame
    /// until the next successful `show`.
    pub fn show(&mut self) -> Result<(), DisplayError<T::BusError>> {
        self.interface.send_command(COLUMN_WINDOW)?;
        self.interface.send_command(self.orientation.page_window)?;
        self.interface.send_command(WRITE_RAM)?;
        self.interface.send_data(self.framebuffer.as_bytes())?;

        #[cfg(feature = "defmt")]
        defmt::trace!("Streamed {} bytes", N);

        Ok(())
    }

    /// Copy a surface into the framebuffer, see [`FrameBuffer::blit`]
    pub fn blit<S>(&mut self, source: &S, x: i32, y: i32, key: Option<GrayLevel>)
    where
        S: GraySurface + ?Sized,
    {
        self.framebuffer.blit(source, x, y, key);
    }

    /// Power the panel off and give back the transport
    pub fn shutdown(mut self) -> Result<T, DisplayError<T::BusError>> {
        self.power_off()?;
        Ok(self.interface)
    }
}

impl<T, const N: usize> St75256<T, N> {
    /// Packed framebuffer exactly as `show` transmits it
    pub fn packed_buffer(&self) -> &[u8] {
        self.framebuffer.as_bytes()
    }

    /// The framebuffer
    pub fn framebuffer(&self) -> &FrameBuffer<N> {
        &self.framebuffer
    }

    /// The framebuffer, mutably
    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer<N> {
        &mut self.framebuffer
    }

    /// Mounting rotation
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Last contrast value sent to the controller
    pub fn contrast(&self) -> u16 {
        self.contrast
    }

    /// Whether the panel is inverted
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Whether the panel is on
    pub fn is_powered_on(&self) -> bool {
        self.powered
    }

    /// Give back the transport without touching the panel
    pub fn release(self) -> T {
        self.interface
    }
}

impl<T, const N: usize> GraySurface for St75256<T, N> {
    fn dimensions(&self) -> (u16, u16) {
        self.framebuffer.dimensions()
    }

    fn pixel(&self, x: u16, y: u16) -> Option<GrayLevel> {
        self.framebuffer.pixel(x, y)
    }

    fn set_pixel(&mut self, x: u16, y: u16, gray: GrayLevel) -> Result<(), BoundsError> {
        self.framebuffer.set_pixel(x, y, gray)
    }

    fn fill(&mut self, gray: GrayLevel) {
        self.framebuffer.fill(gray);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::buffer_size;
    use crate::error::{BufferSizeError, PinRole};
    use crate::interface::{I2cInterface, SpiInterface};
    use crate::mock::{BusEvent, Log, MockDelay, MockI2c, MockPin, MockSpi, MockTransport};
    use st75256_hal::I2cConfig;

    const PORTRAIT: DisplayConfig = DisplayConfig::new(256, 50, Rotation::Deg90);
    const PORTRAIT_LEN: usize = buffer_size(256, 50, Rotation::Deg90);

    const SMALL_LEN: usize = buffer_size(16, 8, Rotation::Deg0);

    fn cmd(opcode: u8, params: &[u8]) -> BusEvent {
        BusEvent::Command(opcode, params.to_vec())
    }

    fn display(log: &Log) -> St75256<MockTransport, PORTRAIT_LEN> {
        St75256::new(MockTransport::new(log), PORTRAIT).unwrap()
    }

    fn small(log: &Log, rotation: Rotation) -> St75256<MockTransport, SMALL_LEN> {
        St75256::new(
            MockTransport::new(log),
            DisplayConfig::new(16, 8, rotation),
        )
        .unwrap()
    }

    #[test]
    fn test_init_sequence_256x50_rotation_1() {
        let log = Log::default();
        let display = display(&log);

        let mut expected: Vec<BusEvent> = INIT_SEQUENCE
            .iter()
            .map(|c| cmd(c.opcode, c.params))
            .collect();
        expected.extend([
            cmd(0x08, &[]),
            cmd(0xBC, &[0x05]),
            cmd(0x15, &[0x00, 0xFF]),
            cmd(0x75, &[0x01, 0x18]),
            cmd(0x5C, &[]),
            BusEvent::Data(vec![0; 3200]),
            cmd(0xAF, &[]),
        ]);

        assert_eq!(log.events(), expected);
        assert!(display.is_powered_on());
        assert_eq!(display.dimensions(), (50, 256));
        assert_eq!(display.contrast(), 266);
    }

    #[test]
    fn test_wrong_buffer_size_rejected_before_traffic() {
        let log = Log::default();
        let result = St75256::<_, 100>::new(MockTransport::new(&log), PORTRAIT);

        assert!(matches!(
            result,
            Err(DisplayError::BufferSize(BufferSizeError {
                expected: 3200,
                actual: 100
            }))
        ));
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_contrast_out_of_range_is_noop() {
        let log = Log::default();
        let mut display = display(&log);
        log.clear();

        display.set_contrast(512).unwrap();
        display.set_contrast(1000).unwrap();

        assert!(log.events().is_empty());
        assert_eq!(display.contrast(), 266);
    }

    #[test]
    fn test_contrast_splits_fields() {
        let log = Log::default();
        let mut display = display(&log);
        display.fill(GrayLevel::DARK);
        let before = display.packed_buffer().to_vec();
        log.clear();

        display.set_contrast(300).unwrap();

        assert_eq!(log.events(), [cmd(0x81, &[44, 4])]);
        assert_eq!(display.contrast(), 300);
        assert_eq!(display.packed_buffer(), &before[..]);
    }

    #[test]
    fn test_power_and_invert() {
        let log = Log::default();
        let mut display = display(&log);
        log.clear();

        display.power_off().unwrap();
        assert!(!display.is_powered_on());
        display.power_on().unwrap();
        display.set_invert(true).unwrap();
        assert!(display.is_inverted());
        display.set_invert(false).unwrap();

        assert_eq!(
            log.events(),
            [
                cmd(0xAE, &[]),
                cmd(0xAF, &[]),
                cmd(0xA7, &[]),
                cmd(0xA6, &[]),
            ]
        );
    }

    #[test]
    fn test_drawing_is_memory_only() {
        let log = Log::default();
        let mut display = display(&log);
        log.clear();

        display.set_pixel(3, 7, GrayLevel::BLACK).unwrap();
        display.fill(GrayLevel::LIGHT);
        assert_eq!(
            display.set_pixel(50, 0, GrayLevel::BLACK),
            Err(BoundsError { x: 50, y: 0 })
        );

        assert!(log.events().is_empty());
    }

    #[test]
    fn test_show_streams_packed_buffer() {
        let log = Log::default();
        let mut display = display(&log);
        display.fill(GrayLevel::LIGHT);
        log.clear();

        display.show().unwrap();

        let events = log.events();
        assert_eq!(
            &events[..3],
            [
                cmd(0x15, &[0x00, 0xFF]),
                cmd(0x75, &[0x01, 0x18]),
                cmd(0x5C, &[]),
            ]
        );
        assert_eq!(events.len(), 4);
        let BusEvent::Data(sent) = &events[3] else {
            panic!("expected a data block, got {:?}", events[3]);
        };
        assert_eq!(&sent[..], display.packed_buffer());
        assert!(sent.iter().all(|&b| b == 0x55));
    }

    #[test]
    fn test_vertical_padding_rows_are_sent() {
        const LEN: usize = buffer_size(256, 50, Rotation::Deg0);
        let log = Log::default();
        let config = DisplayConfig::new(256, 50, Rotation::Deg0);
        let mut display: St75256<_, LEN> = St75256::new(MockTransport::new(&log), config).unwrap();
        log.clear();

        display.show().unwrap();

        // 13 pages of 256 columns, the last page half padding
        assert_eq!(LEN, 3328);
        let BusEvent::Data(sent) = &log.events()[3] else {
            panic!("expected a data block");
        };
        assert_eq!(sent.len(), 3328);
    }

    #[test]
    fn test_quarter_turn_packs_leftmost_pixel_high() {
        const LEN: usize = buffer_size(256, 8, Rotation::Deg90);
        let log = Log::default();
        let config = DisplayConfig::new(256, 8, Rotation::Deg90);
        let mut display: St75256<_, LEN> = St75256::new(MockTransport::new(&log), config).unwrap();
        log.clear();

        display.set_pixel(0, 0, GrayLevel::BLACK).unwrap();
        display.set_pixel(7, 1, GrayLevel::LIGHT).unwrap();
        display.show().unwrap();

        assert_eq!(display.packed_buffer()[0], 0xC0);
        // Pixel (7, 1) is linear index 15: byte 3, bits 1:0
        assert_eq!(display.packed_buffer()[3], 0b00_00_00_01);
        let BusEvent::Data(sent) = &log.events()[3] else {
            panic!("expected a data block");
        };
        assert_eq!(sent[0], 0xC0);
    }

    fn page_window_sent<const N: usize>(rotation: Rotation) -> BusEvent {
        let log = Log::default();
        let config = DisplayConfig::new(256, 50, rotation);
        let mut display: St75256<_, N> = St75256::new(MockTransport::new(&log), config).unwrap();
        log.clear();

        display.show().unwrap();
        log.events()[1].clone()
    }

    #[test]
    fn test_page_window_follows_rotation() {
        let forward = cmd(0x75, &[0x01, 0x18]);
        let reversed = cmd(0x75, &[0x10, 0x27]);

        assert_eq!(page_window_sent::<3328>(Rotation::Deg0), forward);
        assert_eq!(page_window_sent::<3200>(Rotation::Deg90), forward);
        assert_eq!(page_window_sent::<3328>(Rotation::Deg180), reversed);
        assert_eq!(page_window_sent::<3200>(Rotation::Deg270), reversed);
    }

    #[test]
    fn test_half_turn_differs_on_the_wire_only() {
        let log_0 = Log::default();
        let mut deg0 = small(&log_0, Rotation::Deg0);
        let log_180 = Log::default();
        let mut deg180 = small(&log_180, Rotation::Deg180);

        for display in [&mut deg0, &mut deg180] {
            display.set_pixel(1, 2, GrayLevel::BLACK).unwrap();
            display.set_pixel(14, 5, GrayLevel::LIGHT).unwrap();
        }

        // Same packing function, same bytes
        assert_eq!(deg0.packed_buffer(), deg180.packed_buffer());

        // The 180 degree turn is done by the controller
        deg0.show().unwrap();
        deg180.show().unwrap();
        assert_ne!(log_0.events(), log_180.events());
        assert!(log_0.events().contains(&cmd(0xBC, &[0x03])));
        assert!(log_180.events().contains(&cmd(0xBC, &[0x00])));
    }

    #[test]
    fn test_bus_error_propagates_from_init() {
        let log = Log::default();
        let transport = MockTransport::failing_after(&log, 3);
        let result = St75256::<_, PORTRAIT_LEN>::new(transport, PORTRAIT);

        assert!(matches!(result, Err(DisplayError::Bus(()))));
        assert_eq!(log.events().len(), 3);
    }

    #[test]
    fn test_failed_power_off_keeps_state() {
        let log = Log::default();
        // 12 table + 2 orientation + 3 window + data + power on
        let transport = MockTransport::failing_after(&log, INIT_SEQUENCE.len() + 7);
        let mut display: St75256<_, PORTRAIT_LEN> = St75256::new(transport, PORTRAIT).unwrap();

        assert_eq!(display.power_off(), Err(DisplayError::Bus(())));
        assert!(display.is_powered_on());
    }

    #[test]
    fn test_shutdown_powers_off() {
        let log = Log::default();
        let display = display(&log);
        log.clear();

        let _transport = display.shutdown().unwrap();

        assert_eq!(log.events(), [cmd(0xAE, &[])]);
    }

    #[test]
    fn test_blit_into_display() {
        let log = Log::default();
        let mut display = small(&log, Rotation::Deg0);
        let mut sprite = FrameBuffer::<4>::new(2, 8, crate::Packing::Horizontal).unwrap();
        sprite.fill(GrayLevel::DARK);

        display.blit(&sprite, 15, 0, None);

        assert_eq!(display.pixel(15, 7), Some(GrayLevel::DARK));
        assert_eq!(display.pixel(14, 0), Some(GrayLevel::WHITE));
    }

    #[test]
    fn test_show_over_i2c_frames_each_command() {
        let log = Log::default();
        let iface = I2cInterface::new(
            MockI2c::new(&log),
            MockPin::new(&log, PinRole::Reset),
            &mut MockDelay::new(&log),
            I2cConfig::default(),
        )
        .unwrap();
        let mut display: St75256<_, PORTRAIT_LEN> = St75256::new(iface, PORTRAIT).unwrap();
        display.fill(GrayLevel::LIGHT);
        log.clear();

        display.show().unwrap();

        assert_eq!(
            log.events(),
            [
                BusEvent::I2c(0x3C, vec![0x80, 0x15]),
                BusEvent::I2c(0x3C, vec![0x40, 0x00, 0xFF]),
                BusEvent::I2c(0x3C, vec![0x80, 0x75]),
                BusEvent::I2c(0x3C, vec![0x40, 0x01, 0x18]),
                BusEvent::I2c(0x3C, vec![0x80, 0x5C]),
                BusEvent::I2c(0x3C, [&[0x40][..], &[0x55; 3200][..]].concat()),
            ]
        );
    }

    #[test]
    fn test_i2c_init_ends_with_power_on() {
        let log = Log::default();
        let iface = I2cInterface::new(
            MockI2c::new(&log),
            MockPin::new(&log, PinRole::Reset),
            &mut MockDelay::new(&log),
            I2cConfig::default(),
        )
        .unwrap();
        let _display: St75256<_, PORTRAIT_LEN> = St75256::new(iface, PORTRAIT).unwrap();

        let events = log.events();
        assert_eq!(events.last(), Some(&BusEvent::I2c(0x3C, vec![0x80, 0xAF])));

        // Every transfer is either an opcode or data, never a mix
        let bus_writes: Vec<&Vec<u8>> = events
            .iter()
            .filter_map(|e| match e {
                BusEvent::I2c(_, bytes) => Some(bytes),
                _ => None,
            })
            .collect();
        for bytes in &bus_writes {
            match bytes[0] {
                0x80 => assert_eq!(bytes.len(), 2),
                0x40 => assert!(bytes.len() > 1),
                other => panic!("unexpected control byte {:#04x}", other),
            }
        }
    }

    #[test]
    fn test_spi_round_trip() {
        let log = Log::default();
        let iface = SpiInterface::new(
            MockSpi::new(&log),
            MockPin::new(&log, PinRole::DataCommand),
            MockPin::new(&log, PinRole::ChipSelect),
            MockPin::new(&log, PinRole::Reset),
            &mut MockDelay::new(&log),
        )
        .unwrap();
        let mut display: St75256<_, SMALL_LEN> =
            St75256::new(iface, DisplayConfig::new(16, 8, Rotation::Deg0)).unwrap();
        display.set_pixel(0, 0, GrayLevel::BLACK).unwrap();
        log.clear();

        display.show().unwrap();

        let spi_writes: Vec<Vec<u8>> = log
            .events()
            .into_iter()
            .filter_map(|e| match e {
                BusEvent::Spi(bytes) => Some(bytes),
                _ => None,
            })
            .collect();
        assert_eq!(
            spi_writes,
            [
                vec![0x15],
                vec![0x00, 0xFF],
                vec![0x75],
                vec![0x01, 0x18],
                vec![0x5C],
                display.packed_buffer().to_vec(),
            ]
        );
        assert_eq!(display.packed_buffer()[0], 0x03);
    }
}
