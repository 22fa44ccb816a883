//! Core SSD1306 driver: bring-up sequence and framebuffer transfer.
//!
//! [`Ssd1306`] owns a [`Bus`] and a [`Bitmap`]. Drawing only touches the
//! bitmap; [`Ssd1306::flush()`] is the only operation that streams pixel
//! data to the controller.

use crate::bitmap::Bitmap;
use crate::bus::{Bus, OpenBus};
use crate::command::*;
use crate::config::PanelConfig;
use crate::error::{BitmapError, Error};

/// Widest panel the controller can address, in columns.
const MAX_WIDTH: usize = 128;

/// Tallest panel the controller can address, in rows.
const MAX_HEIGHT: usize = 64;

/// Horizontal scroll direction for [`Ssd1306::configure_scroll()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollDirection {
    Left,
    Right,
}

/// Blocking driver for an SSD1306 display behind a [`Bus`].
///
/// # Lifecycle
///
/// 1. [`Ssd1306::new()`] / [`Ssd1306::open()`] — acquire the bus and
///    allocate the framebuffer. No bus traffic.
/// 2. [`Ssd1306::initialize_device()`] — send the bring-up sequence.
/// 3. Draw into the framebuffer via [`Ssd1306::bitmap_mut()`] or
///    [`Ssd1306::write_raw_byte()`].
/// 4. [`Ssd1306::flush()`] — transfer the framebuffer to the panel.
///
/// Dropping the driver (or calling [`Ssd1306::release()`]) gives up the
/// bus without sending anything; the panel keeps showing its last frame.
///
/// The driver assumes exclusive use of the device address. Two drivers
/// talking to the same device interleave their transfers unpredictably.
///
/// # Example
///
/// ```no_run
/// use ssd1306_framebuffer::{I2cBus, Ssd1306, DEFAULT_ADDRESS};
///
/// # fn example(i2c: impl embedded_hal::i2c::I2c) {
/// let mut oled = Ssd1306::new(I2cBus::new(i2c), DEFAULT_ADDRESS, 64, 128).unwrap();
/// oled.initialize_device().unwrap();
/// oled.bitmap_mut().draw_pixel(5, 20, true);
/// oled.flush().unwrap();
/// # }
/// ```
pub struct Ssd1306<B> {
    bus: B,
    address: u8,
    width: usize,
    height: usize,
    /// Always equal to `bitmap.bytes_per_column()`.
    pages: usize,
    config: PanelConfig,
    bitmap: Bitmap,
    /// Set to `true` after a successful `initialize_device()` call.
    initialized: bool,
}

impl<B> Ssd1306<B>
where
    B: Bus,
{
    /// Construct a driver on an already-acquired bus.
    ///
    /// Register values are derived from `height` via
    /// [`PanelConfig::for_height()`].
    ///
    /// # Arguments
    /// * `bus` — transport (takes ownership for exclusive access).
    /// * `address` — 7-bit device address (typically `0x3C` or `0x3D`).
    /// * `height` — panel height in pixels, a multiple of 8, at most 64.
    /// * `width` — panel width in pixels, at most 128.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bitmap`] with [`BitmapError::InvalidDimensions`]
    /// if the geometry is not addressable.
    pub fn new(bus: B, address: u8, height: usize, width: usize) -> Result<Self, Error<B::Error>> {
        Self::with_config(bus, address, height, width, PanelConfig::for_height(height))
    }

    /// Like [`new()`](Self::new) with explicit register values.
    pub fn with_config(
        bus: B,
        address: u8,
        height: usize,
        width: usize,
        config: PanelConfig,
    ) -> Result<Self, Error<B::Error>> {
        let bitmap = Self::allocate(height, width)?;
        let pages = bitmap.bytes_per_column();

        Ok(Self {
            bus,
            address,
            width,
            height,
            pages,
            config,
            bitmap,
            initialized: false,
        })
    }

    fn allocate(height: usize, width: usize) -> Result<Bitmap, Error<B::Error>> {
        if width > MAX_WIDTH || height > MAX_HEIGHT {
            return Err(Error::Bitmap(BitmapError::InvalidDimensions {
                columns: width,
                rows: height,
            }));
        }
        Bitmap::new(width, height).map_err(Error::Bitmap)
    }

    // -----------------------------------------------------------------------
    // Protocol primitives
    // -----------------------------------------------------------------------

    /// Send one command byte in a command frame.
    pub fn send_command(&mut self, command: u8) -> Result<(), Error<B::Error>> {
        self.bus.write_byte(self.address, CONTROL_COMMAND, command)?;
        Ok(())
    }

    /// Send a block of bytes in a single data frame.
    pub fn send_data(&mut self, bytes: &[u8]) -> Result<(), Error<B::Error>> {
        Self::write_data(&mut self.bus, self.address, bytes)
    }

    fn write_data(bus: &mut B, address: u8, bytes: &[u8]) -> Result<(), Error<B::Error>> {
        bus.write_block(address, CONTROL_DATA, bytes)?;
        Ok(())
    }

    fn send_commands(&mut self, commands: &[u8]) -> Result<(), Error<B::Error>> {
        for &command in commands {
            self.send_command(command)?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Send the controller bring-up sequence.
    ///
    /// The order is fixed: addressing mode, segment re-map and COM scan
    /// direction must be in place before the first flush or the image
    /// comes out mirrored or shifted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] on the first failed write. The driver stays
    /// uninitialised in that case.
    pub fn initialize_device(&mut self) -> Result<(), Error<B::Error>> {
        let c = self.config;
        let sequence = [
            DISPLAY_OFF,
            SET_DISPLAY_CLOCK_DIV,
            c.clock_div,
            SET_MULTIPLEX,
            c.multiplex,
            SET_COM_PINS,
            c.com_pins,
            SET_DISPLAY_OFFSET,
            c.display_offset,
            SET_START_LINE_BASE, // line 0
            CHARGE_PUMP,
            c.charge_pump,
            MEMORY_MODE,
            MEMORY_MODE_HORIZONTAL,
            SEG_REMAP_BASE | 0x1,
            COM_SCAN_DEC,
            SET_CONTRAST,
            c.contrast,
            SET_PRECHARGE,
            c.precharge,
            SET_VCOM_DETECT,
            c.vcomh_deselect,
            NORMAL_DISPLAY,
            DISPLAY_ON,
        ];

        self.initialized = false;
        self.send_commands(&sequence)?;
        self.initialized = true;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "SSD1306 at {=u8:#x} initialised ({}x{})",
            self.address,
            self.width,
            self.height
        );

        Ok(())
    }

    /// Whether [`initialize_device()`](Self::initialize_device) has
    /// succeeded. No bus traffic.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Give up the driver and return the bus.
    ///
    /// No teardown command is sent; the panel stays on.
    pub fn release(self) -> B {
        self.bus
    }

    // -----------------------------------------------------------------------
    // Framebuffer
    // -----------------------------------------------------------------------

    /// The owned framebuffer.
    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    /// Mutable access to the owned framebuffer for pixel and block
    /// operations. Changes are not visible until the next
    /// [`flush()`](Self::flush).
    pub fn bitmap_mut(&mut self) -> &mut Bitmap {
        &mut self.bitmap
    }

    /// Clear the framebuffer without any bus traffic.
    pub fn clear_buffer(&mut self) {
        self.bitmap.clear();
    }

    /// Poke `value` into the framebuffer at linear byte `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bitmap`] with [`BitmapError::OffsetOutOfRange`] if
    /// `offset` is past the end of the framebuffer.
    pub fn write_raw_byte(&mut self, value: u8, offset: usize) -> Result<(), Error<B::Error>> {
        self.bitmap.write_byte(offset, value).map_err(Error::Bitmap)
    }

    /// Transfer the whole framebuffer to the display.
    ///
    /// Sets the column window to `[0, width-1]` and the page window to
    /// `[0, pages-1]`, then streams the framebuffer in [`CHUNK_SIZE`]-byte
    /// data frames. A trailing partial chunk is sent short.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] if
    /// [`initialize_device()`](Self::initialize_device) has not succeeded,
    /// or [`Error::Bus`] on the first failed write.
    pub fn flush(&mut self) -> Result<(), Error<B::Error>> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }

        // Geometry is capped at 128×64 in the constructor, so both fit.
        let last_column = (self.width - 1) as u8;
        let last_page = (self.pages - 1) as u8;
        self.send_commands(&[COLUMN_ADDR, 0, last_column, PAGE_ADDR, 0, last_page])?;

        let Self {
            bus,
            bitmap,
            address,
            ..
        } = self;
        for chunk in bitmap.as_bytes().chunks(CHUNK_SIZE) {
            Self::write_data(bus, *address, chunk)?;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "flushed {} bytes in {} chunks",
            self.bitmap.len(),
            self.bitmap.len().div_ceil(CHUNK_SIZE)
        );

        Ok(())
    }

    /// Clear the framebuffer, then [`flush()`](Self::flush) it.
    pub fn clear_and_flush(&mut self) -> Result<(), Error<B::Error>> {
        self.clear_buffer();
        self.flush()
    }

    // -----------------------------------------------------------------------
    // Register commands
    // -----------------------------------------------------------------------

    /// Set the RAM row mapped to the top of the panel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStartLine`] if `line > 63`; nothing is sent.
    pub fn set_display_start_line(&mut self, line: u8) -> Result<(), Error<B::Error>> {
        if line > MAX_START_LINE {
            return Err(Error::InvalidStartLine(line));
        }
        self.send_command(SET_START_LINE_BASE | line)
    }

    /// Set the contrast register.
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), Error<B::Error>> {
        self.send_commands(&[SET_CONTRAST, contrast])
    }

    /// Switch between inverted and normal pixel polarity.
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), Error<B::Error>> {
        self.send_command(if inverted { INVERT_DISPLAY } else { NORMAL_DISPLAY })
    }

    /// Turn the panel on or off. GDDRAM contents are retained while off.
    pub fn set_display_on(&mut self, on: bool) -> Result<(), Error<B::Error>> {
        self.send_command(if on { DISPLAY_ON } else { DISPLAY_OFF })
    }

    /// Start hardware scrolling with the controller's current scroll setup.
    pub fn activate_scroll(&mut self) -> Result<(), Error<B::Error>> {
        self.send_command(ACTIVATE_SCROLL)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("scroll activated");

        Ok(())
    }

    /// Stop hardware scrolling.
    pub fn deactivate_scroll(&mut self) -> Result<(), Error<B::Error>> {
        self.send_command(DEACTIVATE_SCROLL)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("scroll deactivated");

        Ok(())
    }

    /// Configure and start a horizontal scroll.
    ///
    /// Not implemented yet: sends nothing and always returns
    /// [`Error::Unsupported`].
    pub fn configure_scroll(
        &mut self,
        _direction: ScrollDirection,
        _speed: u8,
    ) -> Result<(), Error<B::Error>> {
        #[cfg(feature = "defmt")]
        defmt::warn!("configure_scroll is not implemented");

        Err(Error::Unsupported)
    }

    // -----------------------------------------------------------------------
    // Geometry
    // -----------------------------------------------------------------------

    /// Number of 8-row pages.
    pub fn page_count(&self) -> usize {
        self.pages
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Register values used by the bring-up sequence.
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }
}

impl<B> Ssd1306<B>
where
    B: OpenBus,
{
    /// Open bus number `bus` and construct a driver on it.
    ///
    /// Geometry is validated before the bus is touched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BusUnavailable`] if the bus cannot be opened, or
    /// [`Error::Bitmap`] for unaddressable geometry.
    pub fn open(bus: u8, address: u8, height: usize, width: usize) -> Result<Self, Error<B::Error>> {
        Self::allocate(height, width)?;
        let bus = B::open(bus).map_err(Error::BusUnavailable)?;

        Self::with_config(bus, address, height, width, PanelConfig::for_height(height))
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    /// One recorded bus transaction.
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Frame {
        address: u8,
        control: u8,
        bytes: Vec<u8>,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct BusFault;

    /// Bus double that records every frame and can fail on demand.
    #[derive(Default)]
    struct RecordingBus {
        frames: Vec<Frame>,
        /// Fail the write with this zero-based index.
        fail_at: Option<usize>,
    }

    impl RecordingBus {
        fn record(&mut self, address: u8, control: u8, bytes: &[u8]) -> Result<(), BusFault> {
            if self.fail_at == Some(self.frames.len()) {
                return Err(BusFault);
            }
            self.frames.push(Frame {
                address,
                control,
                bytes: bytes.to_vec(),
            });
            Ok(())
        }

        fn command_bytes(&self) -> Vec<u8> {
            self.frames
                .iter()
                .filter(|f| f.control == CONTROL_COMMAND)
                .flat_map(|f| f.bytes.iter().copied())
                .collect()
        }

        fn data_frames(&self) -> Vec<&Frame> {
            self.frames
                .iter()
                .filter(|f| f.control == CONTROL_DATA)
                .collect()
        }
    }

    impl Bus for RecordingBus {
        type Error = BusFault;

        fn write_byte(&mut self, address: u8, control: u8, value: u8) -> Result<(), BusFault> {
            self.record(address, control, &[value])
        }

        fn write_block(&mut self, address: u8, control: u8, bytes: &[u8]) -> Result<(), BusFault> {
            self.record(address, control, bytes)
        }
    }

    impl OpenBus for RecordingBus {
        fn open(bus: u8) -> Result<Self, BusFault> {
            if bus == 1 {
                Ok(Self::default())
            } else {
                Err(BusFault)
            }
        }
    }

    fn driver() -> Ssd1306<RecordingBus> {
        Ssd1306::new(RecordingBus::default(), DEFAULT_ADDRESS, 64, 128).unwrap()
    }

    fn initialized_driver() -> Ssd1306<RecordingBus> {
        let mut d = driver();
        d.initialize_device().unwrap();
        d.bus.frames.clear();
        d
    }

    const INIT_SEQUENCE_128X64: [u8; 24] = [
        0xAE, // display off
        0xD5, 0x80, // clock divide
        0xA8, 0x3F, // multiplex
        0xDA, 0x12, // COM pins
        0xD3, 0x00, // display offset
        0x40, // start line 0
        0x8D, 0x14, // charge pump
        0x20, 0x00, // horizontal addressing
        0xA1, // segment re-map
        0xC8, // COM scan decrement
        0x81, 0x8F, // contrast
        0xD9, 0xF1, // pre-charge
        0xDB, 0x40, // VCOMH deselect
        0xA6, // normal display
        0xAF, // display on
    ];

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn new_sends_nothing() {
        let d = driver();
        assert!(d.bus.frames.is_empty());
        assert!(!d.is_initialized());
        assert_eq!(d.page_count(), 8);
        assert_eq!(d.page_count(), d.bitmap().bytes_per_column());
        assert_eq!(d.width(), 128);
        assert_eq!(d.height(), 64);
        assert_eq!(d.address(), 0x3C);
        assert_eq!(d.bitmap().len(), 1024);
    }

    #[test]
    fn new_rejects_invalid_geometry() {
        for &(height, width) in &[(60, 128), (0, 128), (64, 0), (72, 128), (64, 129)] {
            assert!(
                matches!(
                    Ssd1306::new(RecordingBus::default(), 0x3C, height, width),
                    Err(Error::Bitmap(BitmapError::InvalidDimensions { .. }))
                ),
                "{}x{}",
                width,
                height
            );
        }
    }

    #[test]
    fn open_acquires_bus() {
        let d = Ssd1306::<RecordingBus>::open(1, 0x3D, 32, 128).unwrap();
        assert_eq!(d.address(), 0x3D);
        assert_eq!(d.page_count(), 4);
        assert_eq!(d.config(), &PanelConfig::for_height(32));
    }

    #[test]
    fn open_surfaces_bus_error() {
        assert!(matches!(
            Ssd1306::<RecordingBus>::open(7, 0x3C, 64, 128),
            Err(Error::BusUnavailable(BusFault))
        ));
    }

    #[test]
    fn open_checks_geometry_before_bus() {
        assert!(matches!(
            Ssd1306::<RecordingBus>::open(7, 0x3C, 60, 128),
            Err(Error::Bitmap(BitmapError::InvalidDimensions { .. }))
        ));
    }

    #[test]
    fn open_matches_new() {
        let opened = Ssd1306::<RecordingBus>::open(1, 0x3C, 64, 128).unwrap();
        let built = driver();
        assert_eq!(opened.config(), built.config());
        assert_eq!(opened.page_count(), built.page_count());
        assert_eq!(opened.bitmap(), built.bitmap());
        assert!(!opened.is_initialized());
    }

    #[test]
    fn release_sends_no_teardown() {
        let bus = initialized_driver().release();
        assert!(bus.frames.is_empty());
    }

    // ── Protocol primitives ──────────────────────────────────────────

    #[test]
    fn send_command_uses_command_prefix() {
        let mut d = driver();
        d.send_command(0xAF).unwrap();
        assert_eq!(
            d.bus.frames,
            vec![Frame {
                address: 0x3C,
                control: 0x00,
                bytes: vec![0xAF]
            }]
        );
    }

    #[test]
    fn send_data_uses_data_prefix() {
        let mut d = driver();
        d.send_data(&[1, 2, 3]).unwrap();
        assert_eq!(
            d.bus.frames,
            vec![Frame {
                address: 0x3C,
                control: 0x40,
                bytes: vec![1, 2, 3]
            }]
        );
    }

    // ── Initialisation ───────────────────────────────────────────────

    #[test]
    fn initialize_device_sends_exact_sequence() {
        let mut d = driver();
        d.initialize_device().unwrap();

        assert!(d.is_initialized());
        assert_eq!(d.bus.frames.len(), INIT_SEQUENCE_128X64.len());
        assert!(d.bus.frames.iter().all(|f| f.control == CONTROL_COMMAND
            && f.address == 0x3C
            && f.bytes.len() == 1));
        assert_eq!(d.bus.command_bytes(), INIT_SEQUENCE_128X64);
    }

    #[test]
    fn initialize_device_derives_geometry_registers() {
        let mut d = Ssd1306::new(RecordingBus::default(), 0x3C, 32, 128).unwrap();
        d.initialize_device().unwrap();

        let sent = d.bus.command_bytes();
        assert_eq!(&sent[3..7], &[0xA8, 0x1F, 0xDA, 0x02]);
    }

    #[test]
    fn initialize_device_uses_custom_config() {
        let config = PanelConfig {
            contrast: 0xCF,
            ..PanelConfig::default()
        };
        let mut d = Ssd1306::with_config(RecordingBus::default(), 0x3C, 64, 128, config).unwrap();
        d.initialize_device().unwrap();

        let sent = d.bus.command_bytes();
        assert_eq!(&sent[16..18], &[0x81, 0xCF]);
    }

    #[test]
    fn initialize_device_propagates_bus_error() {
        let mut d = driver();
        d.bus.fail_at = Some(5);

        assert!(matches!(d.initialize_device(), Err(Error::Bus(BusFault))));
        assert!(!d.is_initialized());
        assert_eq!(d.bus.frames.len(), 5);
    }

    // ── Flush ────────────────────────────────────────────────────────

    #[test]
    fn flush_requires_initialization() {
        let mut d = driver();
        assert!(matches!(d.flush(), Err(Error::NotInitialized)));
        assert!(matches!(d.clear_and_flush(), Err(Error::NotInitialized)));
        assert!(d.bus.frames.is_empty());
    }

    #[test]
    fn flush_sets_window_then_streams_chunks() {
        let mut d = initialized_driver();
        d.flush().unwrap();

        let commands: Vec<u8> = d.bus.frames[..6]
            .iter()
            .flat_map(|f| f.bytes.iter().copied())
            .collect();
        assert_eq!(commands, vec![0x21, 0, 127, 0x22, 0, 7]);
        assert!(d.bus.frames[..6]
            .iter()
            .all(|f| f.control == CONTROL_COMMAND));

        let data = d.bus.data_frames();
        assert_eq!(data.len(), 64);
        assert_eq!(d.bus.frames.len(), 6 + 64);
        assert!(data.iter().all(|f| f.bytes.len() == 16 && f.address == 0x3C));
    }

    #[test]
    fn flush_streams_bytes_in_offset_order() {
        let mut d = initialized_driver();
        for offset in 0..1024 {
            d.write_raw_byte((offset % 251) as u8, offset).unwrap();
        }
        d.flush().unwrap();

        let streamed: Vec<u8> = d
            .bus
            .data_frames()
            .iter()
            .flat_map(|f| f.bytes.iter().copied())
            .collect();
        assert_eq!(streamed.len(), 1024);
        assert_eq!(streamed.as_slice(), d.bitmap().as_bytes());
    }

    #[test]
    fn flush_sends_short_final_chunk() {
        // 20 columns × 1 page = 20 bytes → 16 + 4
        let mut d = Ssd1306::new(RecordingBus::default(), 0x3C, 8, 20).unwrap();
        d.initialize_device().unwrap();
        d.bus.frames.clear();
        d.flush().unwrap();

        assert_eq!(&d.bus.command_bytes(), &[0x21, 0, 19, 0x22, 0, 0]);
        let sizes: Vec<usize> = d.bus.data_frames().iter().map(|f| f.bytes.len()).collect();
        assert_eq!(sizes, vec![16, 4]);
    }

    #[test]
    fn initialize_short_panel_keeps_minimum_multiplex() {
        let mut d = Ssd1306::new(RecordingBus::default(), 0x3C, 8, 20).unwrap();
        d.initialize_device().unwrap();

        let sent = d.bus.command_bytes();
        assert_eq!(&sent[3..7], &[0xA8, 0x0F, 0xDA, 0x02]);
    }

    #[test]
    fn flush_data_frames_match_send_data() {
        let mut d = initialized_driver();
        d.write_raw_byte(0x5A, 0).unwrap();
        d.flush().unwrap();
        let first = d.bus.data_frames()[0].clone();
        d.bus.frames.clear();

        let chunk = d.bitmap().as_bytes()[..CHUNK_SIZE].to_vec();
        d.send_data(&chunk).unwrap();
        assert_eq!(d.bus.frames, vec![first]);
    }

    #[test]
    fn flush_propagates_bus_error_mid_stream() {
        let mut d = initialized_driver();
        d.bus.fail_at = Some(10);

        assert!(matches!(d.flush(), Err(Error::Bus(BusFault))));
        assert_eq!(d.bus.frames.len(), 10);
    }

    #[test]
    fn pixels_round_trip_to_wire() {
        let mut d = initialized_driver();
        let pixels = [(0, 0), (5, 20), (127, 63), (64, 31), (64, 32), (1, 7)];
        for &(x, y) in &pixels {
            d.bitmap_mut().draw_pixel(x, y, true);
        }
        d.flush().unwrap();

        let mut expected = vec![0u8; 1024];
        for &(x, y) in &pixels {
            let offset = (y / 8) as usize + 8 * x as usize;
            expected[offset] |= 1 << (y % 8);
        }

        let streamed: Vec<u8> = d
            .bus
            .data_frames()
            .iter()
            .flat_map(|f| f.bytes.iter().copied())
            .collect();
        assert_eq!(streamed, expected);
    }

    #[test]
    fn clear_and_flush_sends_blank_frame() {
        let mut d = initialized_driver();
        d.bitmap_mut().draw_pixel(3, 3, true);
        d.clear_and_flush().unwrap();

        assert!(d.bitmap().as_bytes().iter().all(|&b| b == 0));
        let data = d.bus.data_frames();
        assert_eq!(data.len(), 64);
        assert!(data.iter().all(|f| f.bytes.iter().all(|&b| b == 0)));
    }

    #[test]
    fn clear_buffer_sends_nothing() {
        let mut d = initialized_driver();
        d.bitmap_mut().draw_pixel(3, 3, true);
        d.clear_buffer();
        assert!(!d.bitmap().pixel(3, 3));
        assert!(d.bus.frames.is_empty());
    }

    // ── Raw writes ───────────────────────────────────────────────────

    #[test]
    fn write_raw_byte_pokes_framebuffer() {
        let mut d = driver();
        d.write_raw_byte(0xFF, 42).unwrap();
        assert_eq!(d.bitmap().as_bytes()[42], 0xFF);
        assert!(d.bitmap().pixel(5, 16));
        assert!(d.bitmap().pixel(5, 23));
        assert!(d.bus.frames.is_empty());
    }

    #[test]
    fn write_raw_byte_out_of_range() {
        let mut d = driver();
        assert!(matches!(
            d.write_raw_byte(0xFF, 1024),
            Err(Error::Bitmap(BitmapError::OffsetOutOfRange {
                offset: 1024,
                len: 1024
            }))
        ));
    }

    // ── Register commands ────────────────────────────────────────────

    #[test]
    fn set_display_start_line() {
        let mut d = driver();
        d.set_display_start_line(5).unwrap();
        d.set_display_start_line(63).unwrap();
        assert_eq!(d.bus.command_bytes(), vec![0x45, 0x7F]);
    }

    #[test]
    fn set_display_start_line_out_of_range() {
        let mut d = driver();
        assert!(matches!(
            d.set_display_start_line(64),
            Err(Error::InvalidStartLine(64))
        ));
        assert!(d.bus.frames.is_empty());
    }

    #[test]
    fn scroll_commands() {
        let mut d = driver();
        d.activate_scroll().unwrap();
        d.deactivate_scroll().unwrap();
        assert_eq!(d.bus.command_bytes(), vec![0x2F, 0x2E]);
    }

    #[test]
    fn configure_scroll_is_unsupported() {
        let mut d = driver();
        assert!(matches!(
            d.configure_scroll(ScrollDirection::Left, 3),
            Err(Error::Unsupported)
        ));
        assert!(d.bus.frames.is_empty());
    }

    #[test]
    fn contrast_polarity_and_power() {
        let mut d = driver();
        d.set_contrast(0x10).unwrap();
        d.set_inverted(true).unwrap();
        d.set_inverted(false).unwrap();
        d.set_display_on(false).unwrap();
        d.set_display_on(true).unwrap();
        assert_eq!(
            d.bus.command_bytes(),
            vec![0x81, 0x10, 0xA7, 0xA6, 0xAE, 0xAF]
        );
    }
}
