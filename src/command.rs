//! SSD1306 command opcodes and I2C framing constants.
//!
//! Every transfer to the controller starts with a control byte that tells
//! it how to interpret the bytes that follow:
//! - [`CONTROL_COMMAND`] (Co = 0, D/C# = 0) — command stream.
//! - [`CONTROL_DATA`] (Co = 0, D/C# = 1) — GDDRAM pixel data.
//!
//! Commands that take arguments are sent as the opcode followed by one
//! command frame per argument byte.

// ---------------------------------------------------------------------------
// Framing
// ---------------------------------------------------------------------------

/// Default 7-bit I2C address (SA0 low). Boards with SA0 high use `0x3D`.
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Control prefix for command frames.
pub const CONTROL_COMMAND: u8 = 0x00;

/// Control prefix for data frames.
pub const CONTROL_DATA: u8 = 0x40;

/// Number of framebuffer bytes sent per data frame during a flush.
pub const CHUNK_SIZE: usize = 16;

// ---------------------------------------------------------------------------
// Fundamental commands
// ---------------------------------------------------------------------------

/// Contrast control, followed by one argument byte (0x00–0xFF).
pub const SET_CONTRAST: u8 = 0x81;
pub const DISPLAY_ALL_ON_RESUME: u8 = 0xA4;
pub const DISPLAY_ALL_ON: u8 = 0xA5;
pub const NORMAL_DISPLAY: u8 = 0xA6;
pub const INVERT_DISPLAY: u8 = 0xA7;
pub const DISPLAY_OFF: u8 = 0xAE;
pub const DISPLAY_ON: u8 = 0xAF;

// ---------------------------------------------------------------------------
// Hardware configuration
// ---------------------------------------------------------------------------

pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
pub const SET_COM_PINS: u8 = 0xDA;
pub const SET_VCOM_DETECT: u8 = 0xDB;
pub const SET_DISPLAY_CLOCK_DIV: u8 = 0xD5;
pub const SET_PRECHARGE: u8 = 0xD9;
pub const SET_MULTIPLEX: u8 = 0xA8;

/// Start line register base. The line number (0–63) is OR'd into the low
/// six bits: `SET_START_LINE_BASE | line`.
pub const SET_START_LINE_BASE: u8 = 0x40;

/// Highest start line the controller can address.
pub const MAX_START_LINE: u8 = 63;

/// Segment re-map base. `| 0x1` maps column 127 to SEG0.
pub const SEG_REMAP_BASE: u8 = 0xA0;
pub const COM_SCAN_INC: u8 = 0xC0;
pub const COM_SCAN_DEC: u8 = 0xC8;
pub const CHARGE_PUMP: u8 = 0x8D;

// ---------------------------------------------------------------------------
// Addressing
// ---------------------------------------------------------------------------

pub const SET_LOW_COLUMN: u8 = 0x00;
pub const SET_HIGH_COLUMN: u8 = 0x10;
pub const MEMORY_MODE: u8 = 0x20;
pub const COLUMN_ADDR: u8 = 0x21;
pub const PAGE_ADDR: u8 = 0x22;

/// `MEMORY_MODE` argument: horizontal addressing. Column pointer wraps to
/// the next page at the end of the column window.
pub const MEMORY_MODE_HORIZONTAL: u8 = 0x00;
pub const MEMORY_MODE_VERT: u8 = 0x01;
pub const MEMORY_MODE_PAGE: u8 = 0x02;

// ---------------------------------------------------------------------------
// Power
// ---------------------------------------------------------------------------

pub const EXTERNAL_VCC: u8 = 0x1;
pub const SWITCH_CAP_VCC: u8 = 0x2;

// ---------------------------------------------------------------------------
// Scrolling
// ---------------------------------------------------------------------------

pub const ACTIVATE_SCROLL: u8 = 0x2F;
pub const DEACTIVATE_SCROLL: u8 = 0x2E;
pub const SET_VERTICAL_SCROLL_AREA: u8 = 0xA3;
pub const RIGHT_HORIZONTAL_SCROLL: u8 = 0x26;
pub const LEFT_HORIZONTAL_SCROLL: u8 = 0x27;
pub const VERTICAL_AND_RIGHT_HORIZONTAL_SCROLL: u8 = 0x29;
pub const VERTICAL_AND_LEFT_HORIZONTAL_SCROLL: u8 = 0x2A;
