//! Error types for the SSD1306 driver.

use core::fmt;

/// Errors raised by [`Bitmap`](crate::Bitmap) operations.
///
/// Out-of-range pixel coordinates are **not** errors; pixel writes outside
/// the bitmap are silently ignored. These variants cover the operations
/// that would otherwise corrupt or misdescribe the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitmapError {
    /// Columns must be non-zero and rows a non-zero multiple of 8.
    InvalidDimensions { columns: usize, rows: usize },
    /// A raw byte write addressed past the end of the backing buffer.
    OffsetOutOfRange { offset: usize, len: usize },
}

impl fmt::Display for BitmapError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BitmapError::InvalidDimensions { columns, rows } => write!(
                f,
                "invalid bitmap dimensions {}x{} (rows must be a positive multiple of 8)",
                columns, rows
            ),
            BitmapError::OffsetOutOfRange { offset, len } => {
                write!(f, "byte offset {} out of range for {}-byte bitmap", offset, len)
            }
        }
    }
}

/// Errors that can occur when driving the display controller.
///
/// Generic over the transport error `E` so that bus failures reach the
/// caller unchanged.
#[derive(Debug)]
pub enum Error<E> {
    /// A command or data write failed on the bus.
    Bus(E),
    /// The bus could not be opened when constructing the driver.
    BusUnavailable(E),
    /// Framebuffer construction or raw access failed.
    Bitmap(BitmapError),
    /// A transfer was attempted before
    /// [`Ssd1306::initialize_device()`](crate::Ssd1306::initialize_device)
    /// succeeded.
    NotInitialized,
    /// Display start line outside `0..=63`.
    InvalidStartLine(u8),
    /// The requested operation is declared but not supported yet.
    Unsupported,
}

// Allow ergonomic `?` propagation from raw bus errors.
impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Error::Bus(error)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "bus error: {:?}", e),
            Error::BusUnavailable(e) => write!(f, "could not open bus: {:?}", e),
            Error::Bitmap(e) => write!(f, "{}", e),
            Error::NotInitialized => write!(f, "display not initialized"),
            Error::InvalidStartLine(line) => {
                write!(f, "start line {} out of range (must be 0-63)", line)
            }
            Error::Unsupported => write!(f, "operation not supported"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Bus(e) => defmt::write!(f, "Bus error: {}", e),
            Error::BusUnavailable(e) => defmt::write!(f, "Bus unavailable: {}", e),
            Error::Bitmap(e) => defmt::write!(f, "Bitmap error: {}", e),
            Error::NotInitialized => defmt::write!(f, "Not initialized"),
            Error::InvalidStartLine(line) => defmt::write!(f, "Invalid start line {}", line),
            Error::Unsupported => defmt::write!(f, "Unsupported"),
        }
    }
}
