//! Page-organised monochrome framebuffer.
//!
//! The SSD1306 stores its GDDRAM as a sequence of 8-pixel-tall *pages*.
//! Each byte holds one column of one page, least significant bit at the
//! top. [`Bitmap`] uses a column-major arrangement of those bytes:
//!
//! ```text
//! offset = page + bytes_per_column * column
//! bit    = row % 8
//! ```
//!
//! so that all pages of column 0 come first, then all pages of column 1,
//! and so on. The bytes are streamed to the controller in offset order.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use crate::error::BitmapError;

/// In-memory 1 bit-per-pixel framebuffer in controller-native layout.
///
/// Pixel writes outside `[0, columns) × [0, rows)` are ignored: no error,
/// no mutation.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    columns: usize,
    rows: usize,
    bytes_per_column: usize,
    data: Vec<u8>,
}

impl Bitmap {
    /// Allocate a zero-filled bitmap of `columns × rows` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`BitmapError::InvalidDimensions`] if `columns` is zero or
    /// `rows` is not a positive multiple of 8.
    pub fn new(columns: usize, rows: usize) -> Result<Self, BitmapError> {
        if columns == 0 || rows == 0 || rows % 8 != 0 {
            return Err(BitmapError::InvalidDimensions { columns, rows });
        }

        let bytes_per_column = rows / 8;
        Ok(Self {
            columns,
            rows,
            bytes_per_column,
            data: vec![0; columns * bytes_per_column],
        })
    }

    /// Width in pixels.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Height in pixels.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of 8-row pages, i.e. bytes per column.
    pub fn bytes_per_column(&self) -> usize {
        self.bytes_per_column
    }

    /// Length of the backing byte sequence.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`; construction rejects empty bitmaps.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Backing bytes in transfer order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the backing bytes, bypassing pixel addressing.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Set every pixel to off.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Byte offset and bit mask for an in-bounds pixel.
    fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (column, row) = (x as usize, y as usize);
        if column >= self.columns || row >= self.rows {
            return None;
        }

        let page = row / 8;
        let offset = page + self.bytes_per_column * column;
        Some((offset, 1 << (row % 8)))
    }

    /// Turn the pixel at `(x, y)` on or off.
    ///
    /// Out-of-range coordinates are a silent no-op.
    pub fn draw_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some((offset, mask)) = self.locate(x, y) {
            if on {
                self.data[offset] |= mask;
            } else {
                self.data[offset] &= !mask;
            }
        }
    }

    /// Read back the pixel at `(x, y)`. Out-of-range reads return `false`.
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        self.locate(x, y)
            .map(|(offset, mask)| self.data[offset] & mask != 0)
            .unwrap_or(false)
    }

    /// Turn off every pixel in the rectangle `[x0, x0+dx) × [y0, y0+dy)`.
    ///
    /// Cells falling outside the bitmap are skipped, so only the in-bounds
    /// intersection is touched.
    pub fn clear_block(&mut self, x0: i32, y0: i32, dx: u32, dy: u32) {
        // Widen before adding so large extents cannot overflow.
        let x_start = i64::from(x0).max(0);
        let y_start = i64::from(y0).max(0);
        let x_end = (i64::from(x0) + i64::from(dx)).min(self.columns as i64);
        let y_end = (i64::from(y0) + i64::from(dy)).min(self.rows as i64);

        for x in x_start..x_end {
            for y in y_start..y_end {
                self.draw_pixel(x as i32, y as i32, false);
            }
        }
    }

    /// Overwrite a single backing byte, bypassing pixel addressing.
    ///
    /// # Errors
    ///
    /// Returns [`BitmapError::OffsetOutOfRange`] if `offset >= len()`.
    pub fn write_byte(&mut self, offset: usize, value: u8) -> Result<(), BitmapError> {
        let len = self.data.len();
        let byte = self
            .data
            .get_mut(offset)
            .ok_or(BitmapError::OffsetOutOfRange { offset, len })?;
        *byte = value;
        Ok(())
    }
}

impl core::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Bitmap")
            .field("columns", &self.columns)
            .field("rows", &self.rows)
            .field("bytes_per_column", &self.bytes_per_column)
            .finish_non_exhaustive()
    }
}

// ── embedded-graphics integration ────────────────────────────────────────

impl OriginDimensions for Bitmap {
    fn size(&self) -> Size {
        Size::new(self.columns as u32, self.rows as u32)
    }
}

impl DrawTarget for Bitmap {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.draw_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
