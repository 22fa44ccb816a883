//! Blocking framebuffer driver for the SSD1306 OLED controller over I2C.
//!
//! This crate provides [`Ssd1306`], which owns a page-organised
//! [`Bitmap`] and a two-wire [`Bus`], sends the controller bring-up
//! sequence, and flushes the framebuffer to the panel in 16-byte data
//! frames.
//!
//! # Quick Start
//!
//! ```no_run
//! use ssd1306_framebuffer::{I2cBus, Ssd1306, DEFAULT_ADDRESS};
//!
//! # fn example(i2c: impl embedded_hal::i2c::I2c) {
//! let mut oled = Ssd1306::new(I2cBus::new(i2c), DEFAULT_ADDRESS, 64, 128).unwrap();
//! oled.initialize_device().unwrap();
//!
//! oled.bitmap_mut().draw_pixel(5, 20, true);
//! oled.bitmap_mut().clear_block(0, 0, 4, 4);
//! oled.flush().unwrap();
//! # }
//! ```
//!
//! The [`Bitmap`] also implements `embedded-graphics`' `DrawTarget`, so
//! any `embedded-graphics` drawable can render into it before a flush.
//!
//! # Architecture
//!
//! - **[`bitmap`]** — the framebuffer; no knowledge of the bus.
//! - **[`bus`]** — the transport seam: [`Bus`] / [`OpenBus`] traits and the
//!   [`I2cBus`] adapter for `embedded-hal` I2C peripherals.
//! - **[`driver`]** — [`Ssd1306`], the bring-up sequence and transfer
//!   protocol.
//! - **[`command`]** — opcode table and framing constants.
//!
//! Everything is synchronous. Each bus write blocks until the transport
//! returns, and the driver never retries.
//!
//! # Crate Features
//!
//! - **`defmt`** — structured logging via [`defmt`] and [`defmt::Format`]
//!   implementations on public types.

#![no_std]

extern crate alloc;

pub mod bitmap;
pub mod bus;
pub mod command;
pub mod config;
pub mod driver;
pub mod error;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use bitmap::Bitmap;
pub use bus::{Bus, I2cBus, OpenBus};
pub use command::{CHUNK_SIZE, DEFAULT_ADDRESS};
pub use config::PanelConfig;
pub use driver::{ScrollDirection, Ssd1306};
pub use error::{BitmapError, Error};
