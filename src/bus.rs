//! Two-wire transport contract used by [`Ssd1306`](crate::Ssd1306).
//!
//! The driver never talks to a peripheral directly. It only needs two
//! primitives, each a single blocking bus transaction that starts with a
//! control byte:
//!
//! - [`Bus::write_byte`] — `[control, value]`
//! - [`Bus::write_block`] — `[control, bytes...]`
//!
//! [`I2cBus`] provides both on top of any blocking `embedded-hal` I2C
//! peripheral. Test doubles and other transports implement [`Bus`]
//! directly. Retries and timeouts, if any, belong to the implementation.

use embedded_hal::i2c::{I2c, Operation};

/// Blocking write-only transport addressed by 7-bit device address.
pub trait Bus {
    /// Transport-level error, surfaced unchanged through
    /// [`Error::Bus`](crate::Error::Bus).
    type Error;

    /// Write `control` followed by one byte in a single transaction.
    fn write_byte(&mut self, address: u8, control: u8, value: u8) -> Result<(), Self::Error>;

    /// Write `control` followed by `bytes` in a single transaction.
    fn write_block(&mut self, address: u8, control: u8, bytes: &[u8]) -> Result<(), Self::Error>;
}

/// A [`Bus`] that can be acquired by a platform bus number.
///
/// Implemented by transports that own their peripheral lookup (for
/// example a Linux `/dev/i2c-N` handle). Used by
/// [`Ssd1306::open()`](crate::Ssd1306::open).
pub trait OpenBus: Bus + Sized {
    /// Acquire exclusive access to bus `bus`.
    fn open(bus: u8) -> Result<Self, Self::Error>;
}

/// [`Bus`] adapter over a blocking [`embedded_hal::i2c::I2c`] peripheral.
///
/// Takes ownership of the peripheral. Sharing one physical bus between
/// drivers is the caller's job (e.g. via `embedded-hal-bus`).
#[derive(Debug)]
pub struct I2cBus<I2C> {
    i2c: I2C,
}

impl<I2C> I2cBus<I2C>
where
    I2C: I2c,
{
    /// Wrap a blocking I2C peripheral.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access).
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give the peripheral back.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Bus for I2cBus<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn write_byte(&mut self, address: u8, control: u8, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(address, &[control, value])
    }

    fn write_block(&mut self, address: u8, control: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        // Adjacent writes in one transaction are sent back to back without
        // a repeated start, so the controller sees a single data stream.
        self.i2c.transaction(
            address,
            &mut [Operation::Write(&[control]), Operation::Write(bytes)],
        )
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
