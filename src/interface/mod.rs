//! Register access abstraction for the ICM-20602 driver.

pub mod hal;
pub mod i2c;

/// Single-register access to the device.
///
/// Each call addresses exactly one register in one bus transaction; multi-byte
/// values are assembled by the caller from repeated calls.
pub trait Icm20602Interface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Writes a single register.
    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error>;

    /// Reads a single register.
    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error>;
}
