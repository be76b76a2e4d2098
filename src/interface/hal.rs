//! Interface implementation on top of any `embedded-hal` I2C bus.

use embedded_hal::i2c::I2c;

use crate::bus::Address;
use crate::registers::DEVICE_ADDRESS;

use super::Icm20602Interface;

/// Register access through an `embedded-hal` [`I2c`] implementation.
pub struct HalInterface<I2C> {
    i2c: I2C,
    address: Address,
}

impl<I2C> HalInterface<I2C> {
    /// Creates a new interface from the provided I2C bus.
    pub const fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: DEVICE_ADDRESS,
        }
    }

    /// Provides mutable access to the wrapped I2C bus.
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Consumes the interface and returns the owned I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Icm20602Interface for HalInterface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        self.i2c.write(self.address.bits(), &[register, value])
    }

    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.i2c.write_read(self.address.bits(), &[register], &mut value)?;
        Ok(value[0])
    }
}
