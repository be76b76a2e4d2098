//! Register transactions composed from [`BusDriver`] primitives.

use crate::bus::{Acknowledge, Address, BusDriver, BusError, BusPeripheral};
use crate::registers::DEVICE_ADDRESS;

use super::Icm20602Interface;

/// Two-wire interface driving the bus primitive by primitive.
pub struct I2cInterface<P> {
    bus: BusDriver<P>,
    address: Address,
}

impl<P> I2cInterface<P> {
    /// Creates an interface addressing the device at its fixed address.
    pub const fn new(bus: BusDriver<P>) -> Self {
        Self::with_address(bus, DEVICE_ADDRESS)
    }

    /// Creates an interface addressing an explicit peripheral address.
    pub const fn with_address(bus: BusDriver<P>, address: Address) -> Self {
        Self { bus, address }
    }

    /// Returns the addressed peripheral.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Provides mutable access to the wrapped bus driver.
    pub fn bus_mut(&mut self) -> &mut BusDriver<P> {
        &mut self.bus
    }

    /// Consumes the interface and returns the owned bus driver.
    pub fn release(self) -> BusDriver<P> {
        self.bus
    }
}

impl<P> Icm20602Interface for I2cInterface<P>
where
    P: BusPeripheral,
{
    type Error = BusError;

    /// start, address+W, register, value, stop.
    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        let address = self.address;
        self.bus.with_transaction(|bus| {
            bus.start()?;
            bus.write_byte(address.write_frame(), true)?;
            bus.write_byte(register, true)?;
            bus.write_byte(value, true)?;
            bus.stop()
        })
    }

    /// start, address+W, register, restart, address+R, data+NACK, stop.
    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error> {
        let address = self.address;
        self.bus.with_transaction(|bus| {
            bus.start()?;
            bus.write_byte(address.write_frame(), true)?;
            bus.write_byte(register, true)?;
            bus.restart()?;
            bus.write_byte(address.read_frame(), true)?;
            let value = bus.read_byte(Acknowledge::Nack)?;
            bus.stop()?;
            Ok(value)
        })
    }
}
