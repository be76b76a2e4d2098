//! High-level ICM-20602 device driver implementation.

use crate::bus::{BusDriver, BusPeripheral};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::interface::Icm20602Interface;
use crate::interface::i2c::I2cInterface;
use crate::params::Axis;
use crate::registers::{
    EXPECTED_WHO_AM_I,
    REG_TEMP_OUT_H,
    REG_TEMP_OUT_L,
    REG_WHO_AM_I,
    accel_registers,
};
use crate::sample::{AccelerationSample, combine, fold};

/// Outcome of comparing `WHO_AM_I` against the expected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Identity {
    /// The device reported the expected identity.
    Match,
    /// The device reported something else.
    Mismatch(u8),
}

impl Identity {
    /// Classifies a raw `WHO_AM_I` value.
    pub const fn from_who_am_i(value: u8) -> Self {
        if value == EXPECTED_WHO_AM_I {
            Self::Match
        } else {
            Self::Mismatch(value)
        }
    }

    /// Returns `true` for [`Identity::Match`].
    pub const fn is_match(self) -> bool {
        matches!(self, Self::Match)
    }
}

/// High-level synchronous driver for the ICM-20602.
pub struct Icm20602<IFACE> {
    interface: IFACE,
    config: Config,
}

impl<IFACE> Icm20602<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided register interface.
    pub fn new(interface: IFACE, config: Config) -> Self {
        Self { interface, config }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> (IFACE, Config) {
        (self.interface, self.config)
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Returns a shared reference to the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<P> Icm20602<I2cInterface<P>>
where
    P: BusPeripheral,
{
    /// Convenience constructor driving the bus through `bus`.
    pub fn new_i2c(bus: BusDriver<P>, config: Config) -> Self {
        Self::new(I2cInterface::new(bus), config)
    }

    /// Releases the driver, returning the bus driver and configuration.
    pub fn release_i2c(self) -> (BusDriver<P>, Config) {
        let (iface, config) = self.release();
        (iface.release(), config)
    }
}

impl<IFACE, CommE> Icm20602<IFACE>
where
    IFACE: Icm20602Interface<Error = CommE>,
{
    // ==================================================================
    // == Initialization ================================================
    // ==================================================================
    /// Replays the startup register sequence of the current configuration.
    ///
    /// Writes are issued in order with no read-back between them.
    pub fn configure(&mut self) -> Result<(), CommE> {
        self.config.validate().map_err(|_| Error::InvalidConfig)?;

        for (register, value) in self.config.startup_sequence() {
            debug!("startup write {=u8:#x} <- {=u8:#x}", register, value);
            self.interface.write_register(register, value)?;
        }
        Ok(())
    }

    // ==================================================================
    // == Identification ================================================
    // ==================================================================
    /// Reads the `WHO_AM_I` register.
    pub fn who_am_i(&mut self) -> Result<u8, CommE> {
        self.interface.read_register(REG_WHO_AM_I).map_err(Error::from)
    }

    /// Reads `WHO_AM_I` and compares it with the expected identity.
    pub fn check_identity(&mut self) -> Result<Identity, CommE> {
        let identity = Identity::from_who_am_i(self.who_am_i()?);
        match identity {
            Identity::Match => info!("device identity confirmed"),
            Identity::Mismatch(value) => warn!("unexpected WHO_AM_I {=u8:#x}", value),
        }
        Ok(identity)
    }

    // ==================================================================
    // == Data Acquisition ==============================================
    // ==================================================================
    /// Reads one axis as two single-register transactions, low byte first.
    pub fn read_axis(&mut self, axis: Axis) -> Result<AccelerationSample, CommE> {
        let (low_register, high_register) = accel_registers(axis);
        let low = self.interface.read_register(low_register)?;
        let high = self.interface.read_register(high_register)?;
        Ok(AccelerationSample::from_bytes(low, high))
    }

    /// Reads the X and Y axes in that order.
    pub fn read_xy(&mut self) -> Result<(AccelerationSample, AccelerationSample), CommE> {
        let x = self.read_axis(Axis::X)?;
        let y = self.read_axis(Axis::Y)?;
        Ok((x, y))
    }

    /// Reads the raw signed temperature counts, low byte first.
    pub fn read_temperature_raw(&mut self) -> Result<i16, CommE> {
        let low = self.interface.read_register(REG_TEMP_OUT_L)?;
        let high = self.interface.read_register(REG_TEMP_OUT_H)?;
        Ok(fold(combine(low, high)))
    }
}
