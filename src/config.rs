//! Configuration primitives for the ICM-20602 acquisition node.

use crate::params::{AccelFullScale, GyroFullScale};
use crate::registers::{
    AccelConfig,
    GyroConfig,
    PowerManagement1,
    REG_ACCEL_CONFIG,
    REG_ACCEL_INTEL_CTRL,
    REG_CONFIG,
    REG_GYRO_CONFIG,
    REG_PWR_MGMT_1,
    REG_PWR_MGMT_2,
    REG_USER_CTRL,
};

/// Number of register writes replayed at startup.
pub const STARTUP_WRITES: usize = 7;

/// Ordered `(register, value)` pairs written during startup.
pub type StartupSequence = [(u8, u8); STARTUP_WRITES];

/// User-facing configuration for the sensor and the alarm policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// `PWR_MGMT_1.CLKSEL`, `1` selects the best available clock.
    pub clock_select: u8,
    /// Raw `PWR_MGMT_2` value, `0` keeps every axis enabled.
    pub power_management_2: u8,
    /// Raw `USER_CTRL` value.
    pub user_control: u8,
    /// Raw `CONFIG` value carrying the low-pass filter selection.
    pub general_config: u8,
    /// Gyroscope full-scale range.
    pub gyro_full_scale: GyroFullScale,
    /// Accelerometer full-scale range.
    pub accel_full_scale: AccelFullScale,
    /// Raw `ACCEL_INTEL_CTRL` value.
    pub accel_interrupt_control: u8,
    /// Absolute sample value at or above which an axis alarm is raised.
    pub threshold: u16,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether the field values can be encoded into their registers.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.clock_select > 0b111 {
            return Err(ConfigError::ClockSelectOutOfRange);
        }

        Ok(())
    }

    /// Builds the register writes that bring the device up, in replay order.
    pub fn startup_sequence(&self) -> StartupSequence {
        let power = PowerManagement1::new().with_clock_select(self.clock_select & 0b111);
        let gyro = GyroConfig::new().with_full_scale(self.gyro_full_scale);
        let accel = AccelConfig::new().with_full_scale(self.accel_full_scale);

        [
            (REG_PWR_MGMT_1, u8::from(power)),
            (REG_PWR_MGMT_2, self.power_management_2),
            (REG_USER_CTRL, self.user_control),
            (REG_CONFIG, self.general_config),
            (REG_GYRO_CONFIG, u8::from(gyro)),
            (REG_ACCEL_CONFIG, u8::from(accel)),
            (REG_ACCEL_INTEL_CTRL, self.accel_interrupt_control),
        ]
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the clock source selection.
    pub fn clock_select(mut self, clock_select: u8) -> Self {
        self.config.clock_select = clock_select;
        self
    }

    /// Overrides the raw `PWR_MGMT_2` value.
    pub fn power_management_2(mut self, value: u8) -> Self {
        self.config.power_management_2 = value;
        self
    }

    /// Overrides the raw `USER_CTRL` value.
    pub fn user_control(mut self, value: u8) -> Self {
        self.config.user_control = value;
        self
    }

    /// Overrides the raw `CONFIG` value.
    pub fn general_config(mut self, value: u8) -> Self {
        self.config.general_config = value;
        self
    }

    /// Overrides the gyroscope full-scale range.
    pub fn gyro_full_scale(mut self, full_scale: GyroFullScale) -> Self {
        self.config.gyro_full_scale = full_scale;
        self
    }

    /// Overrides the accelerometer full-scale range.
    pub fn accel_full_scale(mut self, full_scale: AccelFullScale) -> Self {
        self.config.accel_full_scale = full_scale;
        self
    }

    /// Overrides the raw `ACCEL_INTEL_CTRL` value.
    pub fn accel_interrupt_control(mut self, value: u8) -> Self {
        self.config.accel_interrupt_control = value;
        self
    }

    /// Overrides the alarm threshold.
    pub fn threshold(mut self, threshold: u16) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clock_select: 0x01,
            power_management_2: 0x00,
            user_control: 0x01,
            general_config: 0x80,
            gyro_full_scale: GyroFullScale::Dps250,
            accel_full_scale: AccelFullScale::G2,
            accel_interrupt_control: 0x02,
            threshold: 500,
        }
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `CLKSEL` is a 3-bit field.
    ClockSelectOutOfRange,
}
