//! Register map definitions for the ICM-20602 IMU.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::bus::Address;
use crate::params::{AccelFullScale, Axis, GyroFullScale};

/// Bus address of the device (`AD0` tied low).
pub const DEVICE_ADDRESS: Address = Address::new(0x68);
/// Value reported by `WHO_AM_I`.
pub const EXPECTED_WHO_AM_I: u8 = 0x12;

/// Register address of `CONFIG`.
pub const REG_CONFIG: u8 = 0x1A;
/// Register address of `GYRO_CONFIG`.
pub const REG_GYRO_CONFIG: u8 = 0x1B;
/// Register address of `ACCEL_CONFIG`.
pub const REG_ACCEL_CONFIG: u8 = 0x1C;
/// Register address of `ACCEL_CONFIG2`.
pub const REG_ACCEL_CONFIG2: u8 = 0x1D;
/// Register address of `ACCEL_XOUT_H`.
pub const REG_ACCEL_XOUT_H: u8 = 0x3B;
/// Register address of `ACCEL_XOUT_L`.
pub const REG_ACCEL_XOUT_L: u8 = 0x3C;
/// Register address of `ACCEL_YOUT_H`.
pub const REG_ACCEL_YOUT_H: u8 = 0x3D;
/// Register address of `ACCEL_YOUT_L`.
pub const REG_ACCEL_YOUT_L: u8 = 0x3E;
/// Register address of `ACCEL_ZOUT_H`.
pub const REG_ACCEL_ZOUT_H: u8 = 0x3F;
/// Register address of `ACCEL_ZOUT_L`.
pub const REG_ACCEL_ZOUT_L: u8 = 0x40;
/// Register address of `TEMP_OUT_H`.
pub const REG_TEMP_OUT_H: u8 = 0x41;
/// Register address of `TEMP_OUT_L`.
pub const REG_TEMP_OUT_L: u8 = 0x42;
/// Register address of `ACCEL_INTEL_CTRL`.
pub const REG_ACCEL_INTEL_CTRL: u8 = 0x69;
/// Register address of `USER_CTRL`.
pub const REG_USER_CTRL: u8 = 0x6A;
/// Register address of `PWR_MGMT_1`.
pub const REG_PWR_MGMT_1: u8 = 0x6B;
/// Register address of `PWR_MGMT_2`.
pub const REG_PWR_MGMT_2: u8 = 0x6C;
/// Register address of `WHO_AM_I`.
pub const REG_WHO_AM_I: u8 = 0x75;

/// Returns the `(low, high)` output register addresses for `axis`.
pub const fn accel_registers(axis: Axis) -> (u8, u8) {
    match axis {
        Axis::X => (REG_ACCEL_XOUT_L, REG_ACCEL_XOUT_H),
        Axis::Y => (REG_ACCEL_YOUT_L, REG_ACCEL_YOUT_H),
        Axis::Z => (REG_ACCEL_ZOUT_L, REG_ACCEL_ZOUT_H),
    }
}

/// Bitfield representation of the `PWR_MGMT_1` register (address `0x6B`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerManagement1 {
    // Clock source selection (bits 2:0).
    pub clock_select: B3,
    // Temperature sensor disable (bit 3).
    pub temp_disable: bool,
    // Gyro drive and PLL kept on, sense paths off (bit 4).
    pub gyro_standby: bool,
    // Cycle between sleep and single samples (bit 5).
    pub cycle: bool,
    // Sleep mode (bit 6).
    pub sleep: bool,
    // Reset internal registers (bit 7).
    pub device_reset: bool,
}

impl From<u8> for PowerManagement1 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<PowerManagement1> for u8 {
    fn from(value: PowerManagement1) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `GYRO_CONFIG` register (address `0x1B`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GyroConfig {
    // Filter bypass selection (bits 1:0).
    pub fchoice_b: B2,
    #[skip]
    __: B1,
    // Full-scale selection (bits 4:3).
    pub full_scale: GyroFullScale,
    // Z gyro self-test (bit 5).
    pub z_self_test: bool,
    // Y gyro self-test (bit 6).
    pub y_self_test: bool,
    // X gyro self-test (bit 7).
    pub x_self_test: bool,
}

impl From<u8> for GyroConfig {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<GyroConfig> for u8 {
    fn from(value: GyroConfig) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `ACCEL_CONFIG` register (address `0x1C`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccelConfig {
    #[skip]
    __: B3,
    // Full-scale selection (bits 4:3).
    pub full_scale: AccelFullScale,
    // Z accel self-test (bit 5).
    pub z_self_test: bool,
    // Y accel self-test (bit 6).
    pub y_self_test: bool,
    // X accel self-test (bit 7).
    pub x_self_test: bool,
}

impl From<u8> for AccelConfig {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<AccelConfig> for u8 {
    fn from(value: AccelConfig) -> Self {
        value.into_bytes()[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_management_clock_select_occupies_low_bits() {
        let reg = PowerManagement1::new().with_clock_select(1);
        assert_eq!(u8::from(reg), 0x01);

        let reg = PowerManagement1::from(0xC1);
        assert!(reg.device_reset());
        assert!(reg.sleep());
        assert_eq!(reg.clock_select(), 1);
    }

    #[test]
    fn full_scale_fields_sit_at_bits_4_3() {
        let accel = AccelConfig::new().with_full_scale(AccelFullScale::G16);
        assert_eq!(u8::from(accel), 0x18);

        let gyro = GyroConfig::new().with_full_scale(GyroFullScale::Dps500);
        assert_eq!(u8::from(gyro), 0x08);
        assert_eq!(GyroConfig::from(0x10).full_scale(), GyroFullScale::Dps1000);
    }

    #[test]
    fn axis_register_pairs() {
        assert_eq!(accel_registers(Axis::X), (0x3C, 0x3B));
        assert_eq!(accel_registers(Axis::Y), (0x3E, 0x3D));
        assert_eq!(accel_registers(Axis::Z), (0x40, 0x3F));
    }
}
