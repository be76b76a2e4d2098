//! Strongly typed parameter enumerations for the ICM-20602 driver.
//!
//! These enums map directly to datasheet field encodings and are used by
//! [`Config`](crate::config::Config) when building the startup sequence.
//!
//! # Examples
//!
//! ```rust
//! use icm20602::params::{AccelFullScale, GyroFullScale};
//!
//! let accel = AccelFullScale::G2;
//! let gyro = GyroFullScale::Dps250;
//! assert_eq!(accel.g(), 2);
//! assert_eq!(gyro.dps(), 250);
//! ```

use modular_bitfield::prelude::Specifier;

/// Accelerometer full-scale selection (`ACCEL_CONFIG.ACCEL_FS_SEL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum AccelFullScale {
    /// ±2 g.
    G2 = 0b00,
    /// ±4 g.
    G4 = 0b01,
    /// ±8 g.
    G8 = 0b10,
    /// ±16 g.
    G16 = 0b11,
}

impl AccelFullScale {
    /// Returns the full-scale range in g.
    pub const fn g(self) -> u8 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
            Self::G16 => 16,
        }
    }
}

/// Gyroscope full-scale selection (`GYRO_CONFIG.FS_SEL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum GyroFullScale {
    /// ±250 degrees per second.
    Dps250 = 0b00,
    /// ±500 degrees per second.
    Dps500 = 0b01,
    /// ±1000 degrees per second.
    Dps1000 = 0b10,
    /// ±2000 degrees per second.
    Dps2000 = 0b11,
}

impl GyroFullScale {
    /// Returns the full-scale range in degrees per second.
    pub const fn dps(self) -> u16 {
        match self {
            Self::Dps250 => 250,
            Self::Dps500 => 500,
            Self::Dps1000 => 1_000,
            Self::Dps2000 => 2_000,
        }
    }
}

/// Accelerometer axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// X axis.
    X,
    /// Y axis.
    Y,
    /// Z axis.
    Z,
}
