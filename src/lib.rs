#![no_std]

#[macro_use]
mod log;

mod error;

pub mod bus;
pub mod config;
pub mod device;
pub mod interface;
pub mod node;
pub mod output;
pub mod params;
pub mod registers;
pub mod sample;
pub mod telemetry;
pub mod threshold;

pub use crate::bus::{BusDriver, BusError, BusPeripheral, WaitPolicy};
pub use crate::device::Icm20602;
pub use crate::error::{Error, Result};
pub use crate::node::{AcquisitionLoop, NodeError};
