//! Two-wire bus master: controller register model and protocol primitives.
//!
//! The [`BusPeripheral`] trait is the only place hardware is touched. It exposes
//! the controller's control, status, transmit and receive registers and nothing
//! else; every wait of the protocol lives in [`BusDriver`] as an explicit
//! polling loop governed by a [`WaitPolicy`].
#![allow(unused_parens)]

mod driver;

pub use driver::BusDriver;

use modular_bitfield::prelude::*;

/// Register-level access to a two-wire master controller.
///
/// Implementations read and write the hardware registers directly and never
/// block. Request bits written through [`set_control`](Self::set_control) are
/// cleared by the hardware once the requested bus event has completed.
pub trait BusPeripheral {
    /// Reads the control register.
    fn control(&mut self) -> Control;

    /// Writes the control register.
    fn set_control(&mut self, control: Control);

    /// Reads the status register.
    fn status(&mut self) -> Status;

    /// Loads the transmit buffer, starting a byte transfer.
    fn transmit(&mut self, byte: u8);

    /// Reads the receive buffer, clearing the receive-full flag.
    fn receive(&mut self) -> u8;
}

impl<P: BusPeripheral + ?Sized> BusPeripheral for &mut P {
    fn control(&mut self) -> Control {
        (**self).control()
    }

    fn set_control(&mut self, control: Control) {
        (**self).set_control(control)
    }

    fn status(&mut self) -> Status {
        (**self).status()
    }

    fn transmit(&mut self, byte: u8) {
        (**self).transmit(byte)
    }

    fn receive(&mut self) -> u8 {
        (**self).receive()
    }
}

/// Bitfield representation of the controller control register.
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    /// Start condition enable (bit 0).
    pub sen: bool,
    /// Repeated start condition enable (bit 1).
    pub rsen: bool,
    /// Stop condition enable (bit 2).
    pub pen: bool,
    /// Receive enable (bit 3).
    pub rcen: bool,
    /// Acknowledge sequence enable (bit 4).
    pub acken: bool,
    /// Acknowledge data bit, `true` sends NACK (bit 5).
    pub ackdt: bool,
    /// Clock stretch enable (bit 6).
    pub stren: bool,
    /// General call enable (bit 7).
    pub gcen: bool,
    /// SMBus input levels (bit 8).
    pub smen: bool,
    /// Slew rate control disable (bit 9).
    pub disslw: bool,
    /// 10-bit slave address (bit 10).
    pub a10m: bool,
    /// Strict reserved-address enforcement (bit 11).
    pub strict: bool,
    /// Clock release (bit 12).
    pub sclrel: bool,
    /// Stop in idle mode (bit 13).
    pub sidl: bool,
    #[skip]
    __: B1,
    /// Module enable (bit 15).
    pub on: bool,
}

impl Control {
    /// Returns `true` while any start, restart, stop, receive or acknowledge
    /// request is still in progress.
    pub fn primitive_pending(&self) -> bool {
        self.sen() || self.rsen() || self.pen() || self.rcen() || self.acken()
    }
}

impl From<u16> for Control {
    fn from(value: u16) -> Self {
        Self::from_bytes(value.to_le_bytes())
    }
}

impl From<Control> for u16 {
    fn from(value: Control) -> Self {
        u16::from_le_bytes(value.into_bytes())
    }
}

/// Bitfield representation of the controller status register.
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    /// Transmit buffer full (bit 0).
    pub tbf: bool,
    /// Receive buffer full (bit 1).
    pub rbf: bool,
    /// Read/write information (bit 2).
    pub r_w: bool,
    /// Start bit detected last (bit 3).
    pub s: bool,
    /// Stop bit detected last (bit 4).
    pub p: bool,
    /// Data/address of last byte (bit 5).
    pub d_a: bool,
    /// Receive overflow (bit 6).
    pub i2cov: bool,
    /// Write collision (bit 7).
    pub iwcol: bool,
    /// 10-bit address matched (bit 8).
    pub add10: bool,
    /// General call received (bit 9).
    pub gcstat: bool,
    /// Bus collision detected (bit 10).
    pub bcl: bool,
    #[skip]
    __: B3,
    /// Master transmit in progress, including the acknowledge slot (bit 14).
    pub trstat: bool,
    /// Acknowledge not received from the peer (bit 15).
    pub ackstat: bool,
}

impl From<u16> for Status {
    fn from(value: u16) -> Self {
        Self::from_bytes(value.to_le_bytes())
    }
}

impl From<Status> for u16 {
    fn from(value: Status) -> Self {
        u16::from_le_bytes(value.into_bytes())
    }
}

/// 7-bit peripheral address together with its two 8-bit address frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Address(u8);

impl Address {
    /// Creates an address from its 7-bit value; the top bit is discarded.
    pub const fn new(address: u8) -> Self {
        Self(address & 0x7F)
    }

    /// Returns the 7-bit address.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Address frame selecting master-transmit (R/W bit clear).
    pub const fn write_frame(self) -> u8 {
        self.0 << 1
    }

    /// Address frame selecting master-receive (R/W bit set).
    pub const fn read_frame(self) -> u8 {
        (self.0 << 1) | 0x01
    }
}

/// Response sent by the master after receiving a byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Acknowledge {
    /// More bytes follow.
    Ack,
    /// Final byte of the read sequence.
    Nack,
}

/// How long the driver keeps polling for a hardware condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaitPolicy {
    /// Spin until the condition holds. A peer that never responds stalls the
    /// caller forever.
    #[default]
    Unbounded,
    /// Give up after this many unsuccessful polls and report
    /// [`BusError::Timeout`].
    Polls(u32),
}

/// Hardware condition a bus primitive waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Condition {
    /// No primitive pending and no transmission active.
    Idle,
    /// Start condition completed.
    Start,
    /// Repeated start condition completed.
    Restart,
    /// Stop condition completed.
    Stop,
    /// Acknowledge sequence completed.
    Acknowledge,
    /// Transmit buffer drained.
    TransmitBuffer,
    /// Receive sequence completed and a byte is available.
    Receive,
    /// Peer asserted acknowledge.
    PeerAcknowledge,
}

/// Errors produced by [`BusDriver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// A bounded wait expired before the condition held.
    Timeout(Condition),
}

impl embedded_hal::i2c::Error for BusError {
    fn kind(&self) -> embedded_hal::i2c::ErrorKind {
        use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

        match self {
            Self::Timeout(Condition::PeerAcknowledge) => {
                ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown)
            }
            Self::Timeout(_) => ErrorKind::Other,
        }
    }
}
