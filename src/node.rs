//! Sampling loop: startup, then read, threshold, actuate and report forever.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;

use crate::device::{Icm20602, Identity};
use crate::error::Error;
use crate::interface::Icm20602Interface;
use crate::output::{Indicators, SerialSink};
use crate::sample::AccelerationSample;
use crate::telemetry::format_line;
use crate::threshold::{Decision, Threshold};

/// Startup message sent when the device identifies correctly.
pub const SENSOR_OK: &str = "SENSOR OK!\n\r";
/// Startup message sent when the identity does not match.
pub const SENSOR_ERROR: &str = "SENSOR ERROR!\n\r";

/// Errors that stop the acquisition loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NodeError<E, SE, PE> {
    /// Device or bus failure.
    Device(Error<E>),
    /// Serial transmit failure.
    Serial(SE),
    /// Output pin failure.
    Pin(PE),
}

impl<E, SE, PE> From<Error<E>> for NodeError<E, SE, PE> {
    fn from(err: Error<E>) -> Self {
        Self::Device(err)
    }
}

/// What one cycle measured and decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cycle {
    /// Signed X sample.
    pub x: AccelerationSample,
    /// Signed Y sample.
    pub y: AccelerationSample,
    /// Output states applied for this cycle.
    pub decision: Decision,
}

/// Owns the sensor, the serial sink and the indicator pins.
pub struct AcquisitionLoop<IFACE, SINK, CALM, XA, YA> {
    device: Icm20602<IFACE>,
    sink: SINK,
    indicators: Indicators<CALM, XA, YA>,
    threshold: Threshold,
}

impl<IFACE, SINK, CALM, XA, YA, PE> AcquisitionLoop<IFACE, SINK, CALM, XA, YA>
where
    IFACE: Icm20602Interface,
    SINK: SerialSink,
    CALM: OutputPin<Error = PE>,
    XA: OutputPin<Error = PE>,
    YA: OutputPin<Error = PE>,
{
    /// Assembles the loop; the threshold comes from the device configuration.
    pub fn new(device: Icm20602<IFACE>, sink: SINK, indicators: Indicators<CALM, XA, YA>) -> Self {
        let threshold = Threshold::new(device.config().threshold);
        Self {
            device,
            sink,
            indicators,
            threshold,
        }
    }

    /// Returns the active threshold.
    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Configures the device and reports its identity once.
    ///
    /// A mismatching identity only changes the message; the caller carries on
    /// exactly as it would after a match.
    pub fn startup(&mut self) -> Result<Identity, NodeError<IFACE::Error, SINK::Error, PE>> {
        self.device.configure()?;
        let identity = self.device.check_identity()?;
        let message = if identity.is_match() {
            SENSOR_OK
        } else {
            SENSOR_ERROR
        };
        self.sink.send_str(message).map_err(NodeError::Serial)?;
        Ok(identity)
    }

    /// Runs one sampling cycle.
    pub fn step(&mut self) -> Result<Cycle, NodeError<IFACE::Error, SINK::Error, PE>> {
        let (x, y) = self.device.read_xy()?;
        let decision = self.threshold.decide_samples(x, y);
        trace!(
            "x={=u16} y={=u16} calm={=bool}",
            x.magnitude(),
            y.magnitude(),
            decision.calm
        );

        self.indicators.apply(decision).map_err(NodeError::Pin)?;

        let line = format_line(x.magnitude(), y.magnitude())
            .map_err(|_| NodeError::Device(Error::Format))?;
        self.sink.send_str(&line).map_err(NodeError::Serial)?;

        Ok(Cycle { x, y, decision })
    }

    /// Runs startup, then cycles until an error occurs.
    ///
    /// With an unbounded bus wait policy the only way out is a sink or pin
    /// error.
    pub fn run(&mut self) -> Result<Infallible, NodeError<IFACE::Error, SINK::Error, PE>> {
        self.startup()?;
        loop {
            self.step()?;
        }
    }

    /// Consumes the loop and returns its parts.
    pub fn release(self) -> (Icm20602<IFACE>, SINK, Indicators<CALM, XA, YA>) {
        (self.device, self.sink, self.indicators)
    }
}
