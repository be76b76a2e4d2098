//! Threshold policy mapping sample magnitudes to output states.

use crate::sample::AccelerationSample;

/// Output states for one cycle. Recomputed from scratch every time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Decision {
    /// Both axes strictly below the threshold.
    pub calm: bool,
    /// X magnitude at or above the threshold.
    pub x_alarm: bool,
    /// Y magnitude at or above the threshold.
    pub y_alarm: bool,
}

/// Alarm threshold on absolute sample values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Threshold(u16);

impl Threshold {
    /// Creates a threshold.
    pub const fn new(limit: u16) -> Self {
        Self(limit)
    }

    /// Returns the limit.
    pub const fn limit(self) -> u16 {
        self.0
    }

    /// Returns `true` when `magnitude` reaches the limit.
    pub const fn is_reached_by(self, magnitude: u16) -> bool {
        magnitude >= self.0
    }

    /// Evaluates the output states for a pair of magnitudes.
    pub const fn decide(self, x_magnitude: u16, y_magnitude: u16) -> Decision {
        let x_alarm = self.is_reached_by(x_magnitude);
        let y_alarm = self.is_reached_by(y_magnitude);
        Decision {
            calm: !x_alarm && !y_alarm,
            x_alarm,
            y_alarm,
        }
    }

    /// Evaluates the output states for a pair of samples.
    pub const fn decide_samples(self, x: AccelerationSample, y: AccelerationSample) -> Decision {
        self.decide(x.magnitude(), y.magnitude())
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(500)
    }
}
