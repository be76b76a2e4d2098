//! Reconstruction of signed samples from register byte pairs.

/// Largest positive value of a signed 16-bit sample.
const SIGNED_MAX: i32 = 32_767;
/// Span of a 16-bit register pair.
const SPAN: i32 = 65_536;

/// Combines a register pair into the unsigned value `high * 256 + low`.
#[inline]
pub const fn combine(low: u8, high: u8) -> u16 {
    ((high as u16) << 8) | low as u16
}

/// Folds an unsigned 16-bit reading into its two's-complement value.
#[inline]
pub const fn fold(raw: u16) -> i16 {
    let value = raw as i32;
    if value > SIGNED_MAX {
        (value - SPAN) as i16
    } else {
        value as i16
    }
}

/// Signed acceleration reading for one axis, in raw sensor counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelerationSample(i16);

impl AccelerationSample {
    /// Wraps an already signed value.
    pub const fn new(value: i16) -> Self {
        Self(value)
    }

    /// Builds a sample from its low and high register bytes.
    pub const fn from_bytes(low: u8, high: u8) -> Self {
        Self(fold(combine(low, high)))
    }

    /// Returns the signed value.
    pub const fn value(self) -> i16 {
        self.0
    }

    /// Returns the absolute value; `-32768` maps to `32768`.
    pub const fn magnitude(self) -> u16 {
        self.0.unsigned_abs()
    }
}

impl From<AccelerationSample> for i16 {
    fn from(sample: AccelerationSample) -> Self {
        sample.0
    }
}
