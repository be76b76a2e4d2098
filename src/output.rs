//! Output side of the node: serial character sink and indicator pins.

use embedded_hal::digital::{OutputPin, PinState};

use crate::threshold::Decision;

/// Blocking serial transmitter, one character at a time.
pub trait SerialSink {
    /// Error type produced by the transmitter.
    type Error;

    /// Sends one character, waiting for room in the transmit buffer.
    fn send_char(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Sends every byte of `text` in order.
    fn send_str(&mut self, text: &str) -> Result<(), Self::Error> {
        for byte in text.bytes() {
            self.send_char(byte)?;
        }
        Ok(())
    }
}

impl<S: SerialSink + ?Sized> SerialSink for &mut S {
    type Error = S::Error;

    fn send_char(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).send_char(byte)
    }
}

/// The three digital outputs driven from a [`Decision`].
pub struct Indicators<CALM, XA, YA> {
    calm: CALM,
    x_alarm: XA,
    y_alarm: YA,
}

impl<CALM, XA, YA, E> Indicators<CALM, XA, YA>
where
    CALM: OutputPin<Error = E>,
    XA: OutputPin<Error = E>,
    YA: OutputPin<Error = E>,
{
    /// Groups the calm, X-alarm and Y-alarm pins.
    pub fn new(calm: CALM, x_alarm: XA, y_alarm: YA) -> Self {
        Self {
            calm,
            x_alarm,
            y_alarm,
        }
    }

    /// Drives every pin to the state in `decision`.
    pub fn apply(&mut self, decision: Decision) -> Result<(), E> {
        self.calm.set_state(PinState::from(decision.calm))?;
        self.x_alarm.set_state(PinState::from(decision.x_alarm))?;
        self.y_alarm.set_state(PinState::from(decision.y_alarm))?;
        Ok(())
    }

    /// Returns the owned pins.
    pub fn release(self) -> (CALM, XA, YA) {
        (self.calm, self.x_alarm, self.y_alarm)
    }
}
