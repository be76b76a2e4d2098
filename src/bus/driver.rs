//! Blocking two-wire master protocol built on a [`BusPeripheral`].

use embedded_hal::i2c::{ErrorType, I2c, Operation, SevenBitAddress};

use super::{Acknowledge, Address, BusError, BusPeripheral, Condition, WaitPolicy};

/// Two-wire master driving the bus through an owned controller handle.
///
/// Every primitive waits for the controller to go idle first and then polls
/// until the requested bus event has completed. Primitives must not be
/// interleaved from more than one context; a transaction owns the bus from
/// [`start`](Self::start) to [`stop`](Self::stop).
pub struct BusDriver<P> {
    peripheral: P,
    policy: WaitPolicy,
}

impl<P> BusDriver<P> {
    /// Creates a driver that waits without bound, like the bare hardware.
    pub const fn new(peripheral: P) -> Self {
        Self::with_policy(peripheral, WaitPolicy::Unbounded)
    }

    /// Creates a driver with an explicit wait policy.
    pub const fn with_policy(peripheral: P, policy: WaitPolicy) -> Self {
        Self { peripheral, policy }
    }

    /// Returns the active wait policy.
    pub fn policy(&self) -> WaitPolicy {
        self.policy
    }

    /// Replaces the wait policy.
    pub fn set_policy(&mut self, policy: WaitPolicy) {
        self.policy = policy;
    }

    /// Provides mutable access to the controller handle.
    pub fn peripheral_mut(&mut self) -> &mut P {
        &mut self.peripheral
    }

    /// Consumes the driver and returns the controller handle.
    pub fn release(self) -> P {
        self.peripheral
    }
}

impl<P> BusDriver<P>
where
    P: BusPeripheral,
{
    fn poll<F>(&mut self, condition: Condition, mut ready: F) -> Result<(), BusError>
    where
        F: FnMut(&mut P) -> bool,
    {
        let mut polls: u32 = 0;
        loop {
            if ready(&mut self.peripheral) {
                return Ok(());
            }

            if let WaitPolicy::Polls(limit) = self.policy {
                polls = polls.saturating_add(1);
                if polls >= limit {
                    warn!("bus wait expired: {}", condition);
                    return Err(BusError::Timeout(condition));
                }
            }

            core::hint::spin_loop();
        }
    }

    /// Blocks until no primitive is pending and no transmission is active.
    pub fn wait_idle(&mut self) -> Result<(), BusError> {
        self.poll(Condition::Idle, |p| !p.control().primitive_pending())?;
        self.poll(Condition::Idle, |p| !p.status().trstat())
    }

    /// Issues a start condition.
    pub fn start(&mut self) -> Result<(), BusError> {
        self.wait_idle()?;
        let control = self.peripheral.control().with_sen(true);
        self.peripheral.set_control(control);
        self.poll(Condition::Start, |p| !p.control().sen())
    }

    /// Issues a repeated start without releasing the bus.
    pub fn restart(&mut self) -> Result<(), BusError> {
        self.wait_idle()?;
        let control = self.peripheral.control().with_rsen(true);
        self.peripheral.set_control(control);
        self.poll(Condition::Restart, |p| !p.control().rsen())
    }

    /// Issues a stop condition, releasing the bus.
    pub fn stop(&mut self) -> Result<(), BusError> {
        self.wait_idle()?;
        let control = self.peripheral.control().with_pen(true);
        self.peripheral.set_control(control);
        self.poll(Condition::Stop, |p| !p.control().pen())
    }

    /// Drives the acknowledge slot after a received byte.
    pub fn acknowledge(&mut self, ack: Acknowledge) -> Result<(), BusError> {
        self.wait_idle()?;
        let control = self
            .peripheral
            .control()
            .with_ackdt(ack == Acknowledge::Nack)
            .with_acken(true);
        self.peripheral.set_control(control);
        self.poll(Condition::Acknowledge, |p| !p.control().acken())
    }

    /// Transmits one byte.
    ///
    /// With `expect_ack` set this waits for the peer to pull the acknowledge
    /// slot low. Under [`WaitPolicy::Unbounded`] a silent peer blocks here
    /// forever.
    pub fn write_byte(&mut self, byte: u8, expect_ack: bool) -> Result<(), BusError> {
        self.wait_idle()?;
        self.peripheral.transmit(byte);
        self.poll(Condition::TransmitBuffer, |p| !p.status().tbf())?;
        self.wait_idle()?;
        if expect_ack {
            self.poll(Condition::PeerAcknowledge, |p| !p.status().ackstat())?;
        }
        Ok(())
    }

    /// Receives one byte and answers it with `ack`.
    ///
    /// Use [`Acknowledge::Nack`] on the last byte of a read sequence.
    pub fn read_byte(&mut self, ack: Acknowledge) -> Result<u8, BusError> {
        self.wait_idle()?;
        let control = self.peripheral.control().with_rcen(true);
        self.peripheral.set_control(control);
        self.poll(Condition::Receive, |p| !p.control().rcen())?;
        self.poll(Condition::Receive, |p| p.status().rbf())?;
        let byte = self.peripheral.receive();
        self.acknowledge(ack)?;
        Ok(byte)
    }

    /// Runs `body` as one bus transaction.
    ///
    /// If `body` fails part way, a stop condition is attempted before the
    /// original error is returned so the bus is released for the next caller.
    /// A failure of that stop is ignored.
    pub fn with_transaction<T, F>(&mut self, body: F) -> Result<T, BusError>
    where
        F: FnOnce(&mut Self) -> Result<T, BusError>,
    {
        body(self).inspect_err(|_| {
            let _ = self.stop();
        })
    }
}

impl<P> ErrorType for BusDriver<P> {
    type Error = BusError;
}

impl<P> I2c<SevenBitAddress> for BusDriver<P>
where
    P: BusPeripheral,
{
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let address = Address::new(address);
        self.with_transaction(|bus| bus.run_operations(address, operations))
    }
}

/// Empty reads clock no bytes and are left off the wire.
fn is_empty_read(operation: &Operation<'_>) -> bool {
    matches!(operation, Operation::Read(buffer) if buffer.is_empty())
}

impl<P> BusDriver<P>
where
    P: BusPeripheral,
{
    fn run_operations(
        &mut self,
        address: Address,
        operations: &mut [Operation<'_>],
    ) -> Result<(), BusError> {
        let mut previous_read: Option<bool> = None;

        for index in 0..operations.len() {
            if is_empty_read(&operations[index]) {
                continue;
            }

            let is_read = matches!(operations[index], Operation::Read(_));
            let next_is_read = matches!(
                operations[index + 1..].iter().find(|op| !is_empty_read(op)),
                Some(Operation::Read(_))
            );

            if previous_read != Some(is_read) {
                match previous_read {
                    None => self.start()?,
                    Some(_) => self.restart()?,
                }
                let frame = if is_read {
                    address.read_frame()
                } else {
                    address.write_frame()
                };
                self.write_byte(frame, true)?;
            }

            match &mut operations[index] {
                Operation::Write(bytes) => {
                    for &byte in bytes.iter() {
                        self.write_byte(byte, true)?;
                    }
                }
                Operation::Read(buffer) => {
                    let last = buffer.len() - 1;
                    for (position, slot) in buffer.iter_mut().enumerate() {
                        let ack = if position == last && !next_is_read {
                            Acknowledge::Nack
                        } else {
                            Acknowledge::Ack
                        };
                        *slot = self.read_byte(ack)?;
                    }
                }
            }

            previous_read = Some(is_read);
        }

        if previous_read.is_some() {
            self.stop()?;
        }
        Ok(())
    }
}
