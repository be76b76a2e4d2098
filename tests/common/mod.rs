#![allow(dead_code)]

use icm20602::bus::{BusPeripheral, Control, Status};
use icm20602::output::SerialSink;

pub const DEV_ADDR: u8 = 0x68;

/// Bus events as seen on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Start,
    Restart,
    Stop,
    Write(u8),
    Read(u8),
    Ack,
    Nack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Address,
    Register,
    Data,
    Reading,
}

/// Register-file peer answering on one address.
pub struct SimPeer {
    pub address: u8,
    pub registers: [u8; 256],
    pub responsive: bool,
    pointer: u8,
    phase: Phase,
}

impl SimPeer {
    fn on_start(&mut self) {
        self.phase = Phase::Address;
    }

    fn on_stop(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Returns `true` when the byte is acknowledged.
    fn on_write(&mut self, byte: u8) -> bool {
        match self.phase {
            Phase::Address => {
                if !self.responsive || byte >> 1 != self.address {
                    self.phase = Phase::Idle;
                    false
                } else if byte & 0x01 == 0x01 {
                    self.phase = Phase::Reading;
                    true
                } else {
                    self.phase = Phase::Register;
                    true
                }
            }
            Phase::Register => {
                self.pointer = byte;
                self.phase = Phase::Data;
                true
            }
            Phase::Data => {
                self.registers[self.pointer as usize] = byte;
                self.pointer = self.pointer.wrapping_add(1);
                true
            }
            Phase::Idle | Phase::Reading => false,
        }
    }

    fn on_read(&mut self) -> u8 {
        if self.phase != Phase::Reading {
            return 0xFF;
        }
        let value = self.registers[self.pointer as usize];
        self.pointer = self.pointer.wrapping_add(1);
        value
    }
}

/// Two-wire controller model: request bits and transmit flags stay visible for
/// exactly one poll before the hardware clears them.
pub struct SimBus {
    control: Control,
    status: Status,
    rx: u8,
    pub events: Vec<Event>,
    pub peer: SimPeer,
}

impl SimBus {
    pub fn new() -> Self {
        Self {
            control: Control::new().with_on(true),
            status: Status::new(),
            rx: 0,
            events: Vec::new(),
            peer: SimPeer {
                address: DEV_ADDR,
                registers: [0; 256],
                responsive: true,
                pointer: 0,
                phase: Phase::Idle,
            },
        }
    }

    pub fn silent() -> Self {
        let mut bus = Self::new();
        bus.peer.responsive = false;
        bus
    }

    pub fn with_registers(pairs: &[(u8, u8)]) -> Self {
        let mut bus = Self::new();
        for &(register, value) in pairs {
            bus.peer.registers[register as usize] = value;
        }
        bus
    }

    /// Register addresses selected by write transactions, in bus order.
    pub fn selected_registers(&self) -> Vec<u8> {
        self.events
            .windows(3)
            .filter_map(|w| match w {
                [Event::Start, Event::Write(frame), Event::Write(register)]
                    if frame & 0x01 == 0 =>
                {
                    Some(*register)
                }
                _ => None,
            })
            .collect()
    }
}

impl BusPeripheral for SimBus {
    fn control(&mut self) -> Control {
        let current = self.control;
        if current.rcen() {
            self.status.set_rbf(true);
        }
        self.control = current
            .with_sen(false)
            .with_rsen(false)
            .with_pen(false)
            .with_rcen(false)
            .with_acken(false);
        current
    }

    fn set_control(&mut self, control: Control) {
        let old = self.control;
        if control.sen() && !old.sen() {
            self.events.push(Event::Start);
            self.peer.on_start();
        }
        if control.rsen() && !old.rsen() {
            self.events.push(Event::Restart);
            self.peer.on_start();
        }
        if control.pen() && !old.pen() {
            self.events.push(Event::Stop);
            self.peer.on_stop();
        }
        if control.rcen() && !old.rcen() {
            self.rx = self.peer.on_read();
        }
        if control.acken() && !old.acken() {
            self.events
                .push(if control.ackdt() { Event::Nack } else { Event::Ack });
        }
        self.control = control;
    }

    fn status(&mut self) -> Status {
        let current = self.status;
        self.status = current.with_tbf(false).with_trstat(false);
        current
    }

    fn transmit(&mut self, byte: u8) {
        self.events.push(Event::Write(byte));
        let acked = self.peer.on_write(byte);
        self.status = self
            .status
            .with_tbf(true)
            .with_trstat(true)
            .with_ackstat(!acked);
    }

    fn receive(&mut self) -> u8 {
        self.status.set_rbf(false);
        self.events.push(Event::Read(self.rx));
        self.rx
    }
}

/// Serial sink capturing every character.
#[derive(Default)]
pub struct Capture(pub Vec<u8>);

impl Capture {
    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl SerialSink for Capture {
    type Error = core::convert::Infallible;

    fn send_char(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.0.push(byte);
        Ok(())
    }
}
