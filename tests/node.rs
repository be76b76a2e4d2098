mod common;

use common::*;
use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTrans};
use icm20602::bus::{BusDriver, BusError, Condition, WaitPolicy};
use icm20602::config::Config;
use icm20602::device::Identity;
use icm20602::node::{AcquisitionLoop, NodeError, SENSOR_ERROR, SENSOR_OK};
use icm20602::output::Indicators;
use icm20602::threshold::Decision;
use icm20602::{Error, Icm20602};

const STARTUP_REGISTERS: [u8; 7] = [0x6B, 0x6C, 0x6A, 0x1A, 0x1B, 0x1C, 0x69];

fn pins(
    calm: &[PinTrans],
    x: &[PinTrans],
    y: &[PinTrans],
) -> Indicators<PinMock, PinMock, PinMock> {
    Indicators::new(PinMock::new(calm), PinMock::new(x), PinMock::new(y))
}

fn finish(indicators: Indicators<PinMock, PinMock, PinMock>) {
    let (mut calm, mut x, mut y) = indicators.release();
    calm.done();
    x.done();
    y.done();
}

#[test]
fn startup_configures_then_reports_match() {
    let mut sim = SimBus::with_registers(&[(0x75, 0x12)]);
    let mut sink = Capture::default();
    let device = Icm20602::new_i2c(BusDriver::new(&mut sim), Config::default());
    let mut node = AcquisitionLoop::new(device, &mut sink, pins(&[], &[], &[]));

    assert_eq!(node.startup().unwrap(), Identity::Match);
    let (_, _, indicators) = node.release();
    finish(indicators);

    assert_eq!(sink.text(), SENSOR_OK);
    let mut expected = STARTUP_REGISTERS.to_vec();
    expected.push(0x75);
    assert_eq!(sim.selected_registers(), expected);
    let regs = &sim.peer.registers;
    assert_eq!(
        [regs[0x6B], regs[0x6C], regs[0x6A], regs[0x1A], regs[0x1B], regs[0x1C], regs[0x69]],
        [0x01, 0x00, 0x01, 0x80, 0x00, 0x00, 0x02]
    );
}

#[test]
fn identity_mismatch_changes_only_the_message() {
    let mut sim = SimBus::with_registers(&[(0x75, 0x98)]);
    let mut sink = Capture::default();
    let device = Icm20602::new_i2c(BusDriver::new(&mut sim), Config::default());
    let mut node = AcquisitionLoop::new(device, &mut sink, pins(&[], &[], &[]));

    assert_eq!(node.startup().unwrap(), Identity::Mismatch(0x98));
    let (_, _, indicators) = node.release();
    finish(indicators);

    assert_eq!(sink.text(), SENSOR_ERROR);
    let mut expected = STARTUP_REGISTERS.to_vec();
    expected.push(0x75);
    assert_eq!(sim.selected_registers(), expected);
}

#[test]
fn step_raises_x_alarm_and_reports_magnitudes() {
    let mut sim = SimBus::with_registers(&[
        (0x3C, 0xE8),
        (0x3B, 0x03),
        (0x3E, 0x18),
        (0x3D, 0xFF),
    ]);
    let mut sink = Capture::default();
    let device = Icm20602::new_i2c(BusDriver::new(&mut sim), Config::default());
    let indicators = pins(
        &[PinTrans::set(State::Low)],
        &[PinTrans::set(State::High)],
        &[PinTrans::set(State::Low)],
    );
    let mut node = AcquisitionLoop::new(device, &mut sink, indicators);

    let cycle = node.step().unwrap();
    assert_eq!(cycle.x.value(), 1_000);
    assert_eq!(cycle.y.value(), -232);
    assert_eq!(
        cycle.decision,
        Decision {
            calm: false,
            x_alarm: true,
            y_alarm: false,
        }
    );
    let (_, _, indicators) = node.release();
    finish(indicators);

    assert_eq!(sink.text(), "X:     1000, Y:      232\n\r");
    assert_eq!(sim.selected_registers(), [0x3C, 0x3B, 0x3E, 0x3D]);
}

#[test]
fn outputs_are_recomputed_every_cycle() {
    let mut sim = SimBus::with_registers(&[(0x3D, 0x02)]);
    let mut sink = Capture::default();
    let device = Icm20602::new_i2c(BusDriver::new(&mut sim), Config::default());
    let indicators = pins(
        &[PinTrans::set(State::Low), PinTrans::set(State::High)],
        &[PinTrans::set(State::Low), PinTrans::set(State::Low)],
        &[PinTrans::set(State::High), PinTrans::set(State::Low)],
    );
    let mut node = AcquisitionLoop::new(device, &mut sink, indicators);

    let first = node.step().unwrap();
    assert!(first.decision.y_alarm);

    let (mut device, sink_ref, indicators) = node.release();
    device.interface_mut().bus_mut().peripheral_mut().peer.registers[0x3D] = 0x00;
    device.interface_mut().bus_mut().peripheral_mut().peer.registers[0x3E] = 0x0A;
    let mut node = AcquisitionLoop::new(device, sink_ref, indicators);

    let second = node.step().unwrap();
    assert!(second.decision.calm);
    let (_, _, indicators) = node.release();
    finish(indicators);

    assert_eq!(
        sink.text(),
        "X:        0, Y:      512\n\rX:        0, Y:       10\n\r"
    );
}

#[test]
fn threshold_follows_configuration() {
    let mut sim = SimBus::with_registers(&[(0x3C, 0xE8), (0x3B, 0x03)]);
    let mut sink = Capture::default();
    let config = Config::new().threshold(1_001).build();
    let device = Icm20602::new_i2c(BusDriver::new(&mut sim), config);
    let indicators = pins(
        &[PinTrans::set(State::High)],
        &[PinTrans::set(State::Low)],
        &[PinTrans::set(State::Low)],
    );
    let mut node = AcquisitionLoop::new(device, &mut sink, indicators);

    assert_eq!(node.threshold().limit(), 1_001);
    assert!(node.step().unwrap().decision.calm);
    let (_, _, indicators) = node.release();
    finish(indicators);
}

#[test]
fn silent_peer_surfaces_timeout_with_bounded_waits() {
    let mut sim = SimBus::silent();
    let mut sink = Capture::default();
    let bus = BusDriver::with_policy(&mut sim, WaitPolicy::Polls(32));
    let device = Icm20602::new_i2c(bus, Config::default());
    let mut node = AcquisitionLoop::new(device, &mut sink, pins(&[], &[], &[]));

    let err = node.run().unwrap_err();
    assert!(matches!(
        err,
        NodeError::Device(Error::Interface(BusError::Timeout(
            Condition::PeerAcknowledge
        )))
    ));
    let (_, _, indicators) = node.release();
    finish(indicators);

    assert!(sink.0.is_empty());
}
