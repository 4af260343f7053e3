use serial_core;

use navhud::core::{Command, HudPort};
use navhud::SerialHud;
use serial_core::{PortSettings, SerialDevice};

mod mock_serial_port;
use crate::mock_serial_port::{MockSerialPort, SerialFailure};

#[test]
fn serial_hud_works() {
    let port = MockSerialPort::new(SerialFailure::None);
    let mut hud = SerialHud::new(port).unwrap();

    // Ensure serial port was configured correctly.
    let expected = PortSettings {
        baud_rate: serial_core::BaudRate::Baud9600,
        char_size: serial_core::CharSize::Bits8,
        parity: serial_core::Parity::ParityNone,
        stop_bits: serial_core::StopBits::Stop1,
        flow_control: serial_core::FlowControl::FlowNone,
    };
    assert_eq!(expected, hud.port().read_settings().unwrap());

    // Send a command and verify the exact bytes on the wire.
    for frame in (Command::SetTime { hour: 7, minute: 5 }).frames() {
        hud.send_frame(&frame).unwrap();
    }

    let expected_bytes = [
        0x10, 0x7B, 0x0F, 0x09, 0x00, 0x00, 0x00, 0x55, 0x15, 0x05, 0x00, 0x0A, 0x07, 0xFF, 0x0A, 0x05, 0x00, 0x00, 0xDF,
        0x10, 0x03,
    ];
    assert_eq!(&expected_bytes, hud.port().written());
}

#[test]
fn stuffed_frames_reach_the_wire_intact() {
    let port = MockSerialPort::new(SerialFailure::None);
    let mut hud = SerialHud::new(port).unwrap();

    // The arrow payload ends in the delimiter byte, so the wire form carries a doubled 0x10.
    for frame in (Command::SetDirection {
        angle: navhud::Angle::Straight,
    })
    .frames()
    {
        hud.send_frame(&frame).unwrap();
    }

    let expected_bytes = [
        0x10, 0x7B, 0x0A, 0x04, 0x00, 0x00, 0x00, 0x55, 0x15, 0x01, 0x80, 0x00, 0x10, 0x10, 0x7C, 0x10, 0x03,
    ];
    assert_eq!(&expected_bytes, hud.port().written());
}

#[test]
fn configuration_failure_is_reported() {
    let port = MockSerialPort::new(SerialFailure::WriteSettings);
    assert!(SerialHud::new(port).is_err());
}

#[test]
fn write_failure_is_reported() {
    let port = MockSerialPort::new(SerialFailure::Write);
    let mut hud = SerialHud::new(port).unwrap();

    let frames = Command::ClearDistance.frames();
    assert!(hud.send_frame(&frames[0]).is_err());
}
