use std::cell::RefCell;
use std::error::Error;
use std::io;
use std::rc::Rc;

use navhud::core::{Frame, HudPort};
use navhud::{Angle, Hud};

/// Port that records the wire bytes of every delivered frame.
#[derive(Debug, Default)]
struct CapturePort {
    frames: Vec<Vec<u8>>,
}

impl HudPort for CapturePort {
    fn send_frame(&mut self, frame: &Frame<'_>) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.frames.push(frame.to_bytes());
        Ok(())
    }
}

/// Port that fails every delivery.
#[derive(Debug, Default)]
struct ErrorPort {}

impl HudPort for ErrorPort {
    fn send_frame(&mut self, _: &Frame<'_>) -> Result<(), Box<dyn Error + Send + Sync>> {
        Err(Box::new(io::Error::new(io::ErrorKind::Other, "Dummy port error")))
    }
}

#[test]
fn field_setters_produce_expected_wire_bytes() {
    let port = Rc::new(RefCell::new(CapturePort::default()));
    let mut hud = Hud::new(port.clone());

    hud.set_time(7, 5).unwrap();
    hud.set_direction(Angle::Straight).unwrap();
    hud.set_brightness(5).unwrap();

    let frames = &port.borrow().frames;
    assert_eq!(3, frames.len());
    assert_eq!(
        vec![
            0x10, 0x7B, 0x0F, 0x09, 0x00, 0x00, 0x00, 0x55, 0x15, 0x05, 0x00, 0x0A, 0x07, 0xFF, 0x0A, 0x05, 0x00, 0x00,
            0xDF, 0x10, 0x03,
        ],
        frames[0]
    );
    assert_eq!(
        vec![0x10, 0x7B, 0x0A, 0x04, 0x00, 0x00, 0x00, 0x55, 0x15, 0x01, 0x80, 0x00, 0x10, 0x10, 0x7C, 0x10, 0x03],
        frames[1]
    );
    assert_eq!(
        vec![0x10, 0x7B, 0x0A, 0x04, 0x00, 0x00, 0x00, 0x55, 0x15, 0x04, 0x00, 0x00, 0x05, 0x04, 0x10, 0x03],
        frames[2]
    );
}

#[test]
fn port_errors_are_propagated() {
    let port = Rc::new(RefCell::new(ErrorPort::default()));
    let mut hud = Hud::new(port);

    let error = hud.set_time(12, 30).unwrap_err();
    assert!(error.source().is_some());
}

#[test]
fn frame_budget_drops_excess_frames() {
    let port = Rc::new(RefCell::new(CapturePort::default()));
    let mut hud = Hud::new(port.clone());

    // Seven single-frame commands in one window: the budget allows six.
    for _ in 0..7 {
        hud.set_brightness(3).unwrap();
    }

    assert_eq!(6, port.borrow().frames.len());
}

#[test]
fn dropped_frames_are_not_errors() {
    let port = Rc::new(RefCell::new(ErrorPort::default()));
    let mut hud = Hud::new(port);

    // Exhaust the budget against an always-failing port.
    // The first six fail; once the budget is spent, sends succeed by doing nothing.
    for _ in 0..6 {
        assert!(hud.set_brightness(0).is_err());
    }
    hud.set_brightness(0).unwrap();
}
