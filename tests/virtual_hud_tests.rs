use std::cell::RefCell;
use std::rc::Rc;

use navhud::{Angle, Hud, NavSnapshot};
use navhud_testing::VirtualHud;

#[test]
fn hud_drives_virtual_display() {
    let port = Rc::new(RefCell::new(VirtualHud::new()));
    let mut hud = Hud::new(port.clone());

    hud.set_direction(Angle::EasyRight).unwrap();
    hud.set_distance_metres(400).unwrap();

    let port = port.borrow();
    assert_eq!(2, port.frames().len());
    assert_eq!(&[0x01, 0x80, 0x00, 0x08], port.frames()[0].payload().as_ref());
    // 400 with the point off and unit code 2 (metres).
    assert_eq!(
        &[0x03, 0x0A, 0x04, 0x0A, 0x00, 0x0A, 0x02],
        port.frames()[1].payload().as_ref()
    );
}

#[test]
fn clear_blanks_every_field() {
    let port = Rc::new(RefCell::new(VirtualHud::new()));
    let mut hud = Hud::new(port.clone());

    hud.clear().unwrap();

    // One frame each for speed, direction, and distance.
    assert_eq!(3, port.borrow().frames().len());
}

#[test]
fn refresh_pushes_a_full_snapshot() {
    let port = Rc::new(RefCell::new(VirtualHud::new()));
    let mut hud = Hud::new(port.clone());

    let snapshot = NavSnapshot {
        navigating: true,
        direction: Some(Angle::Left),
        distance_to_turn_metres: Some(1250),
        time: Some((7, 5)),
        speed: 57,
        speed_limit: Some(50),
        speeding: true,
        camera: false,
        show_speed: true,
    };
    hud.refresh(&snapshot).unwrap();

    let port = port.borrow();
    assert_eq!(4, port.frames().len());

    // Arrow, then distance (1.2 km), then clock, then speed with limit.
    assert_eq!(&[0x01, 0x80, 0x00, 0x40], port.frames()[0].payload().as_ref());
    assert_eq!(
        &[0x03, 0x00, 0x00, 0x01, 0xFF, 0x02, 0x01],
        port.frames()[1].payload().as_ref()
    );
    assert_eq!(
        &[0x05, 0x00, 0x0A, 0x07, 0xFF, 0x0A, 0x05, 0x00, 0x00],
        port.frames()[2].payload().as_ref()
    );
}

#[test]
fn refresh_blanks_missing_fields() {
    let port = Rc::new(RefCell::new(VirtualHud::new()));
    let mut hud = Hud::new(port.clone());

    hud.refresh(&NavSnapshot::default()).unwrap();

    // Not navigating and no speed to show: arrow, distance, and speed all blanked.
    // No time in the snapshot, so the clock is left alone.
    assert_eq!(3, port.borrow().frames().len());
}
