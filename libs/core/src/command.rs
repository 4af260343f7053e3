use std::borrow::Cow;

use derive_more::{Display, LowerHex, UpperHex};

use crate::direction::Angle;
use crate::frame::{Frame, Payload};

/// High-level representation of one display update.
///
/// Ascribes meaning to a [`Frame`]'s payload: each variant corresponds to one
/// region of the display (clock, turn arrow, speed, distance, backlight) and
/// encodes to one or more frames via [`frames`]. Encoding never fails:
/// out-of-range numeric inputs are clamped or wrapped so the device always
/// receives a well-formed frame.
///
/// # Examples
///
/// ```
/// use navhud_core::Command;
///
/// let command = Command::SetBrightness { level: 5 };
/// let frames = command.frames();
/// assert_eq!(1, frames.len());
/// assert_eq!(&[0x04, 0x00, 0x00, 0x05], frames[0].payload().as_ref());
/// ```
///
/// [`Frame`]: struct.Frame.html
/// [`frames`]: #method.frames
#[derive(Debug, Copy, Clone, PartialEq)]
#[non_exhaustive]
pub enum Command {
    /// Show a time of day on the clock field, e.g. `12:34`.
    SetTime {
        /// The hour, 0–23. Values above 23 wrap modulo 10 per digit.
        hour: u8,

        /// The minute, 0–59.
        minute: u8,
    },

    /// Show a turn arrow.
    SetDirection {
        /// The arrow to display.
        angle: Angle,
    },

    /// Blank the turn arrow field.
    ClearDirection,

    /// Show a speed on the secondary number field, optionally with the speed icon.
    SetSpeed {
        /// The speed to display. The hundreds digit wraps modulo 10 to fit the 3-digit field.
        speed: u16,

        /// Whether to show the speed icon next to the number.
        show_icon: bool,
    },

    /// Show the current speed together with an optional speed limit and warning icons.
    SetSpeedWithLimit {
        /// The current speed.
        speed: u16,

        /// The speed limit. `None` (or zero) hides the limit and the separating slash.
        limit: Option<u16>,

        /// Whether to show the speeding warning icon.
        speeding_icon: bool,

        /// Whether to show the speed camera icon.
        camera_icon: bool,
    },

    /// Blank the speed field entirely.
    ClearSpeed,

    /// Show a distance on the main number field.
    SetDistance {
        /// The distance value, whole or with one decimal place.
        value: Distance,

        /// The unit indicator to light up next to the number.
        unit: UnitCode,
    },

    /// Blank the distance field.
    ClearDistance,

    /// Blank the whole display (arrow, speed, and distance fields).
    Clear,

    /// Set the backlight brightness.
    SetBrightness {
        /// Brightness level 0–10; values above 10 are clamped. 0 selects automatic brightness.
        level: u8,
    },
}

impl Command {
    /// Encodes the command into the frame(s) that carry it on the wire.
    ///
    /// Every command maps to a single frame except [`Clear`], which expands to
    /// three (direction clear, speed clear, distance clear).
    ///
    /// # Examples
    ///
    /// ```
    /// use navhud_core::Command;
    ///
    /// let frames = Command::SetTime { hour: 7, minute: 5 }.frames();
    /// assert_eq!(&[0x05, 0x00, 0x0A, 0x07, 0xFF, 0x0A, 0x05, 0x00, 0x00], frames[0].payload().as_ref());
    ///
    /// assert_eq!(3, Command::Clear.frames().len());
    /// ```
    ///
    /// [`Clear`]: #variant.Clear
    pub fn frames(&self) -> Vec<Frame<'static>> {
        match *self {
            Command::Clear => vec![
                frame_for(Command::ClearDirection.payload()),
                frame_for(Command::ClearSpeed.payload()),
                frame_for(Command::ClearDistance.payload()),
            ],
            _ => vec![frame_for(self.payload())],
        }
    }

    /// Builds the raw payload for a single-frame command.
    fn payload(&self) -> Vec<u8> {
        match *self {
            Command::SetTime { hour, minute } => vec![
                0x05,                          // Command: time
                0x00,                          // Traffic flag
                to_digit(u32::from(hour) / 10), // Hour tens
                to_digit(u32::from(hour)),     // Hour ones
                0xFF,                          // Colon
                to_digit(u32::from(minute) / 10), // Minute tens
                to_digit(u32::from(minute)),   // Minute ones
                0x00,                          // 'h' suffix
                0x00,                          // Flag
            ],

            Command::SetDirection { angle } => vec![
                0x01,         // Command: direction
                0x80,         // Type: arrow only
                0x00,         // Roundabout (unused)
                angle.code(), // Arrow selector
            ],

            Command::ClearDirection => vec![0x01, 0x00, 0x00, 0x00],

            Command::SetSpeed { speed, show_icon } => {
                let (hundreds, tens) = if speed < 10 {
                    (0x00, 0x00)
                } else {
                    ((speed / 100 % 10) as u8, to_digit(u32::from(speed) / 10))
                };
                vec![
                    0x06, // Command: speed
                    0x00,
                    0x00,
                    0x00,
                    0x00,
                    hundreds,
                    tens,
                    to_digit(u32::from(speed)),
                    0x00,
                    flag(show_icon),
                ]
            }

            Command::SetSpeedWithLimit {
                speed,
                limit,
                speeding_icon,
                camera_icon,
            } => {
                let speed_tens = if speed < 10 { 0x00 } else { to_digit(u32::from(speed) / 10) };
                let (limit_hundreds, limit_tens, limit_ones, slash) = match limit {
                    Some(limit) if limit > 0 => {
                        let tens = if limit < 10 { 0x00 } else { to_digit(u32::from(limit) / 10) };
                        ((limit / 100 % 10) as u8, tens, to_digit(u32::from(limit)), 0xFF)
                    }
                    _ => (0x00, 0x00, 0x00, 0x00),
                };
                vec![
                    0x06, // Command: speed
                    (speed / 100 % 10) as u8,
                    speed_tens,
                    to_digit(u32::from(speed)),
                    slash,
                    limit_hundreds,
                    limit_tens,
                    limit_ones,
                    flag(speeding_icon),
                    flag(camera_icon),
                ]
            }

            Command::ClearSpeed => vec![0x06, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],

            Command::SetDistance { value, unit } => {
                let (d1, d2, d3, d4, point) = distance_digits(value);
                vec![
                    0x03, // Command: distance
                    d1,    // Thousands
                    d2,    // Hundreds
                    d3,    // Tens
                    point, // Decimal point
                    d4,    // Ones
                    unit.0,
                ]
            }

            Command::ClearDistance => vec![0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],

            Command::SetBrightness { level } => vec![0x04, 0x00, 0x00, level.min(10)],

            // Clear is expanded in frames().
            Command::Clear => unreachable!("Clear has no single payload"),
        }
    }
}

/// Wraps a payload in a frame. Command payloads are at most 10 bytes, well
/// under the 249-byte frame limit, so this cannot fail.
fn frame_for(payload: Vec<u8>) -> Frame<'static> {
    Frame::new(Payload::try_new(Cow::from(payload)).expect("command payloads are under the frame limit"))
}

/// Converts a boolean into the device's on/off flag byte.
fn flag(on: bool) -> u8 {
    if on {
        0xFF
    } else {
        0x00
    }
}

/// Encodes an integer's last decimal digit for a display digit field.
///
/// The device reserves byte value `0x00` on digit fields to mean "blank", so
/// the digit zero is transmitted as 10 instead.
///
/// # Examples
///
/// ```
/// use navhud_core::to_digit;
///
/// assert_eq!(10, to_digit(0));
/// assert_eq!(7, to_digit(7));
/// assert_eq!(10, to_digit(10));
/// assert_eq!(3, to_digit(23));
/// ```
pub fn to_digit(n: u32) -> u8 {
    let digit = (n % 10) as u8;
    if digit == 0 {
        10
    } else {
        digit
    }
}

/// Computes the four digit bytes and decimal-point flag for a distance value.
fn distance_digits(value: Distance) -> (u8, u8, u8, u8, u8) {
    match value {
        Distance::Whole(value) => whole_digits(value),
        Distance::Decimal(value) => {
            if value >= 1000.0 {
                return whole_digits(value as u32);
            }
            let value10 = (value * 10.0) as u32;
            if value10 >= 10_000 {
                // Too large for the X X X . Y format; fall back to a whole number.
                return whole_digits(value as u32);
            }

            let thousands = value10 / 1000;
            let hundreds = value10 / 100 % 10;
            let tens = value10 / 10 % 10;
            let ones = value10 % 10;

            // Structurally-leading zeros are rendered blank rather than as the
            // digit zero, except the tens position so 0.5 still shows its zero.
            let d1 = if thousands == 0 { 0x00 } else { to_digit(thousands) };
            let d2 = if thousands == 0 && hundreds == 0 { 0x00 } else { to_digit(hundreds) };
            (d1, d2, to_digit(tens), to_digit(ones), 0xFF)
        }
    }
}

/// Digit bytes for a plain 4-digit whole number with the decimal point off.
fn whole_digits(value: u32) -> (u8, u8, u8, u8, u8) {
    (
        to_digit(value / 1000),
        to_digit(value / 100),
        to_digit(value / 10),
        to_digit(value),
        0x00,
    )
}

/// A distance value for [`Command::SetDistance`].
///
/// The display has a 4-digit number field with an optional decimal point before
/// the last digit, so distances are either whole numbers or carry one decimal
/// place (e.g. `1.5` km).
///
/// [`Command::SetDistance`]: enum.Command.html#variant.SetDistance
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Distance {
    /// A whole number of units, shown without a decimal point.
    Whole(u32),

    /// A value with one decimal place, e.g. `1.5`.
    Decimal(f32),
}

/// The unit indicator byte accompanying a distance.
///
/// The codec passes the byte through unchanged, so callers may use codes beyond
/// the named constants if their device firmware supports more unit families.
///
/// # Examples
///
/// ```
/// use navhud_core::{Command, Distance, UnitCode};
///
/// let command = Command::SetDistance { value: Distance::Whole(500), unit: UnitCode::METRES };
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, LowerHex, UpperHex)]
pub struct UnitCode(pub u8);

impl UnitCode {
    /// No unit indicator.
    pub const NONE: UnitCode = UnitCode(0);

    /// Kilometres.
    pub const KILOMETRES: UnitCode = UnitCode(1);

    /// Metres.
    pub const METRES: UnitCode = UnitCode(2);

    /// Miles.
    pub const MILES: UnitCode = UnitCode(5);

    /// Feet.
    pub const FEET: UnitCode = UnitCode(8);
}
