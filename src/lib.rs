//! A library for driving glanceable navigation displays over a Bluetooth serial link.
//!
//! Provides a way to connect to a display and update its fields: a turn arrow, the distance
//! to the next turn, the current speed with an optional limit, and a clock. An
//! [`ArrowRecognizer`] is included for turning captured turn-icon bitmaps back into
//! directions, and [`NavState`] gathers data from multiple sources into snapshots that
//! [`Hud::refresh`] pushes to the display. No routing or guidance logic is provided; you
//! are responsible for supplying the data yourself.
//!
//! Tested with a Garmin HUD+ windshield display over its Bluetooth serial profile. Should
//! work with any display speaking the same framed protocol, but no guarantees.
//!
//! Intended only for hobbyist and educational purposes. Not affiliated with Garmin in any way.
//!
//! # Examples
//!
//! ```no_run
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use navhud::{Angle, Hud, SerialHud};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! #
//! // Set up the port. Because the port can be shared with
//! // other senders, it must be wrapped in an Rc<RefCell>.
//! let port = serial::open("/dev/rfcomm0")?;
//! let port = Rc::new(RefCell::new(SerialHud::new(port)?));
//!
//! // Create a Hud driving that port.
//! let mut hud = Hud::new(port);
//!
//! // Update fields as the underlying data changes.
//! hud.set_time(7, 5)?;
//! hud.set_direction(Angle::Left)?;
//! hud.set_distance_metres(400)?;
//! hud.set_speed(57, true)?;
//!
//! // Blank everything when guidance ends.
//! hud.clear()?;
//! #
//! # Ok(()) }
//! ```
//!
//! # Sub-crates
//!
//! In addition to the high-level API of [`Hud`], several lower-level components are provided
//! that can be combined for more specialized use-cases.
//!
//! - [`navhud-core`] \(re-exported as `core`\) contains the basic types describing the protocol, and is useful
//!   if you want to implement a custom [`HudPort`] or otherwise operate at the level of the raw protocol.
//! - [`navhud-serial`] \(re-exported as `serial`\) contains functions for configuring the serial port,
//!   as well as the implementation of [`SerialHud`].
//! - [`navhud-testing`] contains tools not directly related to communicating with displays,
//!   but useful for testing and debugging.
//!
//! [`Hud`]: struct.Hud.html
//! [`Hud::refresh`]: struct.Hud.html#method.refresh
//! [`ArrowRecognizer`]: struct.ArrowRecognizer.html
//! [`NavState`]: struct.NavState.html
//! [`navhud-core`]: https://docs.rs/navhud-core
//! [`navhud-serial`]: https://docs.rs/navhud-serial
//! [`navhud-testing`]: https://docs.rs/navhud-testing
//! [`HudPort`]: trait.HudPort.html
//! [`SerialHud`]: struct.SerialHud.html
#![doc(html_root_url = "https://docs.rs/navhud/0.1.0")]
#![deny(
    missing_copy_implementations,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![warn(
    missing_docs,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]

pub use navhud_core as core;
pub use navhud_serial as serial;

mod hud;
mod recognizer;
mod state;

pub use self::hud::{Hud, HudError};
pub use self::recognizer::{ArrowRecognizer, Recognition};
pub use self::state::{NavSnapshot, NavState};

pub use crate::core::{
    classify, format_distance, parse_distance, Angle, Bitmap, BitmapError, Command, Direction, Distance, Fingerprint, Frame,
    HudPort, Payload, UnitCode,
};
pub use crate::serial::SerialHud;
