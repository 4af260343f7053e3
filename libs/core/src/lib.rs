//! Core types for describing communication with glanceable navigation displays.
//!
//! For the basic task of driving a display, you likely want to use the high-level API
//! in the [`navhud`] crate instead.
//!
//! However, `navhud_core` is useful for crates that want to interact with the display
//! protocol at a lower level than the `navhud` crate, or who want to provide their own
//! [`HudPort`] implementations for use by `navhud`.
//!
//! Tested with a Garmin HUD+ windshield display over its Bluetooth serial profile. Should
//! work with any display speaking the same framed protocol, but no guarantees.
//!
//! Intended only for hobbyist and educational purposes. Not affiliated with Garmin in any way.
//!
//! # Examples
//!
//! ```
//! use navhud_core::{Command, Frame, HudPort, Payload};
//! # use navhud_testing::VirtualHud;
//!
//! # fn get_port() -> Box<dyn HudPort> { Box::new(VirtualHud::new()) }
//! # fn try_main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! #
//! // Assume we have a helper function to obtain a HudPort.
//! let mut port: Box<dyn HudPort> = get_port();
//!
//! // Send a raw command to show 7:05 on the clock.
//! let command = Command::SetTime { hour: 7, minute: 5 };
//! for frame in command.frames() {
//!     port.send_frame(&frame)?;
//! }
//!
//! // Frames can also be built directly from payload bytes.
//! let payload = Payload::try_new(vec![0x04, 0x00, 0x00, 0x05])?;
//! port.send_frame(&Frame::new(payload))?;
//! #
//! # Ok(()) }
//! # fn main() { try_main().unwrap(); }
//! ```
//!
//! [`navhud`]: https://docs.rs/navhud
//! [`HudPort`]: trait.HudPort.html
#![doc(html_root_url = "https://docs.rs/navhud-core/0.1.0")]
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

mod bitmap;
mod command;
mod direction;
mod distance;
mod fingerprint;
mod frame;
mod hud_port;
mod rate;

pub use self::bitmap::{green_alpha, Bitmap, BitmapError};
pub use self::command::{to_digit, Command, Distance, UnitCode};
pub use self::direction::{classify, Angle, Direction, MAX_MATCH_DISTANCE};
pub use self::distance::{format_distance, parse_distance};
pub use self::fingerprint::{Fingerprint, BINARY_THRESHOLD, BRIGHT_THRESHOLD, CANVAS_SIDE, CELL_COUNT, GRID_LEN};
pub use self::frame::{Frame, FrameError, Payload, MAX_PAYLOAD_LEN};
pub use self::hud_port::HudPort;
pub use self::rate::RateLimiter;
