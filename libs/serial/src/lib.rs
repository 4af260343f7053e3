//! Tools for communicating with glanceable navigation displays over serial.
//!
//! For the basic task of driving a display, you likely want to use the high-level API
//! in the [`navhud`] crate instead.
//!
//! However, you can use the [`configure_port`] function to configure a serial port appropriately
//! if you're doing custom lower-level communication.
//!
//! Intended only for hobbyist and educational purposes. Not affiliated with Garmin in any way.
//!
//! # Examples
//!
//! ```no_run
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! #
//! let mut port = serial::open("/dev/rfcomm0")?;
//! navhud_serial::configure_port(&mut port, Duration::from_secs(5))?;
//! // Now ready for communication with a display (8N1 9600 baud).
//! #
//! # Ok(()) }
//! ```
//!
//! [`navhud`]: https://docs.rs/navhud
//! [`configure_port`]: fn.configure_port.html
#![doc(html_root_url = "https://docs.rs/navhud-serial/0.1.0")]
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

mod errors;
mod serial_hud;
mod serial_port;

pub use self::errors::SerialHudError;
pub use self::serial_hud::SerialHud;
pub use self::serial_port::configure_port;
