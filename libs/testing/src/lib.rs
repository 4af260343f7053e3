//! Tools for testing and debugging navigation display communications.
//!
//! This crate isn't directly related to driving real displays, but provides [`VirtualHud`],
//! a mock display that validates and records frames, which is useful for testing code
//! that uses the [`navhud`] crate without hardware on hand.
//!
//! Intended only for hobbyist and educational purposes. Not affiliated with Garmin in any way.
//!
//! # Examples
//!
//! ```
//! use navhud_core::{Command, HudPort};
//! use navhud_testing::VirtualHud;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! #
//! let mut hud = VirtualHud::new();
//!
//! // Send some frames as if we were talking to real hardware.
//! for frame in Command::Clear.frames() {
//!     hud.send_frame(&frame)?;
//! }
//!
//! // Everything that was sent is available for inspection.
//! assert_eq!(3, hud.frames().len());
//! #
//! # Ok(()) }
//! ```
//!
//! [`VirtualHud`]: struct.VirtualHud.html
//! [`navhud`]: https://docs.rs/navhud
#![doc(html_root_url = "https://docs.rs/navhud-testing/0.1.0")]
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

mod virtual_hud;

pub use self::virtual_hud::VirtualHud;
