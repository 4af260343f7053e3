use std::error::Error;

use log::debug;

use navhud_core::{Frame, HudPort};

/// Mock implementation of a navigation display.
///
/// `VirtualHud` accepts frames like real hardware would, re-parses their wire bytes to
/// verify they are well-formed, and records them for later inspection. Useful for testing
/// code that drives a [`HudPort`] without a display on hand.
///
/// Frames are logged using the [`log`] crate for debugging purposes. Consuming binaries
/// typically use the [`env_logger`] crate and can be run with the `RUST_LOG=debug` environment
/// variable to watch the frames go by.
///
/// # Examples
///
/// ```
/// use navhud_core::{Command, HudPort};
/// use navhud_testing::VirtualHud;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
/// #
/// let mut hud = VirtualHud::new();
/// for frame in (Command::SetBrightness { level: 5 }).frames() {
///     hud.send_frame(&frame)?;
/// }
/// assert_eq!(1, hud.frames().len());
/// assert_eq!(&[0x04, 0x00, 0x00, 0x05], hud.frames()[0].payload().as_ref());
/// #
/// # Ok(()) }
/// ```
///
/// [`HudPort`]: https://docs.rs/navhud-core
/// [`log`]: https://crates.io/crates/log
/// [`env_logger`]: https://crates.io/crates/env_logger
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct VirtualHud {
    frames: Vec<Frame<'static>>,
}

impl VirtualHud {
    /// Creates a new `VirtualHud` with no received frames.
    pub fn new() -> Self {
        VirtualHud::default()
    }

    /// Returns the frames received so far, oldest first.
    pub fn frames(&self) -> &[Frame<'static>] {
        &self.frames
    }

    /// Forgets all received frames.
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl HudPort for VirtualHud {
    /// Handles a frame by validating its wire encoding and recording it.
    fn send_frame(&mut self, frame: &Frame<'_>) -> Result<(), Box<dyn Error + Send + Sync>> {
        // Round-trip through the wire encoding so malformed frames fail here
        // the same way real hardware would reject them.
        let received = Frame::from_bytes(&frame.to_bytes())?;
        debug!("Vhud frame: {}", received);
        self.frames.push(received);
        Ok(())
    }
}
