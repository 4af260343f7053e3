use std::error::Error;
use std::time::Duration;

use log::debug;
use serial_core::prelude::*;

use navhud_core::{Frame, HudPort};

use crate::errors::SerialHudError;
use crate::serial_port;

/// An implementation of `HudPort` that delivers frames to a display over serial.
///
/// Outgoing frames are logged using the [`log`] crate for debugging purposes. Consuming binaries
/// typically use the [`env_logger`] crate and can be run with the `RUST_LOG=debug` environment
/// variable to watch the frames go by.
///
/// # Examples
///
/// ```no_run
/// use navhud_serial::SerialHud;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// #
/// let port = serial::open("/dev/rfcomm0")?;
/// let hud = SerialHud::new(port)?;
/// // Can now hand the port to a Hud.
/// #
/// # Ok(()) }
/// ```
///
/// [`log`]: https://crates.io/crates/log
/// [`env_logger`]: https://crates.io/crates/env_logger
#[derive(Debug, Eq, PartialEq, Hash)]
pub struct SerialHud<P: SerialPort> {
    port: P,
}

impl<P: SerialPort> SerialHud<P> {
    /// Creates a new `SerialHud` that communicates over the specified serial port.
    ///
    /// The port is configured for the display (8N1 9600 baud) with a 5-second timeout.
    ///
    /// # Errors
    ///
    /// Returns an error of kind [`SerialHudError::Configuration`] if the serial port
    /// cannot be configured.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use navhud_serial::SerialHud;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// #
    /// let port = serial::open("/dev/rfcomm0")?;
    /// let hud = SerialHud::new(port)?;
    /// #
    /// # Ok(()) }
    /// ```
    ///
    /// [`SerialHudError::Configuration`]: enum.SerialHudError.html#variant.Configuration
    pub fn new(mut port: P) -> Result<Self, SerialHudError> {
        serial_port::configure_port(&mut port, Duration::from_secs(5))?;
        Ok(SerialHud { port })
    }

    /// Returns a reference to the underlying serial port.
    pub fn port(&self) -> &P {
        &self.port
    }
}

impl<P: SerialPort> HudPort for SerialHud<P> {
    /// Delivers a frame by writing its wire bytes to the serial port.
    fn send_frame(&mut self, frame: &Frame<'_>) -> Result<(), Box<dyn Error + Send + Sync>> {
        debug!("Sending frame: {}", frame);
        frame.write(&mut self.port)?;
        Ok(())
    }
}
