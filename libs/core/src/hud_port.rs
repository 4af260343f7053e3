use std::error::Error;
use std::fmt;

use crate::frame::Frame;

/// A transport capable of delivering frames to a display.
///
/// Implementations own the physical link (a serial port over a Bluetooth
/// radio, typically) and deliver each frame as a single write. The high-level
/// [`Hud`] type drives any `HudPort` through a trait object, so test doubles
/// can stand in for real hardware.
///
/// # Examples
///
/// Using `HudPort` as a trait object to allow choosing the transport at runtime:
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use navhud::{Hud, HudPort, SerialHud};
/// use navhud_testing::VirtualHud;
///
/// # fn use_serial() -> bool { false }
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// #
/// let port: Rc<RefCell<dyn HudPort>> = if use_serial() {
///     let port = serial::open("/dev/rfcomm0")?;
///     Rc::new(RefCell::new(SerialHud::new(port)?))
/// } else {
///     Rc::new(RefCell::new(VirtualHud::new()))
/// };
///
/// let mut hud = Hud::new(port);
/// hud.set_brightness(5)?;
/// #
/// # Ok(()) }
/// ```
///
/// Implementing a custom port:
///
/// ```
/// use navhud_core::{Frame, HudPort};
///
/// struct LoggingPort {}
///
/// impl HudPort for LoggingPort {
///     fn send_frame(&mut self, frame: &Frame<'_>)
///         -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///         println!("Sent {}", frame);
///         Ok(()) // Deliver to the real transport here...
///     }
/// }
/// ```
///
/// [`Hud`]: https://docs.rs/navhud
pub trait HudPort {
    /// Delivers a single frame to the display.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame could not be written to the underlying
    /// transport.
    fn send_frame(&mut self, frame: &Frame<'_>) -> Result<(), Box<dyn Error + Send + Sync>>;
}

impl fmt::Debug for dyn HudPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<HudPort trait>")
    }
}
