use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use thiserror::Error;

use crate::core::{format_distance, Angle, Command, Distance, HudPort, RateLimiter, UnitCode};
use crate::state::NavSnapshot;

/// Errors related to [`Hud`]s.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HudError {
    /// The port failed to deliver a frame.
    #[error("Port failed to deliver frame")]
    Port {
        /// The underlying port error.
        #[from]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// A navigation display reached through an associated port.
///
/// Basic operation consists of calling the field setters ([`set_time`], [`set_direction`],
/// and so on) as the underlying data changes, or handing a whole [`NavSnapshot`] to
/// [`refresh`]. The display is "dumb" in that it keeps no state of its own beyond the
/// last value written to each field; all display logic is remotely controlled.
///
/// Outgoing frames are budgeted to 6 per second; frames beyond the budget are silently
/// dropped (and logged via the [`log`] crate), since stale HUD fields are preferable to
/// a garbled display.
///
/// # Examples
///
/// ```no_run
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use navhud::{Angle, Hud, SerialHud};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// #
/// // Set up the port. Because the port can be shared with
/// // other senders, it must be wrapped in an Rc<RefCell>.
/// let port = serial::open("/dev/rfcomm0")?;
/// let port = Rc::new(RefCell::new(SerialHud::new(port)?));
///
/// let mut hud = Hud::new(port);
///
/// // Fields are updated independently.
/// hud.set_time(7, 5)?;
/// hud.set_direction(Angle::Left)?;
/// hud.set_speed(57, true)?;
/// #
/// # Ok(()) }
/// ```
///
/// [`set_time`]: #method.set_time
/// [`set_direction`]: #method.set_direction
/// [`refresh`]: #method.refresh
/// [`NavSnapshot`]: struct.NavSnapshot.html
/// [`log`]: https://crates.io/crates/log
#[derive(Debug)]
pub struct Hud {
    port: Rc<RefCell<dyn HudPort>>,
    limiter: RateLimiter,
}

impl Hud {
    /// Creates a new `Hud` that will control an actual display through the provided [`HudPort`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::cell::RefCell;
    /// # use std::rc::Rc;
    /// # use navhud::Hud;
    /// # use navhud_testing::VirtualHud;
    /// #
    /// let port = Rc::new(RefCell::new(VirtualHud::new()));
    /// let hud = Hud::new(port);
    /// ```
    ///
    /// [`HudPort`]: trait.HudPort.html
    pub fn new(port: Rc<RefCell<dyn HudPort>>) -> Self {
        Hud {
            port,
            limiter: RateLimiter::default(),
        }
    }

    /// Shows a time of day on the clock field.
    ///
    /// # Errors
    ///
    /// Returns [`HudError::Port`] if the underlying port failed to deliver a frame.
    ///
    /// [`HudError::Port`]: enum.HudError.html#variant.Port
    pub fn set_time(&mut self, hour: u8, minute: u8) -> Result<(), HudError> {
        self.send(&Command::SetTime { hour, minute })
    }

    /// Shows a turn arrow.
    ///
    /// # Errors
    ///
    /// Returns [`HudError::Port`] if the underlying port failed to deliver a frame.
    ///
    /// [`HudError::Port`]: enum.HudError.html#variant.Port
    pub fn set_direction(&mut self, angle: Angle) -> Result<(), HudError> {
        self.send(&Command::SetDirection { angle })
    }

    /// Blanks the turn arrow field.
    ///
    /// # Errors
    ///
    /// Returns [`HudError::Port`] if the underlying port failed to deliver a frame.
    ///
    /// [`HudError::Port`]: enum.HudError.html#variant.Port
    pub fn clear_direction(&mut self) -> Result<(), HudError> {
        self.send(&Command::ClearDirection)
    }

    /// Shows a speed on the speed field, optionally with the speedometer icon.
    ///
    /// # Errors
    ///
    /// Returns [`HudError::Port`] if the underlying port failed to deliver a frame.
    ///
    /// [`HudError::Port`]: enum.HudError.html#variant.Port
    pub fn set_speed(&mut self, speed: u16, show_icon: bool) -> Result<(), HudError> {
        self.send(&Command::SetSpeed { speed, show_icon })
    }

    /// Shows a speed alongside a speed limit, with the speeding and camera warning icons.
    ///
    /// Pass `None` for `limit` to blank the limit portion of the field.
    ///
    /// # Errors
    ///
    /// Returns [`HudError::Port`] if the underlying port failed to deliver a frame.
    ///
    /// [`HudError::Port`]: enum.HudError.html#variant.Port
    pub fn set_speed_with_limit(
        &mut self,
        speed: u16,
        limit: Option<u16>,
        speeding_icon: bool,
        camera_icon: bool,
    ) -> Result<(), HudError> {
        self.send(&Command::SetSpeedWithLimit {
            speed,
            limit,
            speeding_icon,
            camera_icon,
        })
    }

    /// Blanks the speed field.
    ///
    /// # Errors
    ///
    /// Returns [`HudError::Port`] if the underlying port failed to deliver a frame.
    ///
    /// [`HudError::Port`]: enum.HudError.html#variant.Port
    pub fn clear_speed(&mut self) -> Result<(), HudError> {
        self.send(&Command::ClearSpeed)
    }

    /// Shows a distance to the next turn.
    ///
    /// Most callers will want [`set_distance_metres`] instead, which picks the value and
    /// unit the way the stock companion app does.
    ///
    /// # Errors
    ///
    /// Returns [`HudError::Port`] if the underlying port failed to deliver a frame.
    ///
    /// [`set_distance_metres`]: #method.set_distance_metres
    /// [`HudError::Port`]: enum.HudError.html#variant.Port
    pub fn set_distance(&mut self, value: Distance, unit: UnitCode) -> Result<(), HudError> {
        self.send(&Command::SetDistance { value, unit })
    }

    /// Shows a distance to the next turn, given in metres.
    ///
    /// Distances under a kilometre are shown in metres; above that, in kilometres
    /// with one decimal place while it fits.
    ///
    /// # Errors
    ///
    /// Returns [`HudError::Port`] if the underlying port failed to deliver a frame.
    ///
    /// [`HudError::Port`]: enum.HudError.html#variant.Port
    pub fn set_distance_metres(&mut self, metres: u32) -> Result<(), HudError> {
        let (value, unit) = format_distance(metres);
        self.set_distance(value, unit)
    }

    /// Blanks the distance field.
    ///
    /// # Errors
    ///
    /// Returns [`HudError::Port`] if the underlying port failed to deliver a frame.
    ///
    /// [`HudError::Port`]: enum.HudError.html#variant.Port
    pub fn clear_distance(&mut self) -> Result<(), HudError> {
        self.send(&Command::ClearDistance)
    }

    /// Blanks the entire display.
    ///
    /// # Errors
    ///
    /// Returns [`HudError::Port`] if the underlying port failed to deliver a frame.
    ///
    /// [`HudError::Port`]: enum.HudError.html#variant.Port
    pub fn clear(&mut self) -> Result<(), HudError> {
        self.send(&Command::Clear)
    }

    /// Sets the display brightness. Levels run 0–10 (0 is automatic); higher values are clamped.
    ///
    /// # Errors
    ///
    /// Returns [`HudError::Port`] if the underlying port failed to deliver a frame.
    ///
    /// [`HudError::Port`]: enum.HudError.html#variant.Port
    pub fn set_brightness(&mut self, level: u8) -> Result<(), HudError> {
        self.send(&Command::SetBrightness { level })
    }

    /// Pushes every field of a [`NavSnapshot`] to the display.
    ///
    /// Fields with no data in the snapshot are blanked, so the display always reflects
    /// the snapshot exactly. Call this whenever the snapshot changes; the frame budget
    /// takes care of pacing.
    ///
    /// # Errors
    ///
    /// Returns [`HudError::Port`] if the underlying port failed to deliver a frame.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::cell::RefCell;
    /// # use std::rc::Rc;
    /// use navhud::{Angle, Hud, NavSnapshot};
    /// # use navhud_testing::VirtualHud;
    ///
    /// # fn main() -> Result<(), navhud::HudError> {
    /// #
    /// # let port = Rc::new(RefCell::new(VirtualHud::new()));
    /// let mut hud = Hud::new(port);
    ///
    /// let snapshot = NavSnapshot {
    ///     navigating: true,
    ///     direction: Some(Angle::Left),
    ///     distance_to_turn_metres: Some(400),
    ///     ..NavSnapshot::default()
    /// };
    /// hud.refresh(&snapshot)?;
    /// #
    /// # Ok(()) }
    /// ```
    ///
    /// [`NavSnapshot`]: struct.NavSnapshot.html
    /// [`HudError::Port`]: enum.HudError.html#variant.Port
    pub fn refresh(&mut self, snapshot: &NavSnapshot) -> Result<(), HudError> {
        if snapshot.navigating {
            match snapshot.direction {
                Some(angle) => self.set_direction(angle)?,
                None => self.clear_direction()?,
            }
            match snapshot.distance_to_turn_metres {
                Some(metres) => self.set_distance_metres(metres)?,
                None => self.clear_distance()?,
            }
        } else {
            self.clear_direction()?;
            self.clear_distance()?;
        }

        if let Some((hour, minute)) = snapshot.time {
            self.set_time(hour, minute)?;
        }

        if snapshot.show_speed {
            self.set_speed_with_limit(snapshot.speed, snapshot.speed_limit, snapshot.speeding, snapshot.camera)?;
        } else {
            self.clear_speed()?;
        }

        Ok(())
    }

    /// Borrows the port mutably and sends each of the command's frames, subject to the
    /// frame budget.
    ///
    /// Enforces that only leaf calls borrow the port to avoid runtime errors.
    fn send(&mut self, command: &Command) -> Result<(), HudError> {
        for frame in command.frames() {
            if self.limiter.attempt() {
                let mut port = self.port.borrow_mut();
                port.send_frame(&frame)?;
            } else {
                debug!("Frame budget exhausted; dropping frame: {}", frame);
            }
        }
        Ok(())
    }
}
