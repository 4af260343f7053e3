use std::sync::{Mutex, TryLockError};
use std::time::{Duration, Instant};

use log::debug;

use crate::core::{classify, Bitmap, BitmapError, Direction, Fingerprint};

/// Minimum time between completed recognition passes.
const COOLDOWN: Duration = Duration::from_millis(1000);

/// The outcome of one recognition attempt.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Recognition {
    /// The icon matched a known turn direction.
    Direction(Direction),

    /// The icon resembled no known turn direction.
    NoMatch,

    /// Another recognition is in flight, or one completed less than a second ago.
    Busy,
}

/// Classifies captured turn-icon bitmaps into [`Direction`]s, at most once per second.
///
/// Icon sources fire much faster than the display can usefully change (every animation
/// frame of a notification, for instance), so the recognizer throttles itself: while a
/// pass is running, or within a second of the last completed pass, further attempts
/// return [`Recognition::Busy`] without touching the bitmap.
///
/// # Examples
///
/// ```
/// use navhud::{ArrowRecognizer, Bitmap, Recognition};
///
/// # fn main() -> Result<(), navhud::BitmapError> {
/// #
/// let recognizer = ArrowRecognizer::new();
///
/// // A solid white square matches nothing.
/// let mut icon = Bitmap::new(132, 132);
/// for y in 0..132 {
///     for x in 0..132 {
///         icon.set_pixel(x, y, 0xFFFF_FFFF);
///     }
/// }
/// assert_eq!(Recognition::NoMatch, recognizer.recognize(&icon)?);
///
/// // Immediately retrying hits the cooldown.
/// assert_eq!(Recognition::Busy, recognizer.recognize(&icon)?);
/// #
/// # Ok(()) }
/// ```
///
/// [`Direction`]: enum.Direction.html
/// [`Recognition::Busy`]: enum.Recognition.html#variant.Busy
#[derive(Debug, Default)]
pub struct ArrowRecognizer {
    last_completed: Mutex<Option<Instant>>,
}

impl ArrowRecognizer {
    /// Creates a new `ArrowRecognizer` with no cooldown pending.
    pub fn new() -> Self {
        ArrowRecognizer::default()
    }

    /// Tries to recognize the turn icon in `bitmap`.
    ///
    /// # Errors
    ///
    /// Returns an error of kind [`BitmapError::NonSquareImage`] if the bitmap is not
    /// square. Errors do not start the cooldown.
    ///
    /// [`BitmapError::NonSquareImage`]: enum.BitmapError.html#variant.NonSquareImage
    pub fn recognize(&self, bitmap: &Bitmap) -> Result<Recognition, BitmapError> {
        let mut last_completed = match self.last_completed.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => return Ok(Recognition::Busy),
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
        };

        if let Some(completed) = *last_completed {
            if completed.elapsed() < COOLDOWN {
                return Ok(Recognition::Busy);
            }
        }

        let fingerprint = Fingerprint::extract(bitmap)?;
        *last_completed = Some(Instant::now());

        debug!("Icon fingerprint:\n{}", fingerprint);
        match classify(&fingerprint) {
            Some(direction) => Ok(Recognition::Direction(direction)),
            None => Ok(Recognition::NoMatch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CANVAS_SIDE, GRID_LEN};

    // Paints the sample points of a template fingerprint onto a canvas-sized bitmap.
    fn icon_for(template: u64) -> Bitmap {
        let stride = CANVAS_SIDE / GRID_LEN;
        let mut bitmap = Bitmap::new(CANVAS_SIDE, CANVAS_SIDE);
        for row in 0..GRID_LEN {
            for col in 0..GRID_LEN {
                if template >> (row * GRID_LEN + col) & 1 == 1 {
                    bitmap.set_pixel(col * stride, row * stride, 0xFFFF_FFFF);
                }
            }
        }
        bitmap
    }

    #[test]
    fn recognizes_a_turn_icon() {
        let recognizer = ArrowRecognizer::new();
        let result = recognizer.recognize(&icon_for(0x40C0_C0C0_C87C_0800)).unwrap();
        assert_eq!(Recognition::Direction(Direction::Left), result);
    }

    #[test]
    fn unknown_icon_is_no_match() {
        let recognizer = ArrowRecognizer::new();
        let result = recognizer.recognize(&icon_for(0xA5A5_A5A5_A5A5_A5A5)).unwrap();
        assert_eq!(Recognition::NoMatch, result);
    }

    #[test]
    fn back_to_back_attempts_hit_the_cooldown() {
        let recognizer = ArrowRecognizer::new();
        let icon = icon_for(0x1010_1010_1038_1000);

        let first = recognizer.recognize(&icon).unwrap();
        assert_eq!(Recognition::Direction(Direction::Straight), first);
        assert_eq!(Recognition::Busy, recognizer.recognize(&icon).unwrap());
    }

    #[test]
    fn errors_do_not_start_the_cooldown() {
        let recognizer = ArrowRecognizer::new();

        let result = recognizer.recognize(&Bitmap::new(10, 20));
        assert!(result.is_err());

        // A valid attempt right after still runs.
        let result = recognizer.recognize(&icon_for(0x1010_1010_1038_1000)).unwrap();
        assert_eq!(Recognition::Direction(Direction::Straight), result);
    }
}
