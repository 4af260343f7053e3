use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::core::Angle;

/// Everything the display can show, gathered from the various data sources.
///
/// A snapshot is a plain value: build one (or copy the current one out of a
/// [`NavState`]) and hand it to [`Hud::refresh`] to push it to the display.
/// `None` fields are blanked.
///
/// [`NavState`]: struct.NavState.html
/// [`Hud::refresh`]: struct.Hud.html#method.refresh
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct NavSnapshot {
    /// Current speed in the display's unit.
    pub speed: u16,

    /// Posted speed limit, if known.
    pub speed_limit: Option<u16>,

    /// Whether the speeding warning icon should show.
    pub speeding: bool,

    /// Whether the speed camera icon should show.
    pub camera: bool,

    /// Whether the speed field should show at all.
    pub show_speed: bool,

    /// Time of day for the clock field, as `(hour, minute)`.
    pub time: Option<(u8, u8)>,

    /// Whether turn-by-turn guidance is active.
    pub navigating: bool,

    /// Distance to the next turn in metres, if known.
    pub distance_to_turn_metres: Option<u32>,

    /// Arrow to show for the next turn, if known.
    pub direction: Option<Angle>,
}

/// Shared, thread-safe holder for the current [`NavSnapshot`].
///
/// Data arrives from several places at once (a notification listener, a location
/// source, a clock tick), while a single sender loop pushes snapshots to the display.
/// `NavState` mediates: writers call [`update`], the sender calls [`subscribe`] once
/// and then [`snapshot`] whenever its channel signals a change.
///
/// # Examples
///
/// ```
/// use navhud::NavState;
///
/// let state = NavState::new();
/// let changes = state.subscribe();
///
/// state.update(|snapshot| {
///     snapshot.speed = 57;
///     snapshot.show_speed = true;
/// });
///
/// changes.recv().unwrap();
/// assert_eq!(57, state.snapshot().speed);
/// ```
///
/// [`NavSnapshot`]: struct.NavSnapshot.html
/// [`update`]: #method.update
/// [`subscribe`]: #method.subscribe
/// [`snapshot`]: #method.snapshot
#[derive(Debug, Default)]
pub struct NavState {
    snapshot: Mutex<NavSnapshot>,
    subscribers: Mutex<Vec<Sender<()>>>,
}

impl NavState {
    /// Creates a new `NavState` holding a default (all-blank) snapshot.
    pub fn new() -> Self {
        NavState::default()
    }

    /// Returns a copy of the current snapshot.
    pub fn snapshot(&self) -> NavSnapshot {
        *lock_ignoring_poison(&self.snapshot)
    }

    /// Applies a change to the snapshot and notifies subscribers.
    ///
    /// The closure runs under the snapshot lock, so keep it short.
    pub fn update<F>(&self, apply: F)
    where
        F: FnOnce(&mut NavSnapshot),
    {
        {
            let mut snapshot = lock_ignoring_poison(&self.snapshot);
            apply(&mut snapshot);
        }
        self.notify();
    }

    /// Clears all navigation fields, typically when guidance ends.
    ///
    /// The speed and clock fields are untouched; they have their own data sources.
    pub fn reset_navigation(&self) {
        self.update(|snapshot| {
            snapshot.navigating = false;
            snapshot.direction = None;
            snapshot.distance_to_turn_metres = None;
        });
    }

    /// Returns a channel that receives a unit message after every [`update`].
    ///
    /// Dropped receivers are cleaned up on the next notification.
    ///
    /// [`update`]: #method.update
    pub fn subscribe(&self) -> Receiver<()> {
        let (sender, receiver) = channel();
        lock_ignoring_poison(&self.subscribers).push(sender);
        receiver
    }

    fn notify(&self) {
        lock_ignoring_poison(&self.subscribers).retain(|subscriber| subscriber.send(()).is_ok());
    }
}

/// Locks a mutex, recovering the data if a previous holder panicked.
///
/// Snapshots and subscriber lists stay internally consistent even if a writer
/// panicked mid-update, so the poison flag carries no extra information here.
fn lock_ignoring_poison<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
