/*!
    Clocks for pacing frame delivery.
*/

use std::time::{Duration, Instant};

use parking_lot::Mutex;

/**
    A source of playback position.

    Players compare a frame's timestamp with the clock to decide whether it
    is due yet.
*/
pub trait Clock: Send + Sync {
    fn position(&self) -> Duration;

    /// Jump to a position, for example after a seek.
    fn reset_to(&self, position: Duration);
}

struct WallClockState {
    /// Position at `anchor`.
    base: Duration,
    anchor: Instant,
    /// Frozen position while paused.
    paused: Option<Duration>,
}

impl WallClockState {
    fn position(&self) -> Duration {
        self.paused.unwrap_or_else(|| self.base + self.anchor.elapsed())
    }
}

/**
    Pausable clock that follows wall time.
*/
pub struct WallClock {
    state: Mutex<WallClockState>,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(WallClockState {
                base: Duration::ZERO,
                anchor: Instant::now(),
                paused: None,
            }),
        }
    }

    /**
        Freeze the position. Does nothing if already paused.
    */
    pub fn pause(&self) {
        let mut state = self.state.lock();
        if state.paused.is_none() {
            state.paused = Some(state.position());
        }
    }

    /**
        Continue from the frozen position. Does nothing if not paused.
    */
    pub fn resume(&self) {
        let mut state = self.state.lock();
        if let Some(position) = state.paused.take() {
            state.base = position;
            state.anchor = Instant::now();
        }
    }

    pub fn is_paused(&self) -> bool {
        self.state.lock().paused.is_some()
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn position(&self) -> Duration {
        self.state.lock().position()
    }

    /// Also clears a pause.
    fn reset_to(&self, position: Duration) {
        let mut state = self.state.lock();
        state.base = position;
        state.anchor = Instant::now();
        state.paused = None;
    }
}

static_assertions::assert_impl_all!(WallClock: Send, Sync, Clock);
