/*!
    Thread-safe playback control.
*/

use std::sync::Arc;

use parking_lot::Mutex;

/**
    Playback status
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Playing,
    Paused,
    /// A seek has been requested and not yet applied.
    Seeking,
    /// The stream ran out and looping is off.
    Ended,
    /// Stopped by the caller. Final until the player is reopened.
    Stopped,
}

#[derive(Debug)]
struct ControlState {
    status: Status,
    seek_target: Option<i64>,
}

/**
    Cloneable handle for steering a running player from any thread.

    Every clone refers to the same state. The player polls it between
    packets, so requests take effect at the next packet boundary.
*/
#[derive(Clone, Debug)]
pub struct PlaybackControl {
    state: Arc<Mutex<ControlState>>,
}

impl PlaybackControl {
    pub(crate) fn new(status: Status) -> Self {
        Self {
            state: Arc::new(Mutex::new(ControlState {
                status,
                seek_target: None,
            })),
        }
    }

    /**
        Start or continue playback.
    */
    pub fn play(&self) {
        self.transition(|_| Some(Status::Playing));
    }

    /**
        Pause playback. Decoding halts until [`resume`](Self::resume) or
        [`play`](Self::play) is called.
    */
    pub fn pause(&self) {
        self.transition(|_| Some(Status::Paused));
    }

    /**
        Resume playback if it is paused.
    */
    pub fn resume(&self) {
        self.transition(|status| (status == Status::Paused).then_some(Status::Playing));
    }

    /**
        Request a seek of the video stream.

        The timestamp is in the video stream's time base. Playback continues
        from the target once the seek has been applied.
    */
    pub fn seek(&self, timestamp: i64) {
        let mut state = self.state.lock();
        if state.status != Status::Stopped {
            state.status = Status::Seeking;
            state.seek_target = Some(timestamp);
        }
    }

    /**
        Seek back to the start.
    */
    pub fn reset(&self) {
        self.seek(0);
    }

    /**
        Stop playback for good. The running player returns at the next
        packet boundary.
    */
    pub fn stop(&self) {
        let mut state = self.state.lock();
        state.status = Status::Stopped;
        state.seek_target = None;
    }

    /**
        Current status.
    */
    pub fn status(&self) -> Status {
        self.state.lock().status
    }

    /**
        Pending seek target, if a seek has been requested.
    */
    pub fn seek_target(&self) -> Option<i64> {
        self.state.lock().seek_target
    }

    /**
        Take the pending seek target and switch to playing.
    */
    pub(crate) fn take_seek(&self) -> Option<i64> {
        let mut state = self.state.lock();
        if state.status != Status::Seeking {
            return None;
        }
        state.status = Status::Playing;
        state.seek_target.take()
    }

    /**
        Mark the stream as ended unless the caller already stopped it.
    */
    pub(crate) fn finish(&self) {
        self.transition(|status| (status != Status::Seeking).then_some(Status::Ended));
    }

    fn transition(&self, next: impl FnOnce(Status) -> Option<Status>) {
        let mut state = self.state.lock();
        if state.status == Status::Stopped {
            return;
        }
        if let Some(status) = next(state.status) {
            state.status = status;
        }
    }
}

// The control handle is the only part of a player shared across threads
static_assertions::assert_impl_all!(PlaybackControl: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_pause_resume() {
        let control = PlaybackControl::new(Status::Paused);
        control.resume();
        assert_eq!(control.status(), Status::Playing);

        control.pause();
        assert_eq!(control.status(), Status::Paused);

        control.play();
        assert_eq!(control.status(), Status::Playing);
    }

    #[test]
    fn resume_only_leaves_pause() {
        let control = PlaybackControl::new(Status::Ended);
        control.resume();
        assert_eq!(control.status(), Status::Ended);
    }

    #[test]
    fn seek_is_taken_once() {
        let control = PlaybackControl::new(Status::Playing);
        control.seek(42);
        assert_eq!(control.status(), Status::Seeking);
        assert_eq!(control.seek_target(), Some(42));

        assert_eq!(control.take_seek(), Some(42));
        assert_eq!(control.status(), Status::Playing);
        assert_eq!(control.seek_target(), None);
        assert_eq!(control.take_seek(), None);
    }

    #[test]
    fn reset_seeks_to_start() {
        let control = PlaybackControl::new(Status::Ended);
        control.reset();
        assert_eq!(control.status(), Status::Seeking);
        assert_eq!(control.seek_target(), Some(0));
    }

    #[test]
    fn stop_is_final() {
        let control = PlaybackControl::new(Status::Playing);
        control.seek(3);
        control.stop();
        assert_eq!(control.seek_target(), None);

        control.play();
        control.seek(1);
        control.finish();
        assert_eq!(control.status(), Status::Stopped);
    }

    #[test]
    fn finish_keeps_a_pending_seek() {
        let control = PlaybackControl::new(Status::Playing);
        control.seek(0);
        control.finish();
        assert_eq!(control.status(), Status::Seeking);
    }

    #[test]
    fn clones_share_state() {
        let control = PlaybackControl::new(Status::Playing);
        let other = control.clone();
        std::thread::spawn(move || other.pause())
            .join()
            .expect("thread");
        assert_eq!(control.status(), Status::Paused);
    }
}
