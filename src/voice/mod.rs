pub mod stt;
pub mod tts;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Start/stop state shared between a voice session's owner and its worker
/// thread. A session is either idle or active; an active session may be
/// flagged cancelled, after which the worker must not deliver a result.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    active: Arc<AtomicBool>,
    cancelled: Arc<AtomicBool>,
}

impl SessionState {
    /// Transition idle → active. Returns false when a session is already
    /// running; the caller must not start another.
    pub fn try_begin(&self) -> bool {
        if self
            .active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return false;
        }
        self.cancelled.store(false, Ordering::SeqCst);
        true
    }

    /// Worker side: the session ended (result, error, or natural end).
    pub fn finish(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    /// Flag the running session as cancelled. Returns whether a session was
    /// actually flagged; a no-op when idle.
    pub fn cancel(&self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.cancelled.store(true, Ordering::SeqCst);
        true
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begins_only_from_idle() {
        let state = SessionState::default();
        assert!(!state.is_active());
        assert!(state.try_begin());
        assert!(state.is_active());
        assert!(!state.try_begin());
    }

    #[test]
    fn cancel_when_idle_is_a_noop() {
        let state = SessionState::default();
        assert!(!state.cancel());
        assert!(!state.is_active());
        assert!(!state.is_cancelled());
    }

    #[test]
    fn cancel_flags_a_running_session() {
        let state = SessionState::default();
        assert!(state.try_begin());
        assert!(state.cancel());
        assert!(state.is_cancelled());

        state.finish();
        assert!(!state.is_active());
    }

    #[test]
    fn begin_clears_a_previous_cancellation() {
        let state = SessionState::default();
        state.try_begin();
        state.cancel();
        state.finish();

        assert!(state.try_begin());
        assert!(!state.is_cancelled());
    }
}
