//! The melody sequencer's one asynchronous boundary: a single cancellable
//! one-shot timer.
//!
//! The sequencer owns exactly one [`StepTimer`] handle, re-arms it
//! synchronously after each step, and the host pumps it through
//! `ToneEngine::poll`. Cancellation is a
//! plain state change on the same thread, so a cancelled deadline can never
//! race a new one.

use std::time::{Duration, Instant};

/// One cancellable one-shot deadline. Re-arming replaces any pending
/// deadline; `fired` reports an elapsed deadline exactly once.
pub trait StepTimer {
    fn arm(&mut self, delay: Duration);

    fn cancel(&mut self);

    /// True exactly once after the armed delay has elapsed.
    fn fired(&mut self) -> bool;
}

/// Wall-clock timer for real hosts. The owning event loop is expected to call
/// `fired` (via `ToneEngine::poll`) at least every few milliseconds.
#[derive(Debug, Default)]
pub struct DeadlineTimer {
    deadline: Option<Instant>,
}

impl DeadlineTimer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StepTimer for DeadlineTimer {
    fn arm(&mut self, delay: Duration) {
        self.deadline = Some(Instant::now() + delay);
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }

    fn fired(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Test double driven by hand.
///
/// Records every armed delay and cancellation. `force_fire` marks the timer
/// as elapsed regardless of pending state, which models a callback that was
/// already in flight when the sequencer cancelled, the stale-fire race the
/// engine must shrug off.
#[derive(Debug, Default)]
pub struct ManualTimer {
    armed: Vec<Duration>,
    pending: bool,
    fire_requested: bool,
    cancellations: usize,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// All delays ever armed, in order.
    pub fn armed(&self) -> &[Duration] {
        &self.armed
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn cancellations(&self) -> usize {
        self.cancellations
    }

    /// Simulate the armed deadline elapsing (or a stale callback firing).
    pub fn force_fire(&mut self) {
        self.fire_requested = true;
    }
}

impl StepTimer for ManualTimer {
    fn arm(&mut self, delay: Duration) {
        self.armed.push(delay);
        self.pending = true;
    }

    fn cancel(&mut self) {
        self.pending = false;
        self.cancellations += 1;
    }

    fn fired(&mut self) -> bool {
        let fired = self.fire_requested;
        self.fire_requested = false;
        if fired {
            self.pending = false;
        }
        fired
    }
}
