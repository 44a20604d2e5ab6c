//! Scheduler handles owned by the game loop.
//!
//! [`FrameScheduler`] stands in for a display-refresh callback: at most one
//! frame request is pending, and only the handle of that request is honoured.
//! [`SpawnTimer`] is a wall-clock interval that only counts time while armed.

use std::time::Duration;

/// Ticket for one requested frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

#[derive(Debug, Default)]
pub struct FrameScheduler {
    issued: u64,
    pending: Option<FrameHandle>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the next frame.  Replaces any request still pending.
    pub fn request(&mut self) -> FrameHandle {
        self.issued += 1;
        let handle = FrameHandle(self.issued);
        self.pending = Some(handle);
        handle
    }

    /// Drop the pending request, if any.  Safe to call repeatedly.
    pub fn cancel(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Consume `handle` if it is the pending request.  Cancelled or superseded
    /// handles are refused.
    pub fn take(&mut self, handle: FrameHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

#[derive(Debug)]
pub struct SpawnTimer {
    period: Duration,
    elapsed: Duration,
    armed: bool,
}

impl SpawnTimer {
    /// A stopped timer.  Call [`SpawnTimer::start`] to arm it.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
            armed: false,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Arm the timer with a fresh phase.
    pub fn start(&mut self) {
        self.armed = true;
        self.elapsed = Duration::ZERO;
    }

    /// Disarm and forget any partial period.  Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.armed = false;
        self.elapsed = Duration::ZERO;
    }

    /// Feed wall-clock time in.  Returns `true` when a period completed; at
    /// most one firing per call, with the leftover kept modulo the period.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if !self.armed {
            return false;
        }
        if self.period.is_zero() {
            return true;
        }
        self.elapsed += elapsed;
        if self.elapsed < self.period {
            return false;
        }
        let leftover = self.elapsed.as_nanos() % self.period.as_nanos();
        self.elapsed = Duration::from_nanos(leftover as u64);
        true
    }
}
