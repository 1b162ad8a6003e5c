use std::time::{Duration, Instant};

/// Coalesces rapid edits into a single deferred action (e.g. AI metadata
/// generation), with only the most recent edit's deadline surviving.
///
/// Timer-free: the caller injects `Instant`s, which keeps the core synchronous
/// and the behavior testable without sleeping. There is no retry semantics
/// here; if the deferred action fails, the previous result simply stands.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    /// Default delay used for metadata generation.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Records an edit at `now`, resetting any pending deadline.
    pub fn note_edit(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Reports whether the deferred action is due at `now`, consuming the
    /// deadline if so. At most one firing per [`Debouncer::note_edit`] burst.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drops any pending deadline without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}
