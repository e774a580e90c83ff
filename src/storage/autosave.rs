//! Debounced autosave deadline

/// Tracks when the next save is due
///
/// Every edit restarts the quiet window, so a burst of edits produces one
/// save holding the last of them. Time is in milliseconds and supplied by
/// the caller.
#[derive(Debug, Clone)]
pub struct Autosave {
    window_ms: u64,
    deadline: Option<u64>,
}

impl Autosave {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            deadline: None,
        }
    }

    /// Note an edit at `now`
    pub fn schedule(&mut self, now: u64) {
        self.deadline = Some(now.saturating_add(self.window_ms));
    }

    /// Check if a save is waiting
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Check if the quiet window has passed
    pub fn is_due(&self, now: u64) -> bool {
        matches!(self.deadline, Some(deadline) if now >= deadline)
    }

    /// Consume the pending save if it is due
    pub fn take_due(&mut self, now: u64) -> bool {
        if self.is_due(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }

    /// Drop the pending save, e.g. after saving immediately
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
