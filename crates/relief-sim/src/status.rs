//! What the host sees after each tick.

use std::fmt;

use relief_core::{BatchId, Tick};

/// Result of one call to `Simulation::tick`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Volunteers are still in transit; schedule another frame.
    Continue,
    /// Every volunteer of the batch has delivered (or there is no batch).
    Done,
    /// The continuation belongs to a batch that a newer dispatch replaced.
    /// Nothing was touched; do not reschedule.
    Stale,
}

impl TickOutcome {
    #[inline]
    pub fn should_continue(self) -> bool {
        matches!(self, TickOutcome::Continue)
    }
}

/// Progress summary for the status line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DispatchStatus {
    /// The current batch, or `None` before the first accepted dispatch.
    pub batch:              Option<BatchId>,
    /// The last tick executed.
    pub tick:               Tick,
    /// Volunteers in the current batch.
    pub total:              usize,
    pub in_transit:         usize,
    pub delivered:          usize,
    pub shelters:           usize,
    pub fulfilled_shelters: usize,
}

impl DispatchStatus {
    /// `true` once the current batch has fully delivered.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.batch.is_some() && self.in_transit == 0
    }
}

impl fmt::Display for DispatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.batch {
            None => write!(f, "No volunteers dispatched ({} shelter(s) placed)", self.shelters),
            Some(_) if self.is_complete() => write!(
                f,
                "All volunteers dispatched! ({}/{} shelters fulfilled)",
                self.fulfilled_shelters, self.shelters
            ),
            Some(_) => write!(
                f,
                "Dispatching {} volunteers... ({}/{} delivered)",
                self.total, self.delivered, self.total
            ),
        }
    }
}
