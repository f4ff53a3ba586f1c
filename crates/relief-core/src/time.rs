//! Frame counter.
//!
//! One tick is one host frame.  The engine never reads the wall clock;
//! pacing belongs to the host's `FrameScheduler`.

use std::fmt;

/// Frames stepped since the simulation was created.
///
/// The counter is shared by every batch: `Tick(0)` is before the first step
/// and each executed step adds one, whichever batch it advanced.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }

    /// Frames from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
