//! Host-side frame pacing.
//!
//! The simulation never schedules itself.  A host asks its
//! [`FrameScheduler`] for the next frame, calls `tick_batch`, and stops when
//! the outcome says so.  [`run_to_completion`] is that loop for hosts that
//! have nothing else to do between frames.

use std::thread;
use std::time::{Duration, Instant};

use relief_core::{BatchId, DistanceMetric};
use tracing::warn;

use crate::{SimError, SimObserver, SimResult, Simulation, TickOutcome};

/// Blocks until the host is ready for the next simulation tick.
pub trait FrameScheduler {
    fn wait_for_frame(&mut self);
}

/// Runs frames back to back.  For tests and headless runs.
#[derive(Copy, Clone, Debug, Default)]
pub struct Immediate;

impl FrameScheduler for Immediate {
    #[inline]
    fn wait_for_frame(&mut self) {}
}

/// Holds a steady frame rate by sleeping until the next frame boundary.
///
/// Stands in for a display-refresh callback.  If a frame runs late the next
/// one starts immediately and the schedule re-anchors, so a slow frame never
/// causes a burst of catch-up ticks.
#[derive(Clone, Debug)]
pub struct FixedRate {
    frame: Duration,
    next:  Option<Instant>,
}

impl FixedRate {
    /// `fps` frames per second; values below 1 are treated as 1.
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / fps.max(1),
            next:  None,
        }
    }

    #[inline]
    pub fn frame_duration(&self) -> Duration {
        self.frame
    }
}

impl Default for FixedRate {
    /// 60 frames per second.
    fn default() -> Self {
        Self::new(60)
    }
}

impl FrameScheduler for FixedRate {
    fn wait_for_frame(&mut self) {
        let now = Instant::now();
        let target = match self.next {
            Some(t) if t > now => {
                thread::sleep(t - now);
                t
            }
            _ => now,
        };
        self.next = Some(target + self.frame);
    }
}

/// How a call to [`run_to_completion`] ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub batch:   BatchId,
    /// Ticks executed by this call.
    pub ticks:   u64,
    /// `Done`, or `Stale` if the batch was replaced mid-run.
    pub outcome: TickOutcome,
}

/// Tick the current batch once per frame until it is done.
///
/// `tick_limit` is a host-side guard: when set, the run stops with
/// [`SimError::TickLimitExceeded`] as soon as that many ticks have executed
/// with volunteers still in transit.  The limit is checked before each
/// frame, so `Some(0)` fails without ticking unless the batch is already
/// delivered.  The batch itself is left as it was and can be resumed.
///
/// # Errors
///
/// [`SimError::NoActiveBatch`] if nothing has been dispatched yet.
pub fn run_to_completion<M, S, O>(
    sim:        &mut Simulation<M>,
    scheduler:  &mut S,
    observer:   &mut O,
    tick_limit: Option<u64>,
) -> SimResult<RunSummary>
where
    M: DistanceMetric,
    S: FrameScheduler,
    O: SimObserver,
{
    let batch = sim.current_batch().ok_or(SimError::NoActiveBatch)?;
    let start = sim.current_tick();

    loop {
        if let Some(limit) = tick_limit {
            let in_transit = sim.status().in_transit;
            if in_transit > 0 && sim.current_tick().since(start) >= limit {
                warn!(%batch, limit, in_transit, "tick limit reached");
                return Err(SimError::TickLimitExceeded { batch, limit, in_transit });
            }
        }

        scheduler.wait_for_frame();
        let outcome = sim.tick_batch_with(batch, observer);
        if !outcome.should_continue() {
            let ticks = sim.current_tick().since(start);
            return Ok(RunSummary { batch, ticks, outcome });
        }
    }
}
