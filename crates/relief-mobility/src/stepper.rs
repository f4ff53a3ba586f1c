//! One interpolation step for one volunteer.

use relief_core::{DistanceMetric, SimConfig, SimRng, Tick};

use crate::Volunteer;

/// Tunables for the per-tick step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MovementParams {
    /// Fraction of the remaining gap closed per tick, `0 < alpha < 1`.
    pub alpha: f64,
    /// Arrival is `distance < arrival_threshold`.
    pub arrival_threshold: f64,
    /// Jitter window per coordinate; `0.0` disables jitter.
    pub jitter: f64,
}

impl MovementParams {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            alpha:             config.alpha,
            arrival_threshold: config.arrival_threshold,
            jitter:            config.jitter,
        }
    }
}

/// Outcome of stepping one volunteer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Step {
    /// Already delivered; nothing changed.
    Idle,
    /// Moved and still outside the threshold.
    Moved { distance: f64 },
    /// Moved and crossed the threshold this tick.
    Arrived { distance: f64 },
}

/// Applies [`MovementParams`] under a distance metric `M`.
///
/// `M` is chosen at compile time (e.g. [`relief_core::Haversine`]) so the
/// distance call inlines into the loop.
#[derive(Clone, Debug)]
pub struct Stepper<M: DistanceMetric> {
    pub metric: M,
    pub params: MovementParams,
}

impl<M: DistanceMetric> Stepper<M> {
    pub fn new(metric: M, params: MovementParams) -> Self {
        Self { metric, params }
    }

    /// Advance `volunteer` by one tick.
    ///
    /// Interpolates toward the destination, adds jitter (latitude first,
    /// then longitude), commits the position, then measures the distance.
    /// The jitter only perturbs the measured distance; it never decides
    /// arrival on its own.
    pub fn step(&self, volunteer: &mut Volunteer, now: Tick, rng: &mut SimRng) -> Step {
        if volunteer.arrived {
            return Step::Idle;
        }

        let mut next = volunteer.position.lerp(volunteer.destination, self.params.alpha);
        if self.params.jitter > 0.0 {
            let d_lat = rng.centered(self.params.jitter);
            let d_lon = rng.centered(self.params.jitter);
            next = next.offset(d_lat, d_lon);
        }
        volunteer.position = next;

        let distance = self.metric.distance(next, volunteer.destination);
        if distance < self.params.arrival_threshold {
            volunteer.mark_arrived(now);
            Step::Arrived { distance }
        } else {
            Step::Moved { distance }
        }
    }
}

/// Number of ticks a jitter-free volunteer needs to get from `initial`
/// distance to strictly below `threshold` when closing `alpha` of the gap per
/// tick.
///
/// This is the smallest `k` with `initial * (1 - alpha)^k < threshold`, i.e.
/// `floor(ln(threshold / initial) / ln(1 - alpha)) + 1`.  It equals the
/// `ceil` form except when the quotient is an exact integer.  A volunteer is
/// only tested after it moves, so the result is at least 1.
pub fn ticks_to_arrival_bound(initial: f64, threshold: f64, alpha: f64) -> u64 {
    if initial < threshold {
        return 1;
    }
    let exact = (threshold / initial).ln() / (1.0 - alpha).ln();
    (exact.floor() + 1.0).max(1.0) as u64
}
