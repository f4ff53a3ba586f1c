//! Simulation configuration and the named defaults behind it.
//!
//! The defaults reproduce the Sydney demo: volunteers leave a depot near
//! the CBD, close 2 % of the remaining gap each frame, and count as arrived
//! within 15 m of their shelter.

use crate::{AidPolicy, CoreError, CoreResult, GeoPoint};

/// Fraction of the remaining gap closed per tick.
pub const DEFAULT_ALPHA: f64 = 0.02;

/// Arrival threshold in metres (strict `<`).
pub const DEFAULT_ARRIVAL_THRESHOLD_M: f64 = 15.0;

/// Jitter window in degrees used by the "wiggle" variant.  Each coordinate
/// gets an independent offset in `[-δ/2, +δ/2]`.
pub const DEFAULT_JITTER_DEG: f64 = 0.0005;

/// Aid units a shelter needs before it is fulfilled.
pub const DEFAULT_SHELTER_NEED: u32 = 5;

/// Volunteers spawned when the requested count is missing or unusable.
pub const DEFAULT_DISPATCH_COUNT: u32 = 10;

/// Largest batch a single dispatch may spawn.
pub const MAX_DISPATCH_COUNT: u32 = 100_000;

/// Volunteer base (Sydney CBD).
pub const DEFAULT_DEPOT: GeoPoint = GeoPoint { lat: -33.868, lon: 151.209 };

/// Top-level simulation configuration.
///
/// Typically loaded from a TOML file by the host application and passed to
/// `SimulationBuilder`.  Every field has a default, so a partial file only
/// overrides what it names.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Where every volunteer starts.
    pub depot: GeoPoint,

    /// Interpolation factor, `0 < alpha < 1`.
    pub alpha: f64,

    /// Arrival threshold in the distance metric's unit (metres for
    /// `Haversine`).
    pub arrival_threshold: f64,

    /// Jitter window per coordinate.  `0.0` disables jitter.
    pub jitter: f64,

    /// Default `needed` for shelters placed without an explicit need.
    pub shelter_need: u32,

    /// Substituted when a dispatch count cannot be parsed or is `<= 0`.
    pub default_dispatch_count: u32,

    /// Aid carried per volunteer.
    pub aid: AidPolicy,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Emit an observer snapshot every N ticks.  `0` disables snapshots.
    pub snapshot_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            depot:                   DEFAULT_DEPOT,
            alpha:                   DEFAULT_ALPHA,
            arrival_threshold:       DEFAULT_ARRIVAL_THRESHOLD_M,
            jitter:                  0.0,
            shelter_need:            DEFAULT_SHELTER_NEED,
            default_dispatch_count:  DEFAULT_DISPATCH_COUNT,
            aid:                     AidPolicy::default(),
            seed:                    0,
            snapshot_interval_ticks: 1,
        }
    }
}

impl SimConfig {
    /// The "ant" variant: jittered motion and 1–3 units of aid per volunteer.
    pub fn wiggle() -> Self {
        Self {
            jitter: DEFAULT_JITTER_DEG,
            aid:    AidPolicy::VARIABLE,
            ..Self::default()
        }
    }

    /// Reject values that would stall or break the tick loop.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(CoreError::Config(format!(
                "alpha must be in (0, 1), got {}",
                self.alpha
            )));
        }
        if !self.arrival_threshold.is_finite() || self.arrival_threshold <= 0.0 {
            return Err(CoreError::Config(format!(
                "arrival_threshold must be a positive finite number, got {}",
                self.arrival_threshold
            )));
        }
        if !self.jitter.is_finite() || self.jitter < 0.0 {
            return Err(CoreError::Config(format!(
                "jitter must be a non-negative finite number, got {}",
                self.jitter
            )));
        }
        if !self.aid.is_valid() {
            return Err(CoreError::Config(format!("aid range is empty: {:?}", self.aid)));
        }
        if !self.depot.is_finite() {
            return Err(CoreError::Config(format!("depot is not finite: {}", self.depot)));
        }
        Ok(())
    }
}
