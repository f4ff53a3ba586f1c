//! How much aid each volunteer carries.
//!
//! The plain demo gives every volunteer one unit.  The "ant" variant draws
//! 1–3 units per volunteer and scales the marker radius by it, so the amount
//! is exposed on the volunteer for the presentation layer.

use crate::SimRng;

/// Aid carried by a newly spawned volunteer.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum AidPolicy {
    /// Every volunteer carries exactly `units`.
    Fixed { units: u32 },
    /// Each volunteer carries a uniform draw from `min..=max`.
    Uniform { min: u32, max: u32 },
}

impl Default for AidPolicy {
    fn default() -> Self {
        AidPolicy::Fixed { units: 1 }
    }
}

impl AidPolicy {
    /// The 1–3 unit draw used by the variable-size variant.
    pub const VARIABLE: AidPolicy = AidPolicy::Uniform { min: 1, max: 3 };

    /// Draw the aid amount for one volunteer.
    ///
    /// `Fixed` never touches `rng`.  A `Uniform` range with `min > max`
    /// is rejected by `SimConfig::validate` before any draw happens.
    pub fn draw(self, rng: &mut SimRng) -> u32 {
        match self {
            AidPolicy::Fixed { units } => units,
            AidPolicy::Uniform { min, max } => rng.gen_range(min..=max),
        }
    }

    /// `true` if the policy can produce a value.
    pub fn is_valid(self) -> bool {
        match self {
            AidPolicy::Fixed { .. } => true,
            AidPolicy::Uniform { min, max } => min <= max,
        }
    }

    /// Human-readable label, useful for log lines.
    pub fn describe(self) -> String {
        match self {
            AidPolicy::Fixed { units } => format!("{units} unit(s) each"),
            AidPolicy::Uniform { min, max } => format!("{min}–{max} units each"),
        }
    }
}

impl std::fmt::Display for AidPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}
