//! `relief-mobility`: volunteer movement state and arrival detection.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`state`]   | `Volunteer`: per-volunteer position, target, aid, arrival flag   |
//! | [`stepper`] | `Stepper<M>`, `MovementParams`: one interpolation step per tick  |
//! | [`store`]   | `Fleet`: the volunteers of one batch plus an in-transit counter  |
//!
//! # Movement model (exponential approach)
//!
//! Each tick an unarrived volunteer closes a fixed fraction `alpha` of the
//! remaining gap to its shelter:
//!
//! ```text
//! next = current + (target - current) * alpha      (+ optional jitter)
//! ```
//!
//! Travel time is therefore independent of distance, and the volunteer never
//! lands exactly on the target.  Arrival is declared when the distance, as
//! measured by the pluggable [`DistanceMetric`][relief_core::DistanceMetric],
//! drops strictly below the arrival threshold.  Without jitter the distance
//! shrinks by `(1 - alpha)` every tick, so
//! [`ticks_to_arrival_bound`] bounds the number of ticks.

pub mod state;
pub mod stepper;
pub mod store;


pub use state::Volunteer;
pub use stepper::{MovementParams, Step, Stepper, ticks_to_arrival_bound};
pub use store::Fleet;
