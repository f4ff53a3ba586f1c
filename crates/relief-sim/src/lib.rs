//! `relief-sim`: the dispatch/arrival loop for the relief simulator.
//!
//! # Tick loop
//!
//! ```text
//! add_shelter(coord)*           shelters accumulate; never removed
//! dispatch(n)                   new batch: n volunteers at the depot,
//!                               volunteer i → shelter i mod m, BatchId += 1
//! loop  (one call per frame):
//!   tick_batch(id)
//!     stale id          → Stale   (a newer dispatch replaced the batch)
//!     ① step              every in-transit volunteer closes alpha of its gap
//!     ② arrivals          distance < threshold → add aid to the shelter,
//!                          mark fulfilled once received >= needed
//!     ③ report            observer hooks, optional snapshot
//!     anyone in transit → Continue, else Done
//! ```
//!
//! The host decides when the next frame happens: a render loop, a timer, or
//! a test calling `tick()` in a `while`.  [`run_to_completion`] wires that
//! up through a [`FrameScheduler`].
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use relief_core::{GeoPoint, SimConfig};
//! use relief_sim::{Immediate, NoopObserver, SimulationBuilder, run_to_completion};
//!
//! let mut sim = SimulationBuilder::new(SimConfig::default())
//!     .shelter(GeoPoint::new(-33.87, 151.21))
//!     .build()?;
//! sim.dispatch(5)?;
//! run_to_completion(&mut sim, &mut Immediate, &mut NoopObserver, None)?;
//! assert!(sim.status().is_complete());
//! ```

pub mod builder;
pub mod dispatch;
pub mod driver;
pub mod error;
pub mod observer;
pub mod shelter;
pub mod simulation;
pub mod status;

#[cfg(test)]
mod tests;

pub use builder::SimulationBuilder;
pub use dispatch::{DispatchCount, round_robin};
pub use driver::{FixedRate, FrameScheduler, Immediate, RunSummary, run_to_completion};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use shelter::Shelter;
pub use simulation::Simulation;
pub use status::{DispatchStatus, TickOutcome};
