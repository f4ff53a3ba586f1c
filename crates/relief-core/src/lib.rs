//! `relief-core`: foundational types for the `relief` dispatch simulator.
//!
//! This crate is a dependency of every other `relief-*` crate.  It has no
//! `relief-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `ShelterId`, `VolunteerId`, `BatchId`                 |
//! | [`geo`]         | `GeoPoint`, `DistanceMetric`, `Haversine`, `Planar`   |
//! | [`time`]        | `Tick`                                                |
//! | [`rng`]         | `SimRng` (seeded, reproducible)                       |
//! | [`aid`]         | `AidPolicy`: how much aid each volunteer carries     |
//! | [`config`]      | `SimConfig` and the named defaults                    |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types so a    |
//! |         | `SimConfig` can be loaded from TOML/JSON by the host.      |

pub mod aid;
pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use aid::AidPolicy;
pub use config::SimConfig;
pub use error::{CoreError, CoreResult};
pub use geo::{DistanceMetric, GeoPoint, Haversine, Planar};
pub use ids::{BatchId, ShelterId, VolunteerId};
pub use rng::SimRng;
pub use time::Tick;
