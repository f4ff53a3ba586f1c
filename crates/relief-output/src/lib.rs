//! `relief-output`: trace writers for relief dispatch runs.
//!
//! One backend is provided:
//!
//! | Backend | Files created                                                     |
//! |---------|-------------------------------------------------------------------|
//! | CSV     | `volunteer_snapshots.csv`, `tick_summaries.csv`, `arrivals.csv`   |
//!
//! Backends implement [`OutputWriter`] and are driven by [`TraceObserver`],
//! which implements `relief_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use relief_output::{CsvWriter, TraceObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TraceObserver::new(writer);
//! sim.dispatch_with(10, &mut obs)?;
//! run_to_completion(&mut sim, &mut Immediate, &mut obs, None)?;
//! obs.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::{ArrivalRow, TickSummaryRow, VolunteerSnapshotRow};
pub use writer::OutputWriter;
