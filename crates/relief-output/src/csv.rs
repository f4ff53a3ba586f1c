//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `volunteer_snapshots.csv`
//! - `tick_summaries.csv`
//! - `arrivals.csv`

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{ArrivalRow, OutputResult, TickSummaryRow, VolunteerSnapshotRow};

pub const SNAPSHOT_HEADERS: [&str; 7] =
    ["batch", "tick", "volunteer_id", "lat", "lon", "target_shelter", "arrived"];
pub const SUMMARY_HEADERS: [&str; 4] = ["batch", "tick", "in_transit", "delivered"];
pub const ARRIVAL_HEADERS: [&str; 7] = [
    "batch",
    "tick",
    "volunteer_id",
    "shelter_id",
    "aid",
    "shelter_received",
    "shelter_fulfilled",
];

/// Writes a run trace to three CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    arrivals:  Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open (or truncate) the three CSV files, and
    /// write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut snapshots = Writer::from_path(dir.join("volunteer_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADERS)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADERS)?;

        let mut arrivals = Writer::from_path(dir.join("arrivals.csv"))?;
        arrivals.write_record(ARRIVAL_HEADERS)?;

        Ok(Self {
            snapshots,
            summaries,
            arrivals,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[VolunteerSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.batch.to_string(),
                row.tick.to_string(),
                row.volunteer_id.to_string(),
                format!("{:.7}", row.lat),
                format!("{:.7}", row.lon),
                row.target_shelter.to_string(),
                (row.arrived as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.batch.to_string(),
            row.tick.to_string(),
            row.in_transit.to_string(),
            row.delivered.to_string(),
        ])?;
        Ok(())
    }

    fn write_arrival(&mut self, row: &ArrivalRow) -> OutputResult<()> {
        self.arrivals.write_record(&[
            row.batch.to_string(),
            row.tick.to_string(),
            row.volunteer_id.to_string(),
            row.shelter_id.to_string(),
            row.aid.to_string(),
            row.shelter_received.to_string(),
            (row.shelter_fulfilled as u8).to_string(),
        ])?;
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.arrivals.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.flush()
    }
}
