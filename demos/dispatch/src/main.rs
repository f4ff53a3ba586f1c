//! dispatch: command-line host for the relief dispatch simulation.
//!
//! Places shelters on the map, sends one batch of volunteers from the depot,
//! and ticks it until every volunteer has delivered.  Frames are paced at
//! `--fps` unless `--headless` is given.  `--output DIR` writes a CSV trace.
//!
//! Logging goes through `tracing`; set `RUST_LOG` to change the filter
//! (default `relief=info,dispatch=info`).

mod shelters;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use relief_core::config::DEFAULT_JITTER_DEG;
use relief_core::{AidPolicy, GeoPoint, SimConfig};
use relief_output::{CsvWriter, TraceObserver};
use relief_sim::{
    FixedRate, Immediate, NoopObserver, RunSummary, SimObserver, Simulation, SimulationBuilder,
    run_to_completion,
};

use shelters::{Placement, default_shelters, parse_point};

// ── Command line ──────────────────────────────────────────────────────────────

/// Dispatch relief volunteers from a depot to shelters.
#[derive(Parser, Debug)]
#[command(name = "dispatch")]
#[command(about = "Dispatch relief volunteers from a depot to shelters")]
struct Args {
    /// TOML run file with a `[sim]` table and `[[shelters]]` entries
    #[arg(long)]
    config: Option<PathBuf>,

    /// Place a shelter at LAT,LON (repeatable; replaces the run file's shelters)
    #[arg(long = "shelter", value_name = "LAT,LON", value_parser = parse_point)]
    shelters: Vec<GeoPoint>,

    /// Volunteers to send, as typed; unusable input falls back to the default
    #[arg(long)]
    count: Option<String>,

    /// Jittered paths and 1 to 3 units of aid per volunteer
    #[arg(long)]
    wiggle: bool,

    /// RNG seed (overrides the run file)
    #[arg(long)]
    seed: Option<u64>,

    /// Frame rate when not headless
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Tick as fast as possible
    #[arg(long)]
    headless: bool,

    /// Write CSV trace files to this directory
    #[arg(long)]
    output: Option<PathBuf>,

    /// Give up if volunteers are still in transit after this many ticks
    #[arg(long)]
    tick_limit: Option<u64>,
}

// ── Run file ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RunFile {
    sim:      SimConfig,
    shelters: Vec<Placement>,
}

fn load_run_file(path: Option<&Path>) -> Result<RunFile> {
    let Some(path) = path else {
        return Ok(RunFile::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading run file {}", path.display()))?;
    let run: RunFile = toml::from_str(&text)
        .with_context(|| format!("parsing run file {}", path.display()))?;
    info!(path = %path.display(), shelters = run.shelters.len(), "loaded run file");
    Ok(run)
}

fn apply_overrides(mut config: SimConfig, args: &Args) -> SimConfig {
    if args.wiggle {
        config.jitter = DEFAULT_JITTER_DEG;
        config.aid = AidPolicy::VARIABLE;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config
}

/// Command-line shelters win over the run file; with neither, use the
/// built-in set.
fn pick_shelters(from_file: Vec<Placement>, from_args: &[GeoPoint]) -> Vec<Placement> {
    if !from_args.is_empty() {
        from_args.iter().copied().map(Placement::at).collect()
    } else if !from_file.is_empty() {
        from_file
    } else {
        default_shelters()
    }
}

fn build_simulation(config: SimConfig, placements: &[Placement]) -> Result<Simulation> {
    let default_need = config.shelter_need;
    let mut builder = SimulationBuilder::new(config);
    for (index, placement) in placements.iter().enumerate() {
        let location = placement
            .validate()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("shelter {index}"))?;
        let needed = placement.need.unwrap_or(default_need);
        builder = builder.shelter_with_need(location, needed);
    }
    builder.build().context("invalid simulation config")
}

// ── Run ───────────────────────────────────────────────────────────────────────

fn run<O: SimObserver>(sim: &mut Simulation, args: &Args, observer: &mut O) -> Result<RunSummary> {
    let batch = match &args.count {
        Some(raw) => sim.dispatch_input_with(raw, &mut *observer)?,
        None => {
            let count = sim.config().default_dispatch_count;
            sim.dispatch_with(count, &mut *observer)?
        }
    };

    let t0 = Instant::now();
    let summary = if args.headless {
        run_to_completion(sim, &mut Immediate, &mut *observer, args.tick_limit)?
    } else {
        run_to_completion(sim, &mut FixedRate::new(args.fps), &mut *observer, args.tick_limit)?
    };
    info!(
        %batch,
        ticks = summary.ticks,
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "run finished"
    );
    Ok(summary)
}

fn print_report(sim: &Simulation) {
    println!("{}", sim.status());
    println!();
    println!(
        "{:<8} {:<26} {:>6} {:>9} {:<9}",
        "Shelter", "Location", "Need", "Received", "Fulfilled"
    );
    println!("{}", "-".repeat(62));
    for shelter in sim.shelters() {
        println!(
            "{:<8} {:<26} {:>6} {:>9} {:<9}",
            shelter.id().0,
            shelter.location().to_string(),
            shelter.needed(),
            shelter.received(),
            if shelter.is_fulfilled() { "yes" } else { "no" },
        );
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("relief=info,dispatch=info")),
        )
        .init();

    let args = Args::parse();
    let run_file = load_run_file(args.config.as_deref())?;
    let config = apply_overrides(run_file.sim, &args);
    let placements = pick_shelters(run_file.shelters, &args.shelters);

    let mut sim = build_simulation(config, &placements)?;
    info!(
        shelters = sim.shelters().len(),
        depot = %sim.config().depot,
        aid = %sim.config().aid,
        "map ready"
    );

    match &args.output {
        Some(dir) => {
            let writer = CsvWriter::new(dir)
                .with_context(|| format!("opening trace files in {}", dir.display()))?;
            let mut obs = TraceObserver::new(writer);
            run(&mut sim, &args, &mut obs)?;
            obs.finish().context("writing trace files")?;
            info!(dir = %dir.display(), "trace written");
        }
        None => {
            run(&mut sim, &args, &mut NoopObserver)?;
        }
    }

    print_report(&sim);
    Ok(())
}
