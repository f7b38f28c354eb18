#![deny(warnings)]

//! Headless CLI: play one mission, optionally under the caretaker autopilot,
//! and print the outcome.

use anyhow::{anyhow, bail, Context, Result};
use garden_ai::{Caretaker, CaretakerConfig};
use garden_core::{Difficulty, SimConfig, SimulationState};
use garden_runtime::{spawn_clock, ClockCommand, GardenEngine, OutcomeReport};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: garden [--difficulty easy|hard] [--seed N] [--config FILE] \
[--realtime] [--autopilot] [--json] [--version]";

#[derive(Debug, Default)]
struct Args {
    difficulty: Difficulty,
    seed: Option<u64>,
    config: Option<PathBuf>,
    realtime: bool,
    autopilot: bool,
    json: bool,
    version: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--difficulty" => {
                let v = it.next().context("--difficulty needs a value")?;
                args.difficulty = v.parse()?;
            }
            "--seed" => {
                let v = it.next().context("--seed needs a value")?;
                args.seed = Some(v.parse().with_context(|| format!("bad seed {v:?}"))?);
            }
            "--config" => args.config = Some(it.next().context("--config needs a path")?.into()),
            "--realtime" => args.realtime = true,
            "--autopilot" => args.autopilot = true,
            "--json" => args.json = true,
            "--version" => args.version = true,
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("unknown argument {other:?}\n{USAGE}"),
        }
    }
    Ok(args)
}

/// YAML file layout; both sections are optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    sim: SimConfig,
    caretaker: CaretakerConfig,
}

fn load_config(path: PathBuf) -> Result<FileConfig> {
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_yaml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn run_fast(mut engine: GardenEngine, mut caretaker: Option<Caretaker>) -> GardenEngine {
    loop {
        if let Some(ai) = caretaker.as_mut() {
            if let Some(cmd) = ai.plan(engine.state()) {
                engine.apply(cmd);
            }
        }
        if !engine.tick() {
            break;
        }
    }
    engine
}

fn run_realtime(engine: GardenEngine, mut caretaker: Option<Caretaker>) -> Result<GardenEngine> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    rt.block_on(async move {
        let handle = spawn_clock(engine);
        let mut updates = handle.subscribe();
        let mut last_second = 0;
        loop {
            updates
                .changed()
                .await
                .map_err(|_| anyhow!("clock stopped before the mission ended"))?;
            let snap = updates.borrow_and_update().clone();
            if snap.game_phase.is_terminal() {
                break;
            }
            let second = snap.elapsed_time as u64;
            if second > last_second {
                last_second = second;
                status_line(&snap);
            }
            if let Some(ai) = caretaker.as_mut() {
                if let Some(cmd) = ai.plan(&snap) {
                    handle.send(ClockCommand::Resource(cmd)).await?;
                }
            }
        }
        Ok::<_, anyhow::Error>(handle.shutdown().await?)
    })
}

fn status_line(s: &SimulationState) {
    let readings: Vec<String> = s
        .resources
        .iter()
        .map(|(id, v)| format!("{id} {v:.1}"))
        .collect();
    println!(
        "t {:>5.1}s | {} | health {:.1} | {} {:.1}% | {}",
        s.elapsed_time,
        if s.is_daylight { "day  " } else { "night" },
        s.plant_health,
        s.growth_stage,
        s.growth_progress,
        readings.join(", ")
    );
}

fn print_report(report: &OutcomeReport, state: &SimulationState) {
    println!(
        "Mission {} | difficulty: {} | time: {:.1}s | health: {:.1} | stage: {} ({:.1}%) | orbits: {}",
        report.phase,
        report.difficulty,
        report.elapsed_time,
        report.final_health,
        report.stage_reached,
        report.growth_progress,
        report.orbits_completed
    );
    for reason in &report.reasons {
        println!("  - {reason}");
    }
    for entry in state.event_log.iter() {
        println!("  [{:>5.1}s] {}", entry.time, entry.message);
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;
    if args.version {
        println!("garden {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut file = args.config.map(load_config).transpose()?.unwrap_or_default();
    if let Some(seed) = args.seed {
        file.sim.rng_seed = seed;
    }
    info!(difficulty = %args.difficulty, seed = file.sim.rng_seed, realtime = args.realtime, autopilot = args.autopilot, "starting mission");

    let mut engine = GardenEngine::new(file.sim)?;
    engine.start_game(args.difficulty)?;
    engine.start_playing()?;
    let caretaker = args.autopilot.then(|| Caretaker::new(file.caretaker));

    let engine = if args.realtime {
        run_realtime(engine, caretaker)?
    } else {
        run_fast(engine, caretaker)
    };

    let report = engine
        .outcome()
        .context("mission stopped before reaching an outcome")?;
    if args.json {
        let out = serde_json::json!({ "report": report, "state": engine.state() });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_report(&report, engine.state());
    }
    Ok(())
}
