//! Dolphin Dash - Headless Runner
//!
//! Run with: `cargo run --bin dolphin-dash -- --frames 3600 --telemetry run.jsonl`
//!
//! Drives a full session without a window: a scripted autopilot swims,
//! turns, boosts and breaches while the simulation runs at a fixed frame
//! rate. Telemetry goes to a JSON-lines file (or `-` for stdout), and
//! offline commentary is logged every few simulated seconds.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;

use dolphin_dash_engine::game::commentary::{
    CommentaryConfig, CommentaryRequest, CommentaryWorker, ContentEvent, TemplateBackend,
};
use dolphin_dash_engine::game::{JsonLinesSink, SimConfig, Simulation, logging};
use dolphin_dash_engine::input::{InputAction, ScriptedInput};

/// Headless Dolphin Dash session
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file; missing fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Frames to simulate
    #[arg(short, long, default_value_t = 3600)]
    frames: u64,

    /// Session seed
    #[arg(short, long, default_value_t = 7)]
    seed: u64,

    /// Simulated frame rate
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Write telemetry as JSON lines to this path (`-` for stdout)
    #[arg(short, long)]
    telemetry: Option<PathBuf>,

    /// Seconds of simulated time between commentary requests (0 disables)
    #[arg(long, default_value_t = 5.0)]
    commentary_interval: f32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Autopilot: cruise forward, weave, boost in bursts and breach now and then.
fn drive(input: &mut ScriptedInput, frame: u64, fps: f32) {
    let t = frame as f32 / fps;

    input.set(InputAction::Forward, true);
    let weave = (t * 0.4).sin();
    input.set(InputAction::Left, weave > 0.35);
    input.set(InputAction::Right, weave < -0.35);
    input.set(InputAction::Boost, (t % 6.0) < 2.0);
    input.set(InputAction::Jump, (t % 4.0) < 0.05);
    input.set(InputAction::Dive, (t % 9.0) > 7.0);
}

fn telemetry_writer(path: &PathBuf) -> io::Result<Box<dyn Write>> {
    if path.as_os_str() == "-" {
        Ok(Box::new(io::stdout()))
    } else {
        Ok(Box::new(BufWriter::new(File::create(path)?)))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = match &args.config {
        Some(path) => SimConfig::load_from_path(path)?,
        None => SimConfig::default(),
    };
    if !(args.fps > 0.0) {
        return Err("--fps must be positive".into());
    }
    let delta = 1.0 / args.fps;

    let mut sim = Simulation::new(config, ScriptedInput::new(), args.seed)?;
    if let Some(path) = &args.telemetry {
        sim = sim.with_sink(JsonLinesSink::new(telemetry_writer(path)?));
    }

    let worker = if args.commentary_interval > 0.0 {
        Some(CommentaryWorker::spawn(TemplateBackend, CommentaryConfig::default())?)
    } else {
        None
    };
    let commentary_every = ((args.commentary_interval * args.fps).round() as u64).max(1);

    log::info!(
        "[Runner] {} frames at {} fps, seed {}",
        args.frames,
        args.fps,
        args.seed
    );

    for frame in 0..args.frames {
        drive(sim.input_mut(), frame, args.fps);
        let report = sim.step(delta)?;

        if report.captures > 0 || !report.pickups.is_empty() {
            log::debug!(
                "[Runner] frame {}: +{} score ({} captures, {} pickups)",
                report.snapshot.frame,
                report.score_gained,
                report.captures,
                report.pickups.collected()
            );
        }

        if let Some(worker) = &worker {
            if report.snapshot.frame % commentary_every == 0 {
                worker.submit(CommentaryRequest::from_snapshot(&report.snapshot));
            }
            for event in worker.drain() {
                log_event(event);
            }
        }
    }

    let summary = sim.snapshot();
    let cancelled = sim.shutdown();
    if let Some(worker) = worker {
        for event in worker.shutdown() {
            log_event(event);
        }
    }

    log::info!(
        "[Runner] done: score {}, {} captures, {} pickups, peak speed {:.1} m/s, {} respawns cancelled",
        summary.score,
        summary.stats.captures,
        summary.stats.common_pickups + summary.stats.rare_pickups,
        summary.stats.peak_speed,
        cancelled
    );
    Ok(())
}

fn log_event(event: ContentEvent) {
    match event {
        ContentEvent::Commentary(c) => log::info!("[Commentary] ({}) {}", c.model, c.text),
        ContentEvent::Notice(notice) => log::warn!("[Commentary] {notice}"),
    }
}
