//! Round simulator CLI - plays full rounds in memory with simulated voters.
//!
//! Useful for checking the balance of impostor counts and the final-guess
//! probability without a UI.

mod metrics;
mod output;
mod simulator;

use std::time::Instant;

use clap::Parser;
use metrics::Summary;
use output::OutputWriter;
use simulator::{SimulationSetup, Simulator};
use tracing::info;

#[derive(Parser)]
#[command(name = "round-simulator")]
#[command(about = "Play impostor rounds in memory and summarize the outcomes")]
struct Args {
    /// Number of rounds to play
    #[arg(short, long, default_value = "100")]
    rounds: u32,

    /// Players in the room, host included
    #[arg(short, long, default_value = "5")]
    players: usize,

    /// Impostors per round
    #[arg(short, long, default_value = "1")]
    impostors: usize,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Give impostors the hint word
    #[arg(long, default_value = "true", action = clap::ArgAction::Set)]
    hints: bool,

    /// Chance that surviving impostors guess the word
    #[arg(long, default_value = "0.5")]
    guess_probability: f64,

    /// Also write per-round JSONL and a CSV summary into this directory
    #[arg(long)]
    output_dir: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON logs filtered by RUST_LOG instead of plain text
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.json_logs {
        impostor_backend::telemetry::init_tracing();
    } else {
        let filter = if args.verbose { "debug" } else { "warn" };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    if !(0.0..=1.0).contains(&args.guess_probability) {
        return Err(format!(
            "--guess-probability must be within 0..=1, got {}",
            args.guess_probability
        )
        .into());
    }

    let setup = SimulationSetup {
        players: args.players,
        impostors: args.impostors,
        hints: args.hints,
        guess_probability: args.guess_probability,
        seed: args.seed,
    };
    let mut simulator = Simulator::new(&setup)?;
    info!(
        code = simulator.code(),
        players = args.players,
        impostors = args.impostors,
        "Room ready"
    );

    let mut writer = match &args.output_dir {
        Some(dir) => Some(OutputWriter::new(dir)?),
        None => None,
    };

    let started = Instant::now();
    let mut summary = Summary::new(&setup);
    for round in 1..=args.rounds {
        let metrics = simulator.play_round(round)?;
        if let Some(writer) = writer.as_mut() {
            writer.write_round(&metrics)?;
        }
        summary.record(&metrics);
    }
    summary.elapsed_ms = started.elapsed().as_millis() as u64;

    if let Some(writer) = writer {
        let (jsonl, csv) = writer.finish()?;
        info!(jsonl = %jsonl.display(), csv = %csv.display(), "Round files written");
    }

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
