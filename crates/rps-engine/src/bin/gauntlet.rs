//! Gauntlet Binary
//!
//! Plays the engine against every reference strategy and reports how it did.
//!
//! Options: --rounds, --config

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rps_engine::{describe_strategy, run_gauntlet, Engine, EngineConfig};

#[derive(Parser, Debug)]
#[command(about = "Play the adaptive engine against each reference strategy")]
struct Args {
    /// Rounds per match
    #[arg(long, default_value_t = 1000)]
    rounds: u32,
    /// JSON file with engine thresholds; defaults apply to missing fields
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            EngineConfig::from_json(&json).with_context(|| format!("loading {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    let mut engine = Engine::with_config(config);
    let report = run_gauntlet(&mut engine, args.rounds);

    for (id, result) in &report.matches {
        println!(
            "{:<22} {:>5} W {:>5} L {:>5} T  win rate {:>6.2}%  ({})",
            id.name(),
            result.wins,
            result.losses,
            result.ties,
            result.win_rate() * 100.0,
            describe_strategy(*id),
        );
    }
    log::info!("worst win rate {:.3}", report.worst_win_rate());
    Ok(())
}
