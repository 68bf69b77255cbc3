//! Headless session runner.
//!
//! Usage: `dungeon [KEYS]`, where `KEYS` is a string of roguelike commands
//! (`hjklyubn` walk, uppercase runs, `.` rests, `R` rests until healed).
//! Configuration comes from `DUNGEON_*` environment variables and logging is
//! filtered with `RUST_LOG`.
use anyhow::{Context, Result};
use dungeon_runtime::{RuntimeConfig, Scenario, ScriptedInput, Session, logging};

const DEFAULT_KEYS: &str = "LLJ.R llll";

const MAP: [&str; 9] = [
    "###############",
    "#@....#.......#",
    "#.....+...g...#",
    "#.....#.......#",
    "###'###########",
    "#.........r...#",
    "#..*......o...#",
    "#.............#",
    "###############",
];

fn main() -> Result<()> {
    logging::init().context("failed to install tracing subscriber")?;

    let config = RuntimeConfig::from_env();
    let keys = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_KEYS.to_owned());
    let input = ScriptedInput::from_keys(&keys).context("invalid command script")?;
    let scenario = Scenario::from_ascii(MAP).context("invalid scenario map")?;

    tracing::info!(seed = config.sim.seed, turn_limit = config.turn_limit, "starting session");

    let mut session = Session::new(&scenario, &config, input)?;
    let summary = session.run().map_err(|err| {
        tracing::error!(code = err.error_code(), error = %err, "session aborted");
        err
    })?;

    println!(
        "{:?} at turn {}: {} commands, {} effects, {} tiles explored",
        summary.outcome,
        summary.turn,
        summary.stats.commands,
        summary.stats.effects,
        summary.stats.tiles_explored
    );
    Ok(())
}
