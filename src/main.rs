//! Entry point: parse arguments, load config and map, run the game.
//!
//! `main` is the only place the process exits. Fatal errors (bad map,
//! unreadable file, no room to place actors) bubble up here, get printed,
//! and produce a non-zero exit code.

mod config;
mod domain;
mod error;
mod logutil;
mod sim;
mod ui;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};

use config::GameConfig;
use sim::level;
use sim::spawn::SeededRandom;
use sim::turn::TurnEngine;
use ui::input::{LineSource, StdinSource};
use ui::renderer::{Console, TerminalConsole};

const PATH_PROMPT: &str = "Enter file path: ";

#[derive(Parser)]
#[command(name = "goldchase")]
#[command(about = "Collect gold and reach the exit before the bot catches you")]
#[command(version)]
struct Cli {
    /// Map file; prompted for when omitted
    map: Option<String>,

    /// Configuration file path (default: config.toml next to the binary or in CWD)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for spawn placement and bot wandering (overrides config)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Verbose logging to stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = GameConfig::load(cli.config.as_deref());
    if cli.seed.is_some() {
        config.game.seed = cli.seed;
    }

    let stdin = io::stdin();
    let mut input = StdinSource::new(stdin.lock());
    let mut console = TerminalConsole::stdout(config.game.explorer_symbol);

    let map_arg = match cli.map {
        Some(m) => m,
        None => ask_map_path(&mut input, &mut console)?,
    };
    let map_path = config.resolve_map(&map_arg);
    let map = level::load_map(&map_path)
        .with_context(|| format!("loading {}", map_path.display()))?;

    let rng = SeededRandom::new(config.game.seed);
    let mut engine = TurnEngine::new(map, &config.game, rng)?;
    let end = engine.run(&mut input, &mut console)?;
    info!("final: {end:?}, gold {}", engine.world.explorer.gold());
    Ok(())
}

fn ask_map_path(input: &mut dyn LineSource, console: &mut dyn Console) -> Result<String> {
    console.prompt(PATH_PROMPT).context("writing prompt")?;
    let line = input
        .read_line()
        .context("reading map path")?
        .context("no map path given")?;
    Ok(line.trim().to_string())
}

/// Default level is warn; each -v raises it. `RUST_LOG` wins when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    builder.target(env_logger::Target::Stderr).init();
}
