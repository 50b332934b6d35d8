//! Monkey business simulator binary
//!
//! Usage:
//!   monkey-business notes.txt
//!   monkey-business notes.txt --mode dampened
//!   monkey-business roster.json --rounds 500 --json

mod report;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use monkey_business_core::{Simulation, SimulationConfig, WorryMode};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "monkey-business")]
#[command(about = "Round-based item-routing simulator")]
#[command(version)]
struct Args {
    /// Path to the notes or JSON configuration
    input: PathBuf,

    /// Worry mode, bounded or dampened (overrides the configuration; notes
    /// default to bounded)
    #[arg(short, long, value_name = "MODE")]
    mode: Option<WorryMode>,

    /// Number of rounds (overrides the configuration)
    #[arg(short, long)]
    rounds: Option<usize>,

    /// Input format
    #[arg(short, long, value_enum, default_value_t = InputFormat::Auto)]
    format: InputFormat,

    /// Print the final state as JSON
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    /// JSON for `.json` files, notes otherwise
    Auto,
    Notes,
    Json,
}

impl InputFormat {
    fn resolve(self, path: &Path) -> InputFormat {
        match self {
            InputFormat::Auto => {
                let is_json = path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
                if is_json {
                    InputFormat::Json
                } else {
                    InputFormat::Notes
                }
            }
            other => other,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);

    let config = load_config(&args)?;
    let mut simulation = Simulation::new(config).context("invalid simulation configuration")?;

    let rounds = simulation.configured_rounds();
    info!(rounds, mode = %simulation.worry_mode(), "running simulation");
    let inspections = simulation.run_configured();
    info!(inspections, "simulation finished");

    let monkey_business = simulation
        .monkey_business()
        .context("cannot compute monkey business")?;

    if args.json {
        let rendered = report::render_json(&simulation.snapshot(), monkey_business)?;
        println!("{}", rendered);
    } else {
        print!("{}", report::render_summary(&simulation.snapshot(), monkey_business));
    }

    Ok(())
}

fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let mut config = match args.format.resolve(&args.input) {
        InputFormat::Json => SimulationConfig::from_json_str(&text)
            .with_context(|| format!("failed to load {}", args.input.display()))?,
        _ => {
            let mode = args.mode.unwrap_or(WorryMode::Bounded);
            SimulationConfig::from_notes(&text, mode)
                .with_context(|| format!("failed to parse {}", args.input.display()))?
        }
    };

    if let Some(mode) = args.mode {
        config.worry_mode = mode;
    }
    if let Some(rounds) = args.rounds {
        config.rounds = Some(rounds);
    }
    if config.actors.len() < 2 {
        warn!(actors = config.actors.len(), "roster too small for monkey business");
    }

    info!(
        input = %args.input.display(),
        actors = config.actors.len(),
        mode = %config.worry_mode,
        "configuration loaded"
    );

    Ok(config)
}
