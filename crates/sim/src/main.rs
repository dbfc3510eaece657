//! Headless driver for the turn scheduler.
//!
//! Plays a scripted session against a walled arena and reports how often each
//! speed tier got to act, along with what the lifecycle pipeline did.
//! Run with: `cargo run -p turn-sim -- --rounds 1000`
mod config;
mod driver;
mod world;

use anyhow::Result;
use clap::Parser;
use console::style;

use config::SimConfig;
use driver::SimReport;

/// Headless turn scheduler simulation
#[derive(Parser)]
#[command(name = "turn-sim")]
#[command(about = "Simulate a session and report turn fairness", long_about = None)]
#[command(version)]
struct Cli {
    /// Game seed (overrides SIM_SEED)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Rounds to simulate (overrides SIM_ROUNDS)
    #[arg(short, long)]
    rounds: Option<u64>,

    /// Initial monster count (overrides SIM_MONSTERS)
    #[arg(short, long)]
    monsters: Option<u32>,

    /// Map width in cells
    #[arg(long, value_name = "CELLS")]
    width: Option<u32>,

    /// Map height in cells
    #[arg(long, value_name = "CELLS")]
    height: Option<u32>,

    /// Let the player take damage
    #[arg(long)]
    mortal: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable summary
    Summary,
    /// Full JSON report
    Json,
}

impl Cli {
    fn into_config(self, mut config: SimConfig) -> SimConfig {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(rounds) = self.rounds {
            config.rounds = rounds;
        }
        if let Some(monsters) = self.monsters {
            config.monsters = monsters;
        }
        if let Some(width) = self.width {
            config.map_width = width.max(8);
        }
        if let Some(height) = self.height {
            config.map_height = height.max(8);
        }
        if self.mortal {
            config.invulnerable = false;
        }
        config
    }
}

fn main() -> Result<()> {
    // Load .env file if it exists (for SIM_* overrides)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = cli.format;
    let config = cli.into_config(SimConfig::from_env());

    let report = driver::run(&config)?;
    match format {
        OutputFormat::Summary => print_summary(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn print_summary(report: &SimReport) {
    println!("{}", style("=== Simulation Summary ===").bold().green());
    println!();

    println!("{}", style("Session:").bold().yellow());
    println!("  Seed: {:#x}", report.seed);
    println!("  Rounds: {}", report.rounds);
    println!("  Turns: {}", report.turns);
    println!("  Stopped: {:?}", report.stop);
    println!();

    println!("{}", style("Turns per round:").bold().yellow());
    for rate in &report.tiers {
        let tier = rate.tier.to_string();
        if rate.actor_rounds == 0 {
            println!("  {tier:<9} -");
            continue;
        }
        println!(
            "  {:<9} {:>5.2}  ({} turns over {} actor-rounds)",
            tier,
            rate.turns_per_round,
            rate.turns,
            rate.actor_rounds
        );
    }
    println!();

    let world = &report.world;
    println!("{}", style("Lifecycle:").bold().yellow());
    println!("  Deaths: {} ({} seen)", world.deaths, world.deaths_seen);
    println!("  Corpses kicked apart: {}", world.corpse_cracks);
    println!("  Armor destroyed: {}", world.armor_destroyed);
    println!("  Items dropped: {}", world.dropped_items);
    println!("  Spawned on schedule: {}", world.spawned);
    println!();

    println!("{}", style("World:").bold().yellow());
    println!("  Actors remaining: {}", report.actors_remaining);
    println!("  Corpses remaining: {}", report.corpses_remaining);
    println!("  Mobs remaining: {}", report.mobs_remaining);
    println!("  Lit cells: {}", report.lit_cells);
}
