//! Headless Match Runner
//!
//! Runs AI vs AI matches to completion and prints a JSON summary.

use clap::Parser;
use serde::Serialize;

use ironfront::core::config::MatchConfig;
use ironfront::core::types::Team;
use ironfront::sim::tick::VictoryReason;
use ironfront::sim::world::MatchWorld;

/// Headless Match Runner - AI vs AI front-line matches
#[derive(Parser, Debug)]
#[command(name = "match_runner")]
#[command(about = "Run an AI vs AI match and print a JSON summary")]
struct Args {
    /// Map width in tiles
    #[arg(long, default_value_t = 80)]
    map_width: usize,

    /// Map height in tiles
    #[arg(long, default_value_t = 60)]
    map_height: usize,

    /// Units per team
    #[arg(long, default_value_t = 10)]
    units: usize,

    /// Ticks of placement freeze before fighting starts
    #[arg(long, default_value_t = 60)]
    freeze_ticks: u64,

    /// Maximum ticks before the match is called a draw
    #[arg(long, default_value_t = 20000)]
    max_ticks: u64,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,
}

/// JSON output structure
#[derive(Serialize)]
struct MatchResult {
    outcome: String,
    winner: Option<Team>,
    ticks: u64,
    red_survivors: usize,
    blue_survivors: usize,
    seed: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let config = MatchConfig {
        map_width: args.map_width,
        map_height: args.map_height,
        units_per_team: args.units,
        seed,
        ..Default::default()
    };
    let tick_rate = config.tick_rate;

    let mut world = match MatchWorld::new(config) {
        Ok(world) => world,
        Err(error) => {
            eprintln!("Failed to set up match: {}", error);
            std::process::exit(1);
        }
    };
    world.enable_ai(Team::Blue);

    let dt = 1.0 / tick_rate;
    let mut victory = None;
    let mut ticks = 0;

    for tick in 0..args.max_ticks {
        ticks = tick + 1;
        let movement_allowed = tick >= args.freeze_ticks;
        victory = world.tick(dt, movement_allowed);
        if victory.is_some() {
            break;
        }
    }

    let result = MatchResult {
        outcome: match victory {
            Some(v) => match v.reason {
                VictoryReason::Elimination => "elimination".to_string(),
                VictoryReason::CapitalCaptured => "capital_captured".to_string(),
            },
            None => "draw".to_string(),
        },
        winner: victory.map(|v| v.winner),
        ticks,
        red_survivors: world.units_of(Team::Red).count(),
        blue_survivors: world.units_of(Team::Blue).count(),
        seed,
    };

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{}", json),
        Err(error) => {
            eprintln!("Failed to serialize result: {}", error);
            std::process::exit(1);
        }
    }
}
