//! twenty48: drivers for the 2048 environment
//!
//! - `simulate` plays episodes with uniformly random actions
//! - `play` reads w/s/a/d from stdin, q quits
//! - `manifest` prints the environment manifest as JSON

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use twenty48_core::{Direction, EnvConfig, Environment, Game2048Env, simulate_episode};

#[derive(Parser, Debug)]
#[command(name = "twenty48", version, about = "2048 reinforcement-learning environment")]
struct Args {
    /// RNG seed (falls back to TWENTY48_SEED, then entropy)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Probability that a spawned tile is a 4
    #[arg(long, global = true, value_name = "P")]
    four_probability: Option<f64>,

    #[command(subcommand)]
    cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Play episodes with a random policy
    Simulate {
        /// Number of episodes
        #[arg(long, default_value_t = 1)]
        episodes: u32,
        /// Stop an episode after this many steps
        #[arg(long)]
        max_steps: Option<u64>,
        /// Print one JSON summary per episode instead of text
        #[arg(long)]
        json: bool,
    },
    /// Play interactively from the keyboard
    Play,
    /// Print the environment manifest
    Manifest,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = EnvConfig::from_env();
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(p) = args.four_probability {
        config.spawn.four_probability = p;
    }
    let policy_seed = config.seed.map(|s| s.wrapping_add(1));
    let mut env = Game2048Env::new(config).context("invalid environment config")?;

    match args.cmd.unwrap_or(Cmd::Simulate {
        episodes: 1,
        max_steps: None,
        json: false,
    }) {
        Cmd::Simulate {
            episodes,
            max_steps,
            json,
        } => simulate(&mut env, policy_seed, episodes, max_steps, json),
        Cmd::Play => play(&mut env),
        Cmd::Manifest => {
            println!("{}", serde_json::to_string_pretty(&env.manifest())?);
            Ok(())
        }
    }
}

fn simulate(
    env: &mut Game2048Env,
    policy_seed: Option<u64>,
    episodes: u32,
    max_steps: Option<u64>,
    json: bool,
) -> Result<()> {
    let mut rng = match policy_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for episode in 1..=episodes {
        let summary = simulate_episode(env, &mut rng, max_steps)?;
        info!(
            "Episode {} done: reward {:.2}, steps {}, max tile {}",
            episode, summary.total_reward, summary.steps, summary.max_tile
        );
        if json {
            println!("{}", serde_json::to_string(&summary)?);
        } else {
            println!(
                "Episode {}: reward {:.2}, steps {}",
                episode, summary.total_reward, summary.steps
            );
            print!("{}", summary.final_board);
        }
    }
    Ok(())
}

fn play(env: &mut Game2048Env) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    env.render(&mut stdout)?;
    while !env.is_done() {
        write!(stdout, "move (w/s/a/d/q): ")?;
        stdout.flush()?;

        let Some(line) = lines.next() else { break };
        let line = line.context("failed to read stdin")?;
        let input = line.trim();
        if input.eq_ignore_ascii_case("q") {
            break;
        }
        match input.parse::<Direction>() {
            Ok(direction) => {
                env.step(direction)?;
                env.render(&mut stdout)?;
            }
            Err(e) => warn!("{}", e),
        }
    }

    println!("Final score: {:.2}", env.score());
    Ok(())
}
