//! Episode state and the environment trait

use rand::SeedableRng;
use rand::rngs::StdRng;
use sha2::{Digest, Sha256};
use std::io::{self, Write};
use tracing::{debug, info};

use crate::action::Direction;
use crate::board::{self, Grid};
use crate::config::EnvConfig;
use crate::error::{Result, Twenty48Error};
use crate::manifest::EnvManifest;
use crate::observation::{StepResult, TerminationReason};
use crate::reward::{MergeReward, RewardFunction};

/// Trait for RL environments
///
/// Not designed for concurrent access: callers sharing one instance across
/// threads must synchronize `step` and `reset` themselves.
pub trait Environment {
    /// Start a new episode, reseeding when `seed` is given. Returns the
    /// initial observation.
    fn reset(&mut self, seed: Option<u64>) -> Grid;

    /// Execute an action and advance the episode
    fn step(&mut self, action: Direction) -> Result<StepResult>;

    /// Whether the current episode has ended
    fn is_done(&self) -> bool;

    /// Cumulative reward this episode
    fn score(&self) -> f64;

    /// Get current state hash for determinism verification
    fn state_hash(&self) -> Result<String>;

    /// Get the manifest describing the environment
    fn manifest(&self) -> EnvManifest;
}

/// Single-player 2048 environment
pub struct Game2048Env {
    board: Grid,
    score: f64,
    done: bool,
    steps: u64,
    rng: StdRng,
    reward_fn: MergeReward,
    config: EnvConfig,
}

impl Game2048Env {
    /// Create an environment and deal the first board
    pub fn new(config: EnvConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Default environment with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::build(EnvConfig::seeded(seed))
    }

    /// Start from a given board instead of a random deal.
    ///
    /// No board is dealt, so the first spawn uses the head of the seed stream.
    pub fn from_board(board: Grid, config: EnvConfig) -> Result<Self> {
        config.validate()?;
        if !board.is_valid() {
            return Err(Twenty48Error::InvalidConfig(format!(
                "board holds a value that is not a power of two in 2..={}:\n{}",
                board::MAX_TILE,
                board
            )));
        }
        let rng = seeded_rng(config.seed);
        Ok(Self::with_parts(board, rng, config))
    }

    fn build(config: EnvConfig) -> Self {
        let mut rng = seeded_rng(config.seed);
        let board = board::new_game(&mut rng, &config.spawn);
        Self::with_parts(board, rng, config)
    }

    fn with_parts(board: Grid, rng: StdRng, config: EnvConfig) -> Self {
        Self {
            board,
            score: 0.0,
            done: board::is_terminal(&board),
            steps: 0,
            rng,
            reward_fn: MergeReward::new(config.reward.clone()),
            config,
        }
    }

    /// Step with a raw discrete action index (0=Up, 1=Down, 2=Left, 3=Right)
    pub fn step_index(&mut self, action: i64) -> Result<StepResult> {
        let direction = Direction::try_from(action)?;
        self.step(direction)
    }

    /// Current board
    pub fn board(&self) -> Grid {
        self.board
    }

    /// Steps taken this episode
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Print the board and score. Does not touch episode state.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.board)?;
        writeln!(out, "score: {:.2}  steps: {}", self.score, self.steps)
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

impl Environment for Game2048Env {
    fn reset(&mut self, seed: Option<u64>) -> Grid {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
            self.config.seed = Some(seed);
        }
        self.board = board::new_game(&mut self.rng, &self.config.spawn);
        self.score = 0.0;
        self.done = false;
        self.steps = 0;
        info!("Episode reset (seed: {:?})", self.config.seed);
        self.board
    }

    fn step(&mut self, action: Direction) -> Result<StepResult> {
        if self.done && self.config.strict_termination {
            return Err(Twenty48Error::EpisodeTerminated);
        }

        let outcome = board::apply_move(
            &self.board,
            action,
            &mut self.rng,
            &self.config.spawn,
            &self.reward_fn,
        );
        self.board = outcome.grid;
        self.done = board::is_terminal(&self.board);
        self.score += outcome.reward.value;
        self.steps += 1;

        debug!(
            "Step {}: {} changed={} reward={:.3} score={:.3}",
            self.steps, action, outcome.changed, outcome.reward.value, self.score
        );
        if self.done {
            info!(
                "Episode finished after {} steps, score {:.2}, max tile {}",
                self.steps,
                self.score,
                self.board.max_tile()
            );
        }

        Ok(StepResult {
            step_id: self.steps,
            observation: self.board,
            reward: outcome.reward.value,
            reward_components: outcome.reward.components,
            done: self.done,
            changed: outcome.changed,
            score: self.score,
            termination_reason: self.done.then_some(TerminationReason::NoMovesLeft),
        })
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn score(&self) -> f64 {
        self.score
    }

    fn state_hash(&self) -> Result<String> {
        let json = serde_json::to_string(&(&self.board, self.score, self.steps))?;
        let hash = Sha256::digest(json.as_bytes());
        Ok(hex::encode(hash))
    }

    fn manifest(&self) -> EnvManifest {
        EnvManifest {
            reward_components: self.reward_fn.components(),
            deterministic: self.config.seed.is_some(),
            seed: self.config.seed,
            ..Default::default()
        }
    }
}
