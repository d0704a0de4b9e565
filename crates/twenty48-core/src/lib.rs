//! # twenty48-core
//!
//! A 2048 simulation environment for reinforcement learning.
//!
//! This crate provides:
//! - The board engine (slide/merge, tile spawning, terminal detection)
//! - The episode environment (`reset` / `step`) with seedable randomness
//! - Reward shaping, action and observation types
//! - A random-action rollout driver
//!
//! ```
//! use twenty48_core::{Direction, Environment, Game2048Env};
//!
//! let mut env = Game2048Env::with_seed(42);
//! let result = env.step(Direction::Left).unwrap();
//! assert_eq!(result.step_id, 1);
//! ```

pub mod action;
pub mod board;
pub mod config;
pub mod env;
pub mod error;
pub mod manifest;
pub mod observation;
pub mod reward;
pub mod rollout;

pub use action::{ActionSpace, Direction};
pub use board::{Grid, MoveOutcome, SpawnPolicy, apply_move, is_terminal, new_game, spawn_tile};
pub use config::EnvConfig;
pub use env::{Environment, Game2048Env};
pub use error::{Result, Twenty48Error, error_codes};
pub use manifest::EnvManifest;
pub use observation::{EpisodeSummary, StepResult, TerminationReason};
pub use reward::{MergeReward, Reward, RewardComponents, RewardConfig, RewardFunction};
pub use rollout::simulate_episode;
