//! Reward types and reward shaping

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::board::Grid;

/// Component name for the merge term
pub const MERGE: &str = "merge";
/// Component name for the target-tile bonus
pub const WIN_BONUS: &str = "win_bonus";
/// Component name for the no-op penalty
pub const INVALID_MOVE: &str = "invalid_move";

/// Scalar reward with optional decomposition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Reward {
    /// Total scalar reward
    pub value: f64,
    /// Decomposed components for analysis
    #[serde(default)]
    pub components: RewardComponents,
}

impl Reward {
    fn add(&mut self, component: &str, value: f64) {
        self.value += value;
        *self.components.entry(component.to_string()).or_insert(0.0) += value;
    }
}

/// Decomposed reward components
pub type RewardComponents = HashMap<String, f64>;

/// Definition of a reward component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardComponentDef {
    /// Component name
    pub name: String,
    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Expected range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    /// Default weight
    #[serde(default = "default_weight")]
    pub default_weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

/// Trait for computing rewards from game state
pub trait RewardFunction: Send + Sync {
    /// State type for this reward function
    type State;

    /// Compute reward from state transition
    fn compute(&self, prev: &Self::State, current: &Self::State) -> Reward;

    /// List available reward components
    fn components(&self) -> Vec<RewardComponentDef>;
}

/// Reward constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Tile value that triggers the bonus
    pub win_tile: u32,
    /// Bonus added on every step the board holds `win_tile` or better
    pub win_bonus: f64,
    /// Reward for a move that leaves the board unchanged
    pub invalid_move_penalty: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            win_tile: 2048,
            win_bonus: 1000.0,
            invalid_move_penalty: -1.0,
        }
    }
}

/// Log-scaled merge reward.
///
/// With `m` the sum of `value / 2` over every occupied cell of the post-move
/// board (not only the merged tiles), the merge term is `m * log2(m + 1)`.
/// The win bonus is paid on every step the condition holds.
#[derive(Debug, Clone, Default)]
pub struct MergeReward {
    config: RewardConfig,
}

impl MergeReward {
    pub fn new(config: RewardConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RewardConfig {
        &self.config
    }
}

impl RewardFunction for MergeReward {
    type State = Grid;

    /// `prev` is the board before the move, `current` the board after
    /// sliding and merging but before the new tile spawns.
    fn compute(&self, prev: &Grid, current: &Grid) -> Reward {
        let mut reward = Reward::default();
        if prev == current {
            reward.add(INVALID_MOVE, self.config.invalid_move_penalty);
            return reward;
        }

        let merges = current.merge_sum();
        let merge_term = if merges > 0 {
            let m = merges as f64;
            m * (m + 1.0).log2()
        } else {
            0.0
        };
        reward.add(MERGE, merge_term);

        if current.max_tile() >= self.config.win_tile {
            reward.add(WIN_BONUS, self.config.win_bonus);
        }
        reward
    }

    fn components(&self) -> Vec<RewardComponentDef> {
        vec![
            RewardComponentDef {
                name: MERGE.into(),
                description: Some("m * log2(m + 1), m = sum of value/2 over the board".into()),
                range: Some([0.0, f64::INFINITY]),
                default_weight: 1.0,
            },
            RewardComponentDef {
                name: WIN_BONUS.into(),
                description: Some(format!(
                    "{} while a {} tile is on the board",
                    self.config.win_bonus, self.config.win_tile
                )),
                range: Some([0.0, self.config.win_bonus]),
                default_weight: 1.0,
            },
            RewardComponentDef {
                name: INVALID_MOVE.into(),
                description: Some("Penalty for a move that changes nothing".into()),
                range: Some([self.config.invalid_move_penalty, 0.0]),
                default_weight: 1.0,
            },
        ]
    }
}
