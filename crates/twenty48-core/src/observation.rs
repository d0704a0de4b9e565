//! Observation types

use serde::{Deserialize, Serialize};

use crate::board::Grid;
use crate::reward::RewardComponents;

/// Result of a simulation step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    /// Steps taken this episode, including this one
    pub step_id: u64,

    /// Copy of the board after the step
    pub observation: Grid,

    /// Scalar reward signal
    pub reward: f64,

    /// Decomposed reward for analysis
    #[serde(default)]
    pub reward_components: RewardComponents,

    /// No move can change the board any more
    pub done: bool,

    /// Whether the move altered the board
    pub changed: bool,

    /// Cumulative reward this episode
    pub score: f64,

    /// Why episode ended
    #[serde(skip_serializing_if = "Option::is_none")]
    pub termination_reason: Option<TerminationReason>,
}

/// Why an episode ended
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// Board is full and every direction is a no-op
    NoMovesLeft,
    /// Rollout stopped at its step cap
    StepLimit,
}

/// Totals for one finished rollout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub total_reward: f64,
    /// Environment score when the rollout stopped
    pub score: f64,
    pub steps: u64,
    pub max_tile: u32,
    pub final_board: Grid,
    pub termination_reason: TerminationReason,
}
