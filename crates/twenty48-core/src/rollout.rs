//! Random-action rollouts

use rand::Rng;
use tracing::debug;

use crate::action::Direction;
use crate::env::Environment;
use crate::error::Result;
use crate::observation::{EpisodeSummary, TerminationReason};

/// Play one episode with uniformly random actions.
///
/// Resets `env`, then steps until the episode ends or `max_steps` actions
/// have been taken.
pub fn simulate_episode<E, R>(
    env: &mut E,
    rng: &mut R,
    max_steps: Option<u64>,
) -> Result<EpisodeSummary>
where
    E: Environment + ?Sized,
    R: Rng + ?Sized,
{
    let mut board = env.reset(None);
    let mut total_reward = 0.0;
    let mut steps = 0u64;
    let mut reason = TerminationReason::NoMovesLeft;

    while !env.is_done() {
        if max_steps.is_some_and(|cap| steps >= cap) {
            reason = TerminationReason::StepLimit;
            break;
        }
        let action = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        let result = env.step(action)?;
        total_reward += result.reward;
        steps += 1;
        board = result.observation;
    }

    debug!("Rollout ended after {} steps ({:?})", steps, reason);
    Ok(EpisodeSummary {
        total_reward,
        score: env.score(),
        steps,
        max_tile: board.max_tile(),
        final_board: board,
        termination_reason: reason,
    })
}
