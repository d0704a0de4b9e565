//! Environment configuration

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::board::SpawnPolicy;
use crate::error::{Result, Twenty48Error};
use crate::reward::RewardConfig;

/// Environment variable holding the RNG seed
pub const SEED_ENV: &str = "TWENTY48_SEED";
/// Environment variable holding the probability of spawning a 4
pub const FOUR_PROBABILITY_ENV: &str = "TWENTY48_FOUR_PROBABILITY";

/// Configuration for a 2048 environment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// RNG seed; `None` seeds from system entropy
    pub seed: Option<u64>,
    /// Spawned tile distribution
    pub spawn: SpawnPolicy,
    /// Reward constants
    pub reward: RewardConfig,
    /// Reject `step` after the episode ended instead of returning the no-op penalty
    pub strict_termination: bool,
}

impl EnvConfig {
    /// Config with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Defaults overridden by `TWENTY48_SEED` and `TWENTY48_FOUR_PROBABILITY`.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(SEED_ENV) {
            match raw.trim().parse() {
                Ok(seed) => config.seed = Some(seed),
                Err(e) => warn!("Ignoring {}={:?}: {}", SEED_ENV, raw, e),
            }
        }
        if let Ok(raw) = std::env::var(FOUR_PROBABILITY_ENV) {
            match raw.trim().parse() {
                Ok(p) => config.spawn.four_probability = p,
                Err(e) => warn!("Ignoring {}={:?}: {}", FOUR_PROBABILITY_ENV, raw, e),
            }
        }
        config
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_spawn(mut self, spawn: SpawnPolicy) -> Self {
        self.spawn = spawn;
        self
    }

    pub fn with_reward(mut self, reward: RewardConfig) -> Self {
        self.reward = reward;
        self
    }

    pub fn with_strict_termination(mut self, strict: bool) -> Self {
        self.strict_termination = strict;
        self
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        let p = self.spawn.four_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(Twenty48Error::InvalidConfig(format!(
                "four_probability must be within [0, 1], got {}",
                p
            )));
        }
        let win_tile = self.reward.win_tile;
        if win_tile < 2 || !win_tile.is_power_of_two() {
            return Err(Twenty48Error::InvalidConfig(format!(
                "win_tile must be a power of two >= 2, got {}",
                win_tile
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = EnvConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.seed, None);
        assert_eq!(config.spawn.four_probability, 0.5);
        assert_eq!(config.reward.win_tile, 2048);
        assert!(!config.strict_termination);
    }

    #[test]
    fn test_rejects_bad_probability() {
        let config = EnvConfig::default().with_spawn(SpawnPolicy {
            four_probability: 1.5,
        });
        assert!(matches!(
            config.validate(),
            Err(Twenty48Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_bad_win_tile() {
        let config = EnvConfig::default().with_reward(RewardConfig {
            win_tile: 1000,
            ..Default::default()
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json() {
        let config: EnvConfig =
            serde_json::from_str(r#"{"seed": 5, "spawn": {"four_probability": 0.1}}"#).unwrap();
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.spawn, SpawnPolicy::classic());
        assert_eq!(config.reward, RewardConfig::default());
    }
}
