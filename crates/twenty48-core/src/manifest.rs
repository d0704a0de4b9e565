//! Environment manifest types

use serde::{Deserialize, Serialize};

use crate::action::ActionSpace;
use crate::board::SIZE;
use crate::reward::RewardComponentDef;

/// Manifest describing the environment contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvManifest {
    /// Environment name
    pub name: String,
    /// Crate version
    pub version: String,
    /// Action space
    pub action_space: ActionSpace,
    /// Observation shape (rows, columns)
    pub observation_shape: [usize; 2],
    /// Available reward components
    #[serde(default)]
    pub reward_components: Vec<RewardComponentDef>,
    /// Same seed and actions reproduce the same episode
    #[serde(default)]
    pub deterministic: bool,
    /// Seed in use, when fixed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for EnvManifest {
    fn default() -> Self {
        Self {
            name: "2048".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            action_space: ActionSpace::directions(),
            observation_shape: [SIZE, SIZE],
            reward_components: vec![],
            deterministic: false,
            seed: None,
        }
    }
}
