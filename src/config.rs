//! Game configuration.
//!
//! Every field has a default so a partial JSON document is enough to
//! override a single setting.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::{TroopCounts, TroopType};

/// Maximum troops of each type engaged on one flank per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombatWidth(pub TroopCounts);

impl CombatWidth {
    pub const fn standard() -> Self {
        CombatWidth(TroopCounts::new(400, 10, 20))
    }

    /// The wider front used by the large-battle variant.
    pub const fn expanded() -> Self {
        CombatWidth(TroopCounts::new(1000, 20, 40))
    }

    pub fn get(&self, troop: TroopType) -> u32 {
        self.0[troop]
    }

    pub fn from_name(s: &str) -> Option<CombatWidth> {
        match s {
            "standard" => Some(CombatWidth::standard()),
            "expanded" => Some(CombatWidth::expanded()),
            _ => None,
        }
    }
}

impl Default for CombatWidth {
    fn default() -> Self {
        CombatWidth::standard()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub combat_width: CombatWidth,
    /// Milliseconds a real-time driver waits between battle ticks. Zero runs flat out.
    pub tick_interval_ms: u64,
    /// Split the attacker across flanks automatically instead of prompting.
    pub auto_allocate_attacker: bool,
    /// Turn rotations performed at construction without reinforcements.
    pub priming_turns: u32,
    pub max_actions_per_turn: usize,
    pub symmetrize_adjacency: bool,
    /// Heavy weapons fire adds crater weight to the region being fired on.
    pub crater_accrual: bool,
    /// RNG seed; 0 draws from entropy.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            combat_width: CombatWidth::standard(),
            tick_interval_ms: 200,
            auto_allocate_attacker: false,
            priming_turns: 2,
            max_actions_per_turn: 3,
            symmetrize_adjacency: true,
            crater_accrual: true,
            seed: 0,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("invalid value '{value}' for option {name}")]
    InvalidValue { name: String, value: String },
}

impl GameConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        GameConfig::from_json_str(&text)
    }

    /// Applies a named protocol option (`setoption name <name> value <value>`).
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        };
        match name {
            "TickInterval" => self.tick_interval_ms = value.parse().map_err(|_| invalid())?,
            "AutoAllocate" => self.auto_allocate_attacker = value.parse().map_err(|_| invalid())?,
            "CombatWidth" => self.combat_width = CombatWidth::from_name(value).ok_or_else(invalid)?,
            "Seed" => self.seed = value.parse().map_err(|_| invalid())?,
            "CraterAccrual" => self.crater_accrual = value.parse().map_err(|_| invalid())?,
            "SymmetrizeAdjacency" => {
                self.symmetrize_adjacency = value.parse().map_err(|_| invalid())?
            }
            other => return Err(ConfigError::UnknownOption(other.to_string())),
        }
        Ok(())
    }
}
