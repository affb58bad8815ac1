use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};

/// Episode rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Side length of the square board.
    pub grid_size: i32,
    /// Stall timeout fires once this many ticks pass without growth.
    pub stall_limit: u32,
    /// Oscillation timeout fires once this many turns happen without growth.
    pub turn_limit: u32,
    /// Rejection-sampling budget for food placement; 0 picks `4 * N^2`.
    pub food_attempts: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { grid_size: 20, stall_limit: 100, turn_limit: 10, food_attempts: 0 }
    }
}

impl SimConfig {
    pub fn new(grid_size: i32) -> Self {
        Self { grid_size, ..Default::default() }
    }

    pub fn small() -> Self {
        Self::new(10)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_size <= 0 {
            return Err(SimError::Configuration(format!("grid size must be positive, got {}", self.grid_size)));
        }
        if self.grid_size < 2 {
            return Err(SimError::Configuration("a 1x1 grid has no room for food".into()));
        }
        Ok(())
    }

    pub fn effective_food_attempts(&self) -> u32 {
        if self.food_attempts > 0 {
            self.food_attempts
        } else {
            let n = self.grid_size.max(0) as u32;
            n.saturating_mul(n).saturating_mul(4)
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: SimConfig =
            serde_json::from_str(text).map_err(|e| SimError::Configuration(format!("bad config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
