// src/config.rs
//! Engine settings owned by the caller
//!
//! The pricing and payoff functions never read these values on their own;
//! a presentation layer loads an [`EngineConfig`] (defaults or JSON) and
//! passes the grid and tolerance explicitly to the functions it calls.

use crate::analytics::parity::DEFAULT_PARITY_TOLERANCE;
use crate::error::{validation::*, OptionError, OptionResult};
use crate::math_utils::linspace;
use serde::{Deserialize, Serialize};

/// Terminal-price grid used to sample payoff and profit curves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub lower: f64,
    pub upper: f64,
    pub points: usize,
}

impl GridConfig {
    pub fn validate(&self) -> OptionResult<()> {
        validate_non_negative("grid.lower", self.lower)?;
        validate_finite("grid.upper", self.upper)?;
        validate_ordered("grid.lower", self.lower, "grid.upper", self.upper)?;
        if self.points < 2 {
            return Err(OptionError::InvalidConfiguration {
                field: "grid.points".to_string(),
                reason: "must be at least 2".to_string(),
            });
        }
        Ok(())
    }

    /// Evenly spaced, strictly increasing price samples
    pub fn prices(&self) -> OptionResult<Vec<f64>> {
        self.validate()?;
        Ok(linspace(self.lower, self.upper, self.points))
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            lower: 50.0,
            upper: 150.0,
            points: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub grid: GridConfig,
    pub parity_tolerance: f64,
}

impl EngineConfig {
    pub fn validate(&self) -> OptionResult<()> {
        self.grid.validate()?;
        validate_positive("parity_tolerance", self.parity_tolerance)?;
        Ok(())
    }

    /// Parse and validate a JSON document; missing fields take their defaults
    pub fn from_json_str(json: &str) -> OptionResult<Self> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| OptionError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> OptionResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| OptionError::ConfigParse(e.to_string()))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            grid: GridConfig::default(),
            parity_tolerance: DEFAULT_PARITY_TOLERANCE,
        }
    }
}
