//! Advisor configuration
//!
//! Everything tunable about the advisor lives here: the pattern weight table
//! and the constants that combine pattern scores into a move choice. Both
//! deserialize from JSON with every field optional.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::eval::WeightTable;

/// Constants combining pattern scores into a decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Threat evaluator: factor on the opponent's pattern score
    pub defense_weight: f64,
    /// Threat evaluator: factor on the run-continuity estimate
    pub continuity_weight: f64,
    /// Threat evaluator: factor on the advisor's own pattern score
    pub attack_weight: f64,
    /// Threat evaluator: multiplier for cells flagged as diagonal threats
    pub diagonal_threat_multiplier: f64,
    /// Continuity estimate: multiplier for diagonal runs of three or more
    pub diagonal_run_multiplier: f64,
    /// Cells scanned each way when flagging diagonal threats
    pub diagonal_threat_reach: usize,
    /// Attack selector: factor on the opponent's pattern score
    pub attack_defense_weight: f64,
    /// Attack selector: pick uniformly among this many best candidates
    pub top_candidates: usize,
    /// Opening: maximum offset from the centre on each axis
    pub opening_radius: u8,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            defense_weight: 2.0,
            continuity_weight: 3.0,
            attack_weight: 1.0,
            diagonal_threat_multiplier: 1.5,
            diagonal_run_multiplier: 1.5,
            diagonal_threat_reach: 4,
            attack_defense_weight: 1.5,
            top_candidates: 2,
            opening_radius: 1,
        }
    }
}

impl Tuning {
    pub fn validate(&self) -> std::result::Result<(), String> {
        let factors = [
            ("defense_weight", self.defense_weight),
            ("continuity_weight", self.continuity_weight),
            ("attack_weight", self.attack_weight),
            ("diagonal_threat_multiplier", self.diagonal_threat_multiplier),
            ("diagonal_run_multiplier", self.diagonal_run_multiplier),
            ("attack_defense_weight", self.attack_defense_weight),
        ];
        for (name, value) in factors {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{name} must be a positive number, got {value}"));
            }
        }
        if self.top_candidates == 0 {
            return Err("top_candidates must be at least 1".to_string());
        }
        if self.diagonal_threat_reach == 0 {
            return Err("diagonal_threat_reach must be at least 1".to_string());
        }
        if self.opening_radius > 7 {
            return Err(format!("opening_radius {} leaves the board", self.opening_radius));
        }
        Ok(())
    }
}

/// Full advisor configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub weights: WeightTable,
    pub tuning: Tuning,
}

impl AdvisorConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AdvisorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        self.weights.validate().map_err(Error::InvalidConfig)?;
        self.tuning.validate().map_err(Error::InvalidConfig)
    }

    /// Split into the shareable weight table and the tuning constants
    pub fn into_parts(self) -> (Arc<WeightTable>, Tuning) {
        (Arc::new(self.weights), self.tuning)
    }
}
