//! Engine tuning parameters

use core::fmt;
use serde::{Deserialize, Serialize};

/// Thresholds for identification and ensemble weighting
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Observations needed before a strategy can be identified
    pub lock_min_total: u32,
    /// Accuracy needed before a strategy can be identified
    pub lock_min_accuracy: f64,
    /// Lead over the runner-up that is enough to identify early
    pub lock_min_lead: f64,
    /// Observations after which no lead is required
    pub lock_seasoned_total: u32,
    /// Observations needed before an identification can be dropped
    pub unlock_min_total: u32,
    /// Identification is dropped below this accuracy
    pub unlock_below_accuracy: f64,
    /// Ensemble weight of a strategy with no track record
    pub prior_weight: f64,
    /// Weight margin that makes the ensemble follow a single strategy
    pub lean_margin: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lock_min_total: 3,
            lock_min_accuracy: 0.6,
            lock_min_lead: 0.15,
            lock_seasoned_total: 6,
            unlock_min_total: 4,
            unlock_below_accuracy: 0.52,
            prior_weight: 0.2,
            lean_margin: 0.5,
        }
    }
}

impl EngineConfig {
    /// Parse from JSON. Missing fields take their default.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let probabilities = [
            ("lock_min_accuracy", self.lock_min_accuracy),
            ("lock_min_lead", self.lock_min_lead),
            ("unlock_below_accuracy", self.unlock_below_accuracy),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        let weights = [("prior_weight", self.prior_weight), ("lean_margin", self.lean_margin)];
        for (field, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        Ok(())
    }
}

/// Errors that can occur while loading an `EngineConfig`.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Input is not valid JSON for this structure.
    Parse(String),
    /// A numeric field is outside its allowed range.
    OutOfRange { field: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "invalid engine config: {}", msg),
            ConfigError::OutOfRange { field, value } =>
                write!(f, "{} = {} is out of range", field, value),
        }
    }
}

impl std::error::Error for ConfigError {}
