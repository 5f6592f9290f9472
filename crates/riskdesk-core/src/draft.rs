//! Rule drafts and their local validation

use crate::model::{FlagLevel, NewRule};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Local validation failure of a rule draft
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("Name is required")]
    MissingName,

    #[error("Condition is required")]
    MissingCondition,

    #[error("Flag level is required")]
    MissingFlagLevel,

    #[error("Flag level must be Low, Medium or High")]
    InvalidFlagLevel(String),

    #[error("Risk increment is required")]
    MissingRiskIncrement,

    #[error("Risk increment must be a positive number")]
    NonPositiveRiskIncrement(String),
}

/// Form fields of a rule being created, as typed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDraft {
    pub name: String,
    pub condition: String,
    pub flag_level: String,
    pub risk_increment: String,
    pub description: String,
}

impl Default for RuleDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            condition: String::new(),
            flag_level: FlagLevel::Low.to_string(),
            risk_increment: String::new(),
            description: String::new(),
        }
    }
}

impl RuleDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the draft; the first failing field wins
    pub fn validate(&self) -> Result<NewRule, DraftError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DraftError::MissingName);
        }

        let condition = self.condition.trim();
        if condition.is_empty() {
            return Err(DraftError::MissingCondition);
        }

        let flag_level = self.flag_level.trim();
        if flag_level.is_empty() {
            return Err(DraftError::MissingFlagLevel);
        }
        let flag_level: FlagLevel = flag_level
            .parse()
            .map_err(|_| DraftError::InvalidFlagLevel(flag_level.to_string()))?;

        let risk_increment = self.risk_increment.trim();
        if risk_increment.is_empty() {
            return Err(DraftError::MissingRiskIncrement);
        }
        match risk_increment.parse::<f64>() {
            Ok(n) if n.is_finite() && n > 0.0 => {}
            _ => {
                return Err(DraftError::NonPositiveRiskIncrement(
                    risk_increment.to_string(),
                ))
            }
        }

        Ok(NewRule {
            name: name.to_string(),
            condition: condition.to_string(),
            flag_level,
            risk_increment: risk_increment.to_string(),
            description: self.description.trim().to_string(),
        })
    }

    /// Clear every field; flag level goes back to `Low`
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
