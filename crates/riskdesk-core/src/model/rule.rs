//! Rule records

use super::id::RecordId;
use super::numeric::f64_lenient;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity attached to a rule and propagated to its results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlagLevel {
    Low,
    Medium,
    High,
    /// Any level the backend reports that the console does not know
    #[serde(other)]
    Unknown,
}

impl FlagLevel {
    /// Levels an operator may assign to a new rule
    pub const ASSIGNABLE: [FlagLevel; 3] = [FlagLevel::Low, FlagLevel::Medium, FlagLevel::High];

    /// Ordering weight, higher is more severe
    pub fn severity(&self) -> u8 {
        match self {
            FlagLevel::Unknown => 0,
            FlagLevel::Low => 1,
            FlagLevel::Medium => 2,
            FlagLevel::High => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FlagLevel::Low => "Low",
            FlagLevel::Medium => "Medium",
            FlagLevel::High => "High",
            FlagLevel::Unknown => "Unknown",
        }
    }
}

impl Default for FlagLevel {
    fn default() -> Self {
        FlagLevel::Low
    }
}

impl fmt::Display for FlagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlagLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(FlagLevel::Low),
            "medium" => Ok(FlagLevel::Medium),
            "high" => Ok(FlagLevel::High),
            _ => Err(CoreError::UnknownFlagLevel(s.to_string())),
        }
    }
}

/// A rule as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub condition: String,
    #[serde(default)]
    pub flag_level: FlagLevel,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub risk_increment: f64,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Request body of `POST /rules`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRule {
    pub name: String,
    pub condition: String,
    pub flag_level: FlagLevel,
    /// Sent exactly as the operator typed it, trimmed
    pub risk_increment: String,
    pub description: String,
}
