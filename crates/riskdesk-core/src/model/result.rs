//! Evaluation result rows

use super::id::RecordId;
use super::numeric::u64_lenient;
use super::rule::FlagLevel;
use serde::{Deserialize, Serialize};

/// Aggregated flag outcome for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub username: String,
    pub flag: FlagLevel,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub transaction_count: u64,
    #[serde(default, alias = "userId")]
    pub user_id: Option<RecordId>,
}

impl ResultRow {
    /// Identifier used for the drill-down route; falls back to the username
    pub fn drill_down_id(&self) -> String {
        match &self.user_id {
            Some(id) => id.to_string(),
            None => self.username.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_result_row() {
        let json = r#"{"username": "asha", "flag": "Medium", "transaction_count": "12", "user_id": 77}"#;
        let row: ResultRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.flag, FlagLevel::Medium);
        assert_eq!(row.transaction_count, 12);
        assert_eq!(row.drill_down_id(), "77");
    }

    #[test]
    fn test_drill_down_falls_back_to_username() {
        let json = r#"{"username": "ravi", "flag": "Low", "transaction_count": 1}"#;
        let row: ResultRow = serde_json::from_str(json).unwrap();
        assert!(row.user_id.is_none());
        assert_eq!(row.drill_down_id(), "ravi");
    }

    #[test]
    fn test_negative_count_rejected() {
        let json = r#"{"username": "x", "flag": "Low", "transaction_count": -1}"#;
        assert!(serde_json::from_str::<ResultRow>(json).is_err());
    }
}
