//! Evaluation trigger request

use super::id::RecordId;
use serde::{Deserialize, Serialize};

/// Body of the batch evaluation trigger
///
/// Both lists empty means "evaluate every active rule against every stored
/// transaction", which is what the console sends unless the operator narrows
/// the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRequest {
    #[serde(default)]
    pub rule_ids: Vec<RecordId>,
    #[serde(default)]
    pub transaction_ids: Vec<RecordId>,
}

impl EvaluationRequest {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_rules(mut self, ids: impl IntoIterator<Item = RecordId>) -> Self {
        self.rule_ids.extend(ids);
        self
    }

    pub fn with_transactions(mut self, ids: impl IntoIterator<Item = RecordId>) -> Self {
        self.transaction_ids.extend(ids);
        self
    }

    /// True when no rule or transaction filter is set
    pub fn is_unscoped(&self) -> bool {
        self.rule_ids.is_empty() && self.transaction_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_wire_shape() {
        let json = serde_json::to_value(EvaluationRequest::all()).unwrap();
        assert_eq!(json, serde_json::json!({"ruleIds": [], "transactionIds": []}));
    }

    #[test]
    fn test_scoped_request() {
        let req = EvaluationRequest::all()
            .with_rules([RecordId::Int(1), RecordId::Int(2)])
            .with_transactions([RecordId::from("tx-9")]);
        assert!(!req.is_unscoped());
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"ruleIds": [1, 2], "transactionIds": ["tx-9"]})
        );
    }
}
