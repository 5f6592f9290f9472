//! Rule creation form

use riskdesk_client::{AdminApi, ClientError, ClientResult, ViewScope};
use riskdesk_core::{Catalogs, ConditionBuilder, NewRule, Rule, RuleDraft};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

pub const CREATED: &str = "Rule created successfully!";
pub const CREATE_FAILED: &str = "Failed to create rule";

/// Where the rule condition comes from
#[derive(Debug)]
enum ConditionSource {
    /// Typed directly into the draft
    Manual,
    /// Rendered by a builder; the listener mirrors each predicate into `latest`
    Builder {
        builder: ConditionBuilder,
        latest: Arc<Mutex<String>>,
    },
}

#[derive(Debug)]
pub struct RuleForm {
    draft: RuleDraft,
    source: ConditionSource,
    error: Option<String>,
    success: Option<String>,
    scope: ViewScope,
}

impl Default for RuleForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleForm {
    /// A form with a hand-typed condition
    pub fn new() -> Self {
        Self {
            draft: RuleDraft::default(),
            source: ConditionSource::Manual,
            error: None,
            success: None,
            scope: ViewScope::new(),
        }
    }

    /// A form whose condition is composed with the builder
    pub fn with_builder(catalogs: Arc<Catalogs>) -> Self {
        let mut form = Self::new();
        form.use_builder(ConditionBuilder::new(catalogs));
        form
    }

    /// Switch to builder mode; the draft condition follows the builder from now on
    pub fn use_builder(&mut self, mut builder: ConditionBuilder) {
        let latest = Arc::new(Mutex::new(builder.render()));
        let sink = Arc::clone(&latest);
        builder.set_listener(move |predicate| {
            if let Ok(mut slot) = sink.lock() {
                *slot = predicate.to_string();
            }
        });
        self.draft.condition = builder.render();
        self.source = ConditionSource::Builder { builder, latest };
    }

    /// Switch to typing the condition by hand, keeping the current text
    pub fn use_manual(&mut self) {
        self.sync_condition();
        self.source = ConditionSource::Manual;
    }

    pub fn builder(&self) -> Option<&ConditionBuilder> {
        match &self.source {
            ConditionSource::Builder { builder, .. } => Some(builder),
            ConditionSource::Manual => None,
        }
    }

    pub fn builder_mut(&mut self) -> Option<&mut ConditionBuilder> {
        match &mut self.source {
            ConditionSource::Builder { builder, .. } => Some(builder),
            ConditionSource::Manual => None,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    /// Type a condition by hand; leaves builder mode
    pub fn set_condition(&mut self, condition: impl Into<String>) {
        self.source = ConditionSource::Manual;
        self.draft.condition = condition.into();
    }

    pub fn set_flag_level(&mut self, level: impl Into<String>) {
        self.draft.flag_level = level.into();
    }

    pub fn set_risk_increment(&mut self, value: impl Into<String>) {
        self.draft.risk_increment = value.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    /// Current draft, with the builder's latest predicate applied
    pub fn draft(&mut self) -> &RuleDraft {
        self.sync_condition();
        &self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn close(&self) {
        self.scope.close();
    }

    fn sync_condition(&mut self) {
        if let ConditionSource::Builder { latest, .. } = &self.source {
            if let Ok(predicate) = latest.lock() {
                self.draft.condition = predicate.clone();
            }
        }
    }

    /// Validate locally without sending anything
    pub fn validate(&mut self) -> Result<NewRule, String> {
        self.sync_condition();
        let rule = self.draft.validate().map_err(|e| e.to_string())?;

        if let Some(builder) = self.builder() {
            let issues = builder.issues();
            if !issues.is_empty() {
                let details: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
                return Err(format!("Condition has problems: {}", details.join("; ")));
            }
        }
        Ok(rule)
    }

    /// Validate, then create the rule with a single request
    ///
    /// On success the draft is cleared (flag level back to `Low`) and the
    /// builder starts over.
    pub async fn submit(&mut self, api: &dyn AdminApi) -> ClientResult<Rule> {
        self.error = None;
        self.success = None;

        let rule = match self.validate() {
            Ok(rule) => rule,
            Err(message) => {
                self.error = Some(message.clone());
                return Err(ClientError::Validation(message));
            }
        };

        match self.scope.run(api.create_rule(&rule)).await {
            Ok(created) => {
                info!(rule_id = %created.id, "Rule submitted");
                self.success = Some(CREATED.to_string());
                self.reset();
                Ok(created)
            }
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(e) => {
                warn!(error = %e, "Rule creation failed");
                self.error = Some(e.server_message().unwrap_or(CREATE_FAILED).to_string());
                Err(e)
            }
        }
    }

    /// Clear every field and restart the builder
    pub fn reset(&mut self) {
        self.draft.reset();
        if let ConditionSource::Builder { builder, .. } = &mut self.source {
            builder.reset();
        }
        self.sync_condition();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskdesk_core::{ClauseEdit, ComparisonOp};

    #[test]
    fn test_builder_drives_condition() {
        let mut form = RuleForm::with_builder(Arc::new(Catalogs::standard()));
        {
            let builder = form.builder_mut().unwrap();
            builder
                .update_clause(0, ClauseEdit::Operator(ComparisonOp::Gt))
                .unwrap();
            builder
                .update_clause(0, ClauseEdit::Literal("30".into()))
                .unwrap();
        }
        assert_eq!(form.draft().condition, "t.age > 30");
    }

    #[test]
    fn test_validate_reports_first_failure() {
        let mut form = RuleForm::new();
        assert_eq!(form.validate().unwrap_err(), "Name is required");

        form.set_name("Large transfer");
        form.set_condition("t.trans_amt > 100000");
        form.set_risk_increment("0");
        assert_eq!(
            form.validate().unwrap_err(),
            "Risk increment must be a positive number"
        );
    }

    #[test]
    fn test_builder_issues_block_validation() {
        let mut form = RuleForm::with_builder(Arc::new(Catalogs::standard()));
        form.set_name("n");
        form.set_risk_increment("1");
        // Default clause has an empty literal
        let err = form.validate().unwrap_err();
        assert!(err.starts_with("Condition has problems"), "{}", err);
    }

    #[test]
    fn test_manual_switch_keeps_text() {
        let mut form = RuleForm::with_builder(Arc::new(Catalogs::standard()));
        form.builder_mut()
            .unwrap()
            .update_clause(0, ClauseEdit::Literal("40".into()))
            .unwrap();
        form.use_manual();
        assert!(form.builder().is_none());
        assert_eq!(form.draft().condition, "t.age = 40");
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut form = RuleForm::with_builder(Arc::new(Catalogs::standard()));
        form.set_name("n");
        form.set_flag_level("High");
        form.builder_mut().unwrap().add_clause();
        form.reset();

        let draft = form.draft().clone();
        assert_eq!(draft.name, "");
        assert_eq!(draft.flag_level, "Low");
        assert_eq!(draft.condition, "t.age = ");
        assert_eq!(form.builder().unwrap().len(), 1);
    }
}
