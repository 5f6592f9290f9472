//! Rules board: list, inspect and toggle rules

use riskdesk_client::{AdminApi, ClientError, ClientResult, ViewScope};
use riskdesk_core::{RecordId, Rule};
use tracing::{debug, info, warn};

pub const FETCH_FAILED: &str = "Failed to fetch rules";
pub const TOGGLE_FAILED: &str = "Toggle failed, reverting";

/// An optimistic active-flag flip awaiting the backend's answer
///
/// Resolve it exactly once with [`RulesBoard::confirm`] or
/// [`RulesBoard::revert`].
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub struct PendingToggle {
    id: RecordId,
    previous: bool,
}

impl PendingToggle {
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Active flag before the flip
    pub fn previous(&self) -> bool {
        self.previous
    }
}

#[derive(Debug, Default)]
pub struct RulesBoard {
    rules: Vec<Rule>,
    error: Option<String>,
    scope: ViewScope,
}

impl RulesBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule(&self, id: &RecordId) -> Option<&Rule> {
        self.rules.iter().find(|r| &r.id == id)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Close the view; calls still in flight are discarded
    pub fn close(&self) {
        self.scope.close();
    }

    /// Fetch all rules, replacing the current list
    pub async fn load(&mut self, api: &dyn AdminApi) -> ClientResult<()> {
        self.error = None;
        match self.scope.run(api.list_rules()).await {
            Ok(rules) => {
                debug!(count = rules.len(), "Rules loaded");
                self.rules = rules;
                Ok(())
            }
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(e) => {
                warn!(error = %e, "Failed to fetch rules");
                self.error = Some(FETCH_FAILED.to_string());
                Err(e)
            }
        }
    }

    /// Flip the rule's active flag locally
    ///
    /// Returns `None` when no rule with `id` is listed.
    pub fn begin_toggle(&mut self, id: &RecordId) -> Option<PendingToggle> {
        let rule = self.rules.iter_mut().find(|r| &r.id == id)?;
        let previous = rule.is_active;
        rule.is_active = !previous;
        self.error = None;
        Some(PendingToggle {
            id: id.clone(),
            previous,
        })
    }

    /// Keep the flip; adopt the backend's record when it sent one
    pub fn confirm(&mut self, pending: PendingToggle, server_rule: Option<Rule>) {
        if let Some(updated) = server_rule {
            if let Some(rule) = self.rules.iter_mut().find(|r| r.id == pending.id) {
                *rule = updated;
            }
        }
    }

    /// Restore the exact prior flag and report the failure
    pub fn revert(&mut self, pending: PendingToggle) {
        if let Some(rule) = self.rules.iter_mut().find(|r| r.id == pending.id) {
            rule.is_active = pending.previous;
        }
        self.error = Some(TOGGLE_FAILED.to_string());
    }

    /// Optimistically toggle a rule and reconcile with the backend
    ///
    /// With several toggles in flight the last response applied wins.
    pub async fn toggle(&mut self, api: &dyn AdminApi, id: &RecordId) -> ClientResult<()> {
        let pending = self
            .begin_toggle(id)
            .ok_or_else(|| ClientError::Validation(format!("Rule {} is not listed", id)))?;

        match self.scope.run(api.toggle_rule_active(id)).await {
            Ok(server_rule) => {
                info!(rule_id = %id, active = !pending.previous(), "Rule toggled");
                self.confirm(pending, server_rule);
                Ok(())
            }
            // The view is gone; nothing to reconcile
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(e) => {
                warn!(rule_id = %id, error = %e, "Toggle failed");
                self.revert(pending);
                Err(e)
            }
        }
    }

    /// Fetch one rule's full record
    pub async fn detail(&self, api: &dyn AdminApi, id: &RecordId) -> ClientResult<Rule> {
        self.scope.run(api.get_rule(id)).await
    }
}
