//! Clause types for the condition builder

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Record source a clause refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    /// Raw transaction records
    Transaction,
    /// Precomputed per-user summary aggregates
    UserSummary,
}

impl Namespace {
    pub const ALL: [Namespace; 2] = [Namespace::Transaction, Namespace::UserSummary];

    /// Token prepended to field names in the rendered predicate
    pub fn prefix(&self) -> &'static str {
        match self {
            Namespace::Transaction => "t.",
            Namespace::UserSummary => "uts.",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Namespace::Transaction => "Transaction",
            Namespace::UserSummary => "User Summary",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Namespace {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "t" | "txn" | "transaction" => Ok(Namespace::Transaction),
            "uts" | "summary" | "user_summary" | "user summary" | "usersummary" => {
                Ok(Namespace::UserSummary)
            }
            other => Err(CoreError::UnknownNamespace(other.to_string())),
        }
    }
}

/// Comparison operator of a clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOp {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "!=")]
    Ne,
}

impl ComparisonOp {
    /// All operators in the order they are offered to the operator
    pub const ALL: [ComparisonOp; 6] = [
        ComparisonOp::Eq,
        ComparisonOp::Ge,
        ComparisonOp::Le,
        ComparisonOp::Gt,
        ComparisonOp::Lt,
        ComparisonOp::Ne,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::Ge => ">=",
            ComparisonOp::Le => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Lt => "<",
            ComparisonOp::Ne => "!=",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComparisonOp {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComparisonOp::ALL
            .into_iter()
            .find(|op| op.as_str() == s.trim())
            .ok_or_else(|| CoreError::UnknownOperator(s.to_string()))
    }
}

/// Literal value on the right-hand side of a clause
///
/// Text typed by an operator stays `Text`; `Bool` and `Number` exist for
/// programmatic construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Literal {
    pub fn text(value: impl Into<String>) -> Self {
        Literal::Text(value.into())
    }

    /// True for an empty (or whitespace-only) text literal
    pub fn is_blank(&self) -> bool {
        matches!(self, Literal::Text(s) if s.trim().is_empty())
    }
}

impl Default for Literal {
    fn default() -> Self {
        Literal::Text(String::new())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Number(n) => write!(f, "{}", n),
            Literal::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Number(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Number(value as f64)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Text(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Text(value)
    }
}

/// One typed comparison inside the builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub namespace: Namespace,
    /// Catalog key of the field (without namespace prefix)
    pub field: String,
    pub operator: ComparisonOp,
    pub literal: Literal,
}

impl Clause {
    pub fn new(
        namespace: Namespace,
        field: impl Into<String>,
        operator: ComparisonOp,
        literal: impl Into<Literal>,
    ) -> Self {
        Self {
            namespace,
            field: field.into(),
            operator,
            literal: literal.into(),
        }
    }
}

/// A single-attribute edit applied through [`ConditionBuilder::update_clause`]
///
/// [`ConditionBuilder::update_clause`]: super::ConditionBuilder::update_clause
#[derive(Debug, Clone, PartialEq)]
pub enum ClauseEdit {
    /// Switch namespace; the field resets to the new catalog's first entry
    Namespace(Namespace),
    Field(String),
    Operator(ComparisonOp),
    Literal(Literal),
}
