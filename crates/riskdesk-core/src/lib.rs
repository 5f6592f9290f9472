//! RiskDesk Core - Core types for the RiskDesk operator console
//!
//! This crate provides the pieces of the console that do not touch the network:
//! - The condition builder that turns typed clauses into a rule predicate
//! - Field catalogs for the transaction and user-summary namespaces
//! - Wire types exchanged with the rules backend
//! - Rule draft validation and list query helpers

pub mod condition;
pub mod draft;
pub mod error;
pub mod model;
pub mod query;

// Re-export commonly used types
pub use condition::{
    Catalogs, Clause, ClauseEdit, ClauseIssue, ComparisonOp, ConditionBuilder, FieldCatalog,
    FieldSpec, FieldType, Literal, Namespace,
};
pub use draft::{DraftError, RuleDraft};
pub use error::CoreError;
pub use model::{
    EvaluationRequest, FlagLevel, FlaggedTransaction, NewRule, RecordId, ResultRow, Rule,
    Transaction,
};
pub use query::{Page, ResultQuery, ResultSortKey, SortDirection};
