//! Condition Builder Module
//!
//! Composes a rule predicate out of typed clauses. Each clause compares one
//! field of a record namespace against a literal:
//!
//! ```text
//! t.age > 30 AND uts.trans_count_30d >= 5
//! ```
//!
//! ## Namespaces
//! - `Transaction` (prefix `t.`): raw transaction columns
//! - `UserSummary` (prefix `uts.`): precomputed per-user aggregates
//!
//! ## Literal formatting
//! The declared type of the field in its catalog decides how the literal is
//! written into the predicate:
//! - `boolean`: common truthy/falsy spellings become `TRUE` / `FALSE`
//! - `string`: wrapped in single quotes, embedded quotes doubled
//! - `number`: written exactly as typed
//!
//! ## Clause syntax (for text input)
//! ```text
//! t:age > 30
//! transaction:nationality = 'IN'
//! uts.trans_count_30d >= 5
//! ```

mod builder;
mod catalog;
mod format;
mod parser;
mod types;

pub use builder::{ClauseIssue, ConditionBuilder, ConditionListener, IssueKind};
pub use catalog::{Catalogs, FieldCatalog, FieldSpec, FieldType};
pub use format::{canonical_bool, format_literal, quote_string};
pub use parser::parse_clause;
pub use types::{Clause, ClauseEdit, ComparisonOp, Literal, Namespace};
