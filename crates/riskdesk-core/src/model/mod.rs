//! Wire types exchanged with the rules backend
//!
//! These records are owned by the backend; the console only reads them,
//! except for [`NewRule`] and [`EvaluationRequest`] which are request bodies.

mod evaluation;
mod id;
mod numeric;
mod result;
mod rule;
mod transaction;

pub use evaluation::EvaluationRequest;
pub use id::RecordId;
pub use result::ResultRow;
pub use rule::{FlagLevel, NewRule, Rule};
pub use transaction::{FlaggedTransaction, Transaction};
