//! View-models behind each console screen
//!
//! Every view owns a [`ViewScope`](riskdesk_client::ViewScope). Network calls
//! run inside it and failures become a view-local message; closing the view
//! discards whatever is still in flight.

pub mod evaluation;
pub mod rule_form;
pub mod rules;
pub mod results;
pub mod transactions;

pub use evaluation::{EvaluationPanel, Status};
pub use rule_form::RuleForm;
pub use rules::{PendingToggle, RulesBoard};
pub use results::{ResultsBoard, UserFlaggedView};
pub use transactions::TransactionsBoard;
