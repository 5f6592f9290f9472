//! RiskDesk operator console
//!
//! View-models for each console screen, the route table, configuration and
//! the `riskdesk` command-line front end.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod routes;
pub mod views;

pub use cli::{Cli, Commands};
pub use config::{ConsoleConfig, OutputFormat};
pub use error::{ConsoleError, ConsoleResult};
pub use routes::Route;
