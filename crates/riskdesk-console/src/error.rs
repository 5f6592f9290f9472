//! Console error types

use riskdesk_core::CoreError;
use thiserror::Error;

pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
