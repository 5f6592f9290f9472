//! CLI command modules
//!
//! Each command opens the matching view, runs one action and prints the
//! outcome in the configured output format.

use anyhow::Result;
use riskdesk_client::{AdminApi, ApiClient, ClientError};
use riskdesk_core::Catalogs;
use std::sync::Arc;

use crate::config::{ConsoleConfig, OutputFormat};

// Rules
pub mod condition;
pub mod rules;

// Data
pub mod results;
pub mod transactions;

// Evaluation
pub mod evaluate;

// Navigation
pub mod open;

/// Shared state handed to every command
pub struct Context {
    pub api: Box<dyn AdminApi>,
    pub config: ConsoleConfig,
    pub catalogs: Arc<Catalogs>,
}

impl Context {
    /// Build the HTTP client and field catalogs from configuration
    pub fn new(config: ConsoleConfig) -> Result<Self> {
        let api = ApiClient::new(config.client_config())?;
        Self::with_api(config, Box::new(api))
    }

    pub fn with_api(config: ConsoleConfig, api: Box<dyn AdminApi>) -> Result<Self> {
        let catalogs = Arc::new(config.catalogs()?);
        Ok(Self {
            api,
            config,
            catalogs,
        })
    }

    pub fn api(&self) -> &dyn AdminApi {
        self.api.as_ref()
    }

    pub fn format(&self) -> OutputFormat {
        self.config.output
    }
}

/// Combine a view's message with the underlying error
pub(crate) fn view_failure(message: Option<&str>, err: ClientError) -> anyhow::Error {
    match (message, err) {
        (_, ClientError::Validation(m)) => anyhow::anyhow!(m),
        (Some(message), err) if message == err.server_message().unwrap_or_default() => {
            anyhow::anyhow!("{}", message)
        }
        (Some(message), err) => anyhow::anyhow!("{} ({})", message, err),
        (None, err) => err.into(),
    }
}
