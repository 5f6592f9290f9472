//! Console configuration
//!
//! Sources, lowest precedence first: built-in defaults, the optional file
//! `config/console.{toml,yaml,json}`, `RISKDESK_*` environment variables
//! (a `.env` file is honoured), then command-line flags.

use riskdesk_client::{ClientConfig, DEFAULT_TIMEOUT_SECS};
use riskdesk_core::query::DEFAULT_PAGE_SIZE;
use riskdesk_core::Catalogs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConsoleError, ConsoleResult};

/// Default config file, without extension
pub const DEFAULT_CONFIG_FILE: &str = "config/console";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "RISKDESK";

/// How command output is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format (default)
    #[default]
    Table,
    /// Machine-readable JSON format
    Json,
}

/// Console configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Backend base URL
    pub base_url: String,

    /// Static API key sent as `x-api-key`
    pub api_key: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Rows per page in the results list
    pub page_size: usize,

    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,

    /// YAML file replacing the built-in field catalogs
    pub catalog_path: Option<PathBuf>,

    /// Output format
    pub output: OutputFormat,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000".to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            log_level: "info".to_string(),
            catalog_path: None,
            output: OutputFormat::Table,
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from the default file and the environment
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from `file` (extension optional) and the environment
    ///
    /// A missing file leaves the defaults in place; a file that exists but
    /// cannot be parsed is an error.
    pub fn load_from(file: &str) -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to read config '{}': {}", file, e))?;

        cfg.try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e))
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Connection settings for the HTTP client
    pub fn client_config(&self) -> ClientConfig {
        let mut config =
            ClientConfig::new(self.base_url.clone()).with_timeout_secs(self.timeout_secs);
        config.api_key = self.api_key.clone().filter(|k| !k.trim().is_empty());
        config
    }

    pub fn validate(&self) -> ConsoleResult<()> {
        self.client_config()
            .validate()
            .map_err(|e| ConsoleError::Config(e.to_string()))?;
        if self.page_size == 0 {
            return Err(ConsoleError::Config("page_size must be positive".to_string()));
        }
        Ok(())
    }

    /// Field catalogs for the condition builder
    pub fn catalogs(&self) -> ConsoleResult<Catalogs> {
        match &self.catalog_path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                let catalogs = Catalogs::from_yaml_str(&content)?;
                tracing::debug!(path = %path.display(), "Loaded field catalogs");
                Ok(catalogs)
            }
            None => Ok(Catalogs::standard()),
        }
    }

    /// Filter directives used when `RUST_LOG` is unset
    pub fn log_filter(&self) -> String {
        let level = self.log_level.trim();
        let level = if level.is_empty() { "info" } else { level };
        format!("riskdesk_console={level},riskdesk_client={level},riskdesk_core={level}")
    }
}
