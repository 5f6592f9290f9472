//! HTTP client layer for the RiskDesk console
//!
//! This crate provides access to the rules backend:
//!
//! - **[`AdminApi`]**: the backend operations the console uses
//! - **[`ApiClient`]**: `reqwest` implementation with `x-api-key` auth
//! - **[`ViewScope`]**: cancellation scope owned by each view
//! - **[`ClientError`]**: transport, status, validation and decode failures
//!
//! # Quick Start
//!
//! ```no_run
//! use riskdesk_client::{AdminApi, ApiClient, ClientConfig, ViewScope};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let api = ApiClient::new(ClientConfig::new("http://localhost:4000"))?;
//!     let scope = ViewScope::new();
//!
//!     let results = scope.run(api.list_results()).await?;
//!     println!("{} flagged users", results.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod scope;
pub mod traits;
pub mod upload;
mod wire;

pub use api::{ApiClient, API_KEY_HEADER};
pub use config::{ClientConfig, DEFAULT_TIMEOUT_SECS};
pub use error::{ClientError, ClientResult, ConfigError};
pub use scope::ViewScope;
pub use traits::AdminApi;
pub use upload::{check_csv_file, UPLOAD_FIELD};
