//! View-scoped cancellation
//!
//! Every view owns a [`ViewScope`]. Calls run through [`ViewScope::run`]
//! resolve to [`ClientError::Cancelled`] once the scope is closed, including
//! calls whose response arrives after the close, so their results are never
//! applied to the view.

use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// A scope that closes when `self` closes, but can also close on its own
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    /// Cancel every call running in this scope
    pub fn close(&self) {
        if !self.token.is_cancelled() {
            debug!("View scope closed");
        }
        self.token.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Run `call` unless the scope closes first
    pub async fn run<T, F>(&self, call: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        if self.token.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        let result = tokio::select! {
            biased;
            _ = self.token.cancelled() => return Err(ClientError::Cancelled),
            result = call => result,
        };

        if self.token.is_cancelled() {
            return Err(ClientError::Cancelled);
        }
        result
    }
}
