//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::OrderConfig;
use crate::db::{CouchClient, StoreError};
use crate::services::token::TokenService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources: configuration, the document-store client, and the
/// token service. All of them are safe for concurrent use by multiple
/// in-flight requests.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: OrderConfig,
    store: CouchClient,
    tokens: TokenService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidUrl` if the configured database URL
    /// does not parse.
    pub fn new(config: OrderConfig) -> Result<Self, StoreError> {
        let store = CouchClient::new(&config)?;
        let tokens = TokenService::new(&config.token_secret);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                tokens,
            }),
        })
    }

    /// Get a reference to the service configuration.
    #[must_use]
    pub fn config(&self) -> &OrderConfig {
        &self.inner.config
    }

    /// Get a reference to the document-store client.
    #[must_use]
    pub fn store(&self) -> &CouchClient {
        &self.inner.store
    }

    /// Get a reference to the token service.
    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }
}
