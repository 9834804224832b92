//! Application state for the freight desk API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::carrier::FmcsaClient;
use crate::dataset::LoadTable;

/// Shared application state.
///
/// Everything in here is built once at startup and only ever read, so
/// handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// The load dataset.
    loads: Arc<LoadTable>,
    /// Client for the regulator API.
    carriers: FmcsaClient,
    /// Shared secret expected in `x-api-key`.
    api_key: Arc<str>,
}

impl AppState {
    /// Creates the application state.
    pub fn new(loads: LoadTable, carriers: FmcsaClient, api_key: impl Into<String>) -> Self {
        Self {
            loads: Arc::new(loads),
            carriers,
            api_key: Arc::from(api_key.into()),
        }
    }

    /// Returns the load dataset.
    pub fn loads(&self) -> &LoadTable {
        &self.loads
    }

    /// Returns the regulator client.
    pub fn carriers(&self) -> &FmcsaClient {
        &self.carriers
    }

    /// Returns the expected API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}
