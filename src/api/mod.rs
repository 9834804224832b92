//! HTTP API module for the freight desk service.
//!
//! This module provides the REST endpoints for carrier verification and
//! load search, and the API key guard in front of them.

mod guard;
mod handlers;
mod request;
mod response;
mod state;

pub use guard::{API_KEY_HEADER, require_api_key};
pub use handlers::create_router;
pub use request::{LoadSearch, LoadSearchRequest, VerifyCarrierQuery};
pub use response::{ApiError, ApiErrorResponse, HealthResponse};
pub use state::AppState;
