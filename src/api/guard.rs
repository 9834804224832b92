//! Access guard for protected endpoints.
//!
//! Every protected request must carry an `x-api-key` header equal to the
//! configured secret. Anything else is answered with 401 before the
//! handler runs.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;
use tracing::warn;

use super::response::{ApiError, json_response};
use super::state::AppState;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Middleware rejecting requests without the configured API key.
///
/// Compose with `axum::middleware::from_fn_with_state`.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(key) if key_matches(key, state.api_key()) => next.run(request).await,
        Some(_) => {
            warn!(
                method = %request.method(),
                path = %request.uri().path(),
                "Rejected request with invalid API key"
            );
            unauthorized()
        }
        None => {
            warn!(
                method = %request.method(),
                path = %request.uri().path(),
                "Rejected request without API key"
            );
            unauthorized()
        }
    }
}

/// Exact match in constant time; an empty key never matches.
///
/// A length mismatch still runs a full-length comparison so timing does
/// not reveal the expected key's length.
fn key_matches(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        let _ = expected.ct_eq(expected);
        return false;
    }
    let equal: bool = provided.ct_eq(expected).into();
    equal && !provided.is_empty()
}

fn unauthorized() -> Response {
    json_response(StatusCode::UNAUTHORIZED, ApiError::unauthorized())
}
