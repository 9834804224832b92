//! HTTP request handlers for the freight desk API.
//!
//! This module contains the router and the handler functions for all
//! API endpoints.

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::DeskError;
use crate::models::VerificationResult;

use super::guard::require_api_key;
use super::request::{LoadSearch, LoadSearchRequest, VerifyCarrierQuery};
use super::response::{ApiError, ApiErrorResponse, HealthResponse, json_response};
use super::state::AppState;

/// Creates the API router with all endpoints.
///
/// Every route sits behind the API key guard, including unmatched paths
/// and unsupported methods.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/verify_carrier", get(verify_carrier_handler))
        .route("/find_available_loads", post(find_available_loads_handler))
        .fallback(not_found_handler)
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .with_state(state)
}

/// Handler for GET /verify_carrier?mc_number=...
///
/// 404 when the MC number resolves to no carrier, 200 otherwise, with
/// `verified` telling whether the carrier holds for-hire authority.
async fn verify_carrier_handler(
    State(state): State<AppState>,
    query: Result<Query<VerifyCarrierQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            let body_text = rejection.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "Query string rejected");
            return json_response(
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_QUERY", body_text),
            );
        }
    };

    let Some(mc_number) = query.mc_number() else {
        warn!(correlation_id = %correlation_id, "Verification requested without mc_number");
        return json_response(
            StatusCode::BAD_REQUEST,
            ApiError::missing_parameter("mc_number"),
        );
    };
    info!(correlation_id = %correlation_id, mc_number = %mc_number, "Verifying carrier");

    match state.carriers().verify_carrier(mc_number).await {
        Ok(verification) => {
            let status = if verification.is_found() {
                StatusCode::OK
            } else {
                StatusCode::NOT_FOUND
            };
            info!(
                correlation_id = %correlation_id,
                found = verification.is_found(),
                verified = verification.is_verified(),
                "Carrier verification completed"
            );
            json_response(status, VerificationResult::from(verification))
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /find_available_loads.
///
/// A reference search answers with a single object, a lane search with
/// an array, even when it holds one load.
async fn find_available_loads_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoadSearchRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
                    ApiError::new("VALIDATION_ERROR", body_text)
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return json_response(StatusCode::BAD_REQUEST, error);
        }
    };

    let search = match request.into_search() {
        Ok(search) => search,
        Err(err) => return error_response(correlation_id, err),
    };

    let loads = state.loads();
    match search {
        LoadSearch::Reference(reference) => match loads.find_by_reference(&reference) {
            Ok(load) => {
                info!(
                    correlation_id = %correlation_id,
                    reference_number = %load.reference(),
                    "Load found by reference number"
                );
                json_response(StatusCode::OK, load)
            }
            Err(err) => error_response(correlation_id, err),
        },
        LoadSearch::Lane(query) => {
            let matches = loads.find_by_lane(&query);
            if matches.is_empty() {
                return error_response(correlation_id, DeskError::NoMatchingLoads);
            }
            info!(
                correlation_id = %correlation_id,
                matches = matches.len(),
                "Loads found by lane and equipment"
            );
            json_response(StatusCode::OK, matches)
        }
    }
}

/// Handler for GET /health.
async fn health_handler(State(state): State<AppState>) -> Response {
    let loads = state.loads();
    json_response(
        StatusCode::OK,
        HealthResponse {
            status: "ok".to_string(),
            loads: loads.len(),
            loaded_at: loads.loaded_at(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    )
}

async fn not_found_handler() -> Response {
    json_response(
        StatusCode::NOT_FOUND,
        ApiError::new("NOT_FOUND", "No such endpoint"),
    )
}

/// Logs a handler error at a level matching its status, then renders it.
fn error_response(correlation_id: Uuid, err: DeskError) -> Response {
    let message = err.to_string();
    let response = ApiErrorResponse::from(err);
    if response.status.is_server_error() {
        error!(correlation_id = %correlation_id, error = %message, "Request failed");
    } else {
        warn!(
            correlation_id = %correlation_id,
            status = response.status.as_u16(),
            error = %message,
            "Request rejected"
        );
    }
    response.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carrier::FmcsaClient;
    use crate::dataset::LoadTable;
    use crate::models::ReferenceKind;
    use axum::{body::Body, http::Request};
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use url::Url;

    const API_KEY: &str = "test-api-key";

    fn create_test_state() -> AppState {
        let csv = "\
reference_number,origin,destination,equipment_type,loadboard_rate
REF100,Dallas,Chicago,Reefer,1500
REF200,Houston,Denver,Flatbed,2100
";
        let table = LoadTable::from_reader(csv.as_bytes(), ReferenceKind::Text).unwrap();
        // Nothing listens on the discard port, so any upstream call fails fast.
        let client =
            FmcsaClient::new(Url::parse("http://127.0.0.1:9/carriers").unwrap(), "k").unwrap();
        AppState::new(table, client, API_KEY)
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = create_router(create_test_state())
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn post_search(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/find_available_loads")
            .header("Content-Type", "application/json")
            .header("x-api-key", API_KEY)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_reference_search_returns_single_object() {
        let (status, body) = send(post_search(r#"{"reference_number":"ref100 "}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "reference_number": "REF100",
                "origin": "Dallas",
                "destination": "Chicago",
                "equipment_type": "Reefer",
                "loadboard_rate": 1500
            })
        );
    }

    #[tokio::test]
    async fn test_lane_search_returns_array() {
        let (status, body) = send(post_search(
            r#"{"origin":"dallas","destination":"chicago","equipment_type":"reef"}"#,
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        let loads = body.as_array().unwrap();
        assert_eq!(loads.len(), 1);
        assert_eq!(loads[0]["reference_number"], "REF100");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let (status, body) = send(post_search("{invalid json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_content_type_returns_400() {
        let request = Request::builder()
            .method("POST")
            .uri("/find_available_loads")
            .header("x-api-key", API_KEY)
            .body(Body::from(r#"{"reference_number":"REF100"}"#))
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MISSING_CONTENT_TYPE");
    }

    #[tokio::test]
    async fn test_verify_without_mc_number_returns_400() {
        let request = Request::builder()
            .uri("/verify_carrier")
            .header("x-api-key", API_KEY)
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MISSING_PARAMETER");
    }

    #[tokio::test]
    async fn test_verify_with_digitless_mc_number_returns_400() {
        let request = Request::builder()
            .uri("/verify_carrier?mc_number=MC")
            .header("x-api-key", API_KEY)
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_MC_NUMBER");
    }

    #[tokio::test]
    async fn test_verify_with_unreachable_regulator_is_not_found() {
        let request = Request::builder()
            .uri("/verify_carrier?mc_number=MC123456")
            .header("x-api-key", API_KEY)
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["verified"], false);
    }

    #[tokio::test]
    async fn test_verify_with_duplicate_mc_number_returns_json_400() {
        let request = Request::builder()
            .uri("/verify_carrier?mc_number=1&mc_number=2")
            .header("x-api-key", API_KEY)
            .body(Body::empty())
            .unwrap();
        let response = create_router(create_test_state())
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()["content-type"], "application/json");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["code"], "INVALID_QUERY");
        assert!(body["message"].as_str().unwrap().contains("mc_number"));
    }

    #[tokio::test]
    async fn test_health_requires_api_key() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");

        let request = Request::builder()
            .method("POST")
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let request = Request::builder()
            .uri("/health")
            .header("x-api-key", API_KEY)
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["loads"], 2);
    }

    #[tokio::test]
    async fn test_unknown_path_is_guarded() {
        let request = Request::builder()
            .uri("/no_such_route")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");

        let request = Request::builder()
            .uri("/no_such_route")
            .header("x-api-key", API_KEY)
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
