//! HTTP request handlers for the Termination Settlement Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderName, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::calculation::compute_with_config;
use crate::models::TerminationScenario;

use super::request::SettlementRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Response header carrying the per-request correlation ID.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, correlation_id: Uuid, body: T) -> Response {
    (
        status,
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                HeaderName::from_static(CORRELATION_ID_HEADER),
                correlation_id.to_string(),
            ),
        ],
        Json(body),
    )
        .into_response()
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a settlement request and returns the itemized settlement.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<SettlementRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing settlement request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return json_response(StatusCode::BAD_REQUEST, correlation_id, error);
        }
    };

    let scenario: TerminationScenario = request.into();

    let start_time = Instant::now();
    match compute_with_config(&scenario, state.config().config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                category = %result.category,
                line_items = result.line_items.len(),
                net_total = %result.net_total,
                duration_us = start_time.elapsed().as_micros(),
                "Settlement computed successfully"
            );
            json_response(StatusCode::OK, correlation_id, result)
        }
        Err(err) => {
            if err.is_validation() {
                warn!(
                    correlation_id = %correlation_id,
                    error = %err,
                    "Settlement scenario rejected"
                );
            } else {
                error!(
                    correlation_id = %correlation_id,
                    error = %err,
                    "Settlement calculation failed"
                );
            }
            let api_error: ApiErrorResponse = err.into();
            json_response(api_error.status, correlation_id, api_error.error)
        }
    }
}
