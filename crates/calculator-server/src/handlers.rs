//! Request handlers.
//!
//! Calculation endpoints answer in plain text: the rendered result with 200,
//! or the rejection message with 400.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use calculator_core::{parse, CalcResult, Calculator, Number, Operation};

/// Greeting returned by the root endpoint.
pub const GREETING: &str = "Hello from The Calculator!\n";

/// Application state.
pub struct AppState {
    /// The calculator shared by all handlers
    pub calculator: Calculator,
}

/// Root handler.
pub async fn hello() -> &'static str {
    GREETING
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Fallback for unknown routes.
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

/// Apply an operation to two path operands.
///
/// `path` is everything after `/calc/` and must be exactly
/// `{operation}/{op1}/{op2}`. Either operand may be empty, which the
/// parser rejects with 400 rather than the router answering 404.
pub async fn calculate(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Response {
    let mut segments = path.splitn(3, '/');
    let (Some(operation), Some(op1), Some(op2)) =
        (segments.next(), segments.next(), segments.next())
    else {
        return not_found().await;
    };
    let Ok(op) = operation.parse::<Operation>() else {
        return not_found().await;
    };
    if op2.contains('/') {
        return not_found().await;
    }

    let result = parse(op1)
        .and_then(|x| parse(op2).map(|y| (x, y)))
        .and_then(|(x, y)| state.calculator.apply(op, &x, &y));

    respond(op, result)
}

/// JSON body for [`evaluate`].
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    /// Operation name, as in the path routes
    pub operation: String,
    /// Left operand; must be a JSON number
    #[serde(default)]
    pub x: Value,
    /// Right operand; must be a JSON number
    #[serde(default)]
    pub y: Value,
}

/// Apply an operation to two JSON operands.
pub async fn evaluate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EvaluateRequest>,
) -> Response {
    let op = match request.operation.parse::<Operation>() {
        Ok(op) => op,
        Err(e) => {
            debug!(operation = %request.operation, "unsupported operation");
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    let result = state
        .calculator
        .evaluate_json(op, &request.x, &request.y);

    respond(op, result)
}

fn respond(op: Operation, result: CalcResult<Number>) -> Response {
    match result {
        Ok(value) => {
            debug!(%op, %value, "calculated");
            (StatusCode::OK, value.to_string()).into_response()
        }
        Err(e) => {
            debug!(%op, error = %e, "rejected operands");
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}
