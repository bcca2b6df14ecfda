//! Route definitions.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use calculator_core::Calculator;

use crate::handlers::{self, AppState};

/// Create the API router.
///
/// # Arguments
/// * `calculator` - The calculator shared by all handlers
pub fn create_router(calculator: Calculator) -> Router {
    let state = Arc::new(AppState { calculator });

    Router::new()
        .route("/", get(handlers::hello))
        // Health
        .route("/health", get(handlers::health))
        // Calculations
        .route("/calc", get(handlers::not_found).post(handlers::evaluate))
        .route("/calc/*path", get(handlers::calculate))
        .fallback(handlers::not_found)
        // State
        .with_state(state)
}
