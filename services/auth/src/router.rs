use axum::{
    Router,
    routing::{get, post, put},
};

use cinenight_core::health::{healthz, readyz};
use cinenight_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    password::change_password,
    reset::{issue_reset_code, reset_password, verify_reset_code},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Password recovery
        .route("/auth/reset-code", post(issue_reset_code))
        .route("/auth/reset-code/verify", post(verify_reset_code))
        .route("/auth/password/reset", post(reset_password))
        // Authenticated password change
        .route("/auth/password", put(change_password))
        .with_state(state)
        // Outermost last: the id is assigned before the span opens.
        .layer(propagate_request_id_layer())
        .layer(trace_layer())
        .layer(request_id_layer())
}
